use crate::error::Error;
use crate::location::Location;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// The fixed shape of a game: board dimensions and how many piece types it uses.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct BoardInfo {
    num_rows: usize,
    num_cols: usize,
    num_piece_types: usize,
}

/// How many piece types a standard game generates.
pub const NUM_PIECE_TYPES: usize = 6;

impl BoardInfo {
    /// Describe a board.  Each side needs a back row and a row of lowly pieces, so there must
    /// be at least 4 rows.
    ///
    /// ```
    /// use fairy_chess::BoardInfo;
    ///
    /// assert!(BoardInfo::new(8, 8, 6).is_ok());
    /// assert!(BoardInfo::new(3, 8, 6).is_err());
    /// ```
    pub fn new(
        num_rows: usize,
        num_cols: usize,
        num_piece_types: usize,
    ) -> Result<BoardInfo, Error> {
        if num_rows < 4 || num_cols < 1 || num_piece_types < 1 {
            return Err(Error::InvalidBoardInfo {
                num_rows,
                num_cols,
                num_piece_types,
            });
        }
        Ok(BoardInfo {
            num_rows,
            num_cols,
            num_piece_types,
        })
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    #[inline]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    #[inline]
    pub fn num_piece_types(&self) -> usize {
        self.num_piece_types
    }

    /// The number of squares on the board.
    #[inline]
    pub fn num_squares(&self) -> usize {
        self.num_rows * self.num_cols
    }

    /// Is this location on the board?
    #[inline]
    pub fn in_bounds(&self, loc: Location) -> bool {
        loc.row >= 0
            && loc.col >= 0
            && (loc.row as usize) < self.num_rows
            && (loc.col as usize) < self.num_cols
    }

    /// The longest straight slide that still fits on the board.
    #[inline]
    pub fn max_distance(&self) -> usize {
        self.num_rows.max(self.num_cols) - 1
    }

    /// Row-major index of an in-bounds location.
    #[inline]
    pub(crate) fn to_index(&self, loc: Location) -> usize {
        loc.row as usize * self.num_cols + loc.col as usize
    }

    /// Every location on the board, row by row.
    pub fn locations(&self) -> impl Iterator<Item = Location> {
        let num_cols = self.num_cols as i32;
        (0..self.num_rows as i32)
            .flat_map(move |row| (0..num_cols).map(move |col| Location::new(row, col)))
    }

    /// The square in the middle of the board (rounding toward White and the `a` file).
    pub fn center(&self) -> Location {
        Location::new(
            (self.num_rows as i32 - 1) / 2,
            (self.num_cols as i32 - 1) / 2,
        )
    }
}

impl Default for BoardInfo {
    /// The standard 8x8 board with six piece types.
    fn default() -> BoardInfo {
        BoardInfo {
            num_rows: 8,
            num_cols: 8,
            num_piece_types: NUM_PIECE_TYPES,
        }
    }
}
