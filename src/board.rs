use crate::board_info::BoardInfo;
use crate::color::Color;
use crate::error::Error;
use crate::location::Location;
use crate::piece::Piece;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// A representation of the board: a grid of squares, each holding at most one piece.
///
/// Every piece's `location` matches the square it sits on.  The board keeps this true itself,
/// so the only way to put a piece somewhere is through the board.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(try_from = "BoardRecord"))]
pub struct Board {
    info: BoardInfo,
    squares: Vec<Option<Piece>>,
}

/// A board as stored, before it has been checked.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(Deserialize))]
pub struct BoardRecord {
    pub info: BoardInfo,
    pub squares: Vec<Option<Piece>>,
}

impl TryFrom<BoardRecord> for Board {
    type Error = Error;

    /// Rebuild a board, checking its dimensions, its square count, and that every piece sits
    /// where it says it does.
    fn try_from(record: BoardRecord) -> Result<Self, Self::Error> {
        let info = BoardInfo::new(
            record.info.num_rows(),
            record.info.num_cols(),
            record.info.num_piece_types(),
        )?;
        if record.squares.len() != info.num_squares() {
            return Err(Error::SquareCount {
                expected: info.num_squares(),
                found: record.squares.len(),
            });
        }
        for (square, piece) in info.locations().zip(record.squares.iter()) {
            if let Some(piece) = piece {
                if piece.location() != square {
                    return Err(Error::MisplacedPiece {
                        square,
                        claimed: piece.location(),
                    });
                }
                if piece.type_index() >= info.num_piece_types() {
                    return Err(Error::UnknownPieceType {
                        index: piece.type_index(),
                    });
                }
            }
        }
        Ok(Board {
            info,
            squares: record.squares,
        })
    }
}

impl Board {
    /// Construct a new `Board` that is completely empty.
    pub fn new(info: BoardInfo) -> Board {
        Board {
            info,
            squares: vec![None; info.num_squares()],
        }
    }

    /// The dimensions of this board.
    #[inline]
    pub fn info(&self) -> &BoardInfo {
        &self.info
    }

    /// Is this location on the board?
    #[inline]
    pub fn in_bounds(&self, loc: Location) -> bool {
        self.info.in_bounds(loc)
    }

    /// What piece is on a particular `Location`?  Is there even one?
    #[inline]
    pub fn piece_on(&self, loc: Location) -> Option<Piece> {
        if self.in_bounds(loc) {
            self.squares[self.info.to_index(loc)]
        } else {
            None
        }
    }

    /// Is this square on the board and empty?
    #[inline]
    pub fn is_empty(&self, loc: Location) -> bool {
        self.in_bounds(loc) && self.squares[self.info.to_index(loc)].is_none()
    }

    /// Put `piece` (or nothing) on `loc`, returning whatever was there before.  The piece's
    /// location is updated to match the square.
    ///
    /// `loc` must be in bounds; the public entry points check this before calling.
    pub(crate) fn set(&mut self, loc: Location, piece: Option<Piece>) -> Option<Piece> {
        debug_assert!(self.in_bounds(loc), "{} is off the board", loc);
        let index = self.info.to_index(loc);
        std::mem::replace(&mut self.squares[index], piece.map(|p| p.placed_at(loc)))
    }

    /// Take the piece off `loc`, if any.
    pub(crate) fn remove(&mut self, loc: Location) -> Option<Piece> {
        self.set(loc, None)
    }

    /// Call `f` on every location of the board, row by row.
    pub fn for_each_location<F: FnMut(Location)>(&self, f: F) {
        self.info.locations().for_each(f);
    }

    /// Every piece on the board, in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.squares.iter().filter_map(|square| square.as_ref())
    }

    /// Every piece of one color, in row-major order.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces().filter(move |piece| piece.color() == color)
    }

    /// Does every piece agree with the square it sits on?
    /// This is for sanity checking.
    pub fn is_sane(&self) -> bool {
        self.info
            .locations()
            .zip(self.squares.iter())
            .all(|(loc, square)| square.map_or(true, |piece| piece.location() == loc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_keeps_locations_in_sync() {
        let mut board = Board::new(BoardInfo::default());
        let a1 = Location::new(0, 0);
        let c3 = Location::new(2, 2);
        assert!(board.is_empty(a1));

        let piece = Piece::new(c3, Color::White, 1);
        assert_eq!(board.set(a1, Some(piece)), None);
        assert_eq!(board.piece_on(a1).map(|p| p.location()), Some(a1));
        assert!(board.is_sane());

        let removed = board.remove(a1).expect("a piece was there");
        assert_eq!(removed.type_index(), 1);
        assert!(board.is_empty(a1));
    }

    #[test]
    fn out_of_bounds_is_never_occupied() {
        let board = Board::new(BoardInfo::default());
        assert_eq!(board.piece_on(Location::new(-1, 0)), None);
        assert!(!board.is_empty(Location::new(8, 0)));
    }

    #[test]
    fn pieces_come_out_row_major() {
        let mut board = Board::new(BoardInfo::default());
        let h8 = Location::new(7, 7);
        let b1 = Location::new(0, 1);
        board.set(h8, Some(Piece::new(h8, Color::Black, 5)));
        board.set(b1, Some(Piece::new(b1, Color::White, 5)));
        let order: Vec<Location> = board.pieces().map(|p| p.location()).collect();
        assert_eq!(order, vec![b1, h8]);
        assert_eq!(board.pieces_of(Color::Black).count(), 1);

        let mut visited = 0;
        board.for_each_location(|_| visited += 1);
        assert_eq!(visited, 64);
    }

    fn stored(board: &Board) -> BoardRecord {
        BoardRecord {
            info: *board.info(),
            squares: board.squares.clone(),
        }
    }

    #[test]
    fn stored_boards_are_checked() {
        let mut board = Board::new(BoardInfo::default());
        let a1 = Location::new(0, 0);
        board.set(a1, Some(Piece::new(a1, Color::White, 5)));
        assert_eq!(Board::try_from(stored(&board)), Ok(board.clone()));

        let mut short = stored(&board);
        short.squares.pop();
        assert_eq!(
            Board::try_from(short),
            Err(Error::SquareCount {
                expected: 64,
                found: 63
            })
        );

        let mut shuffled = stored(&board);
        shuffled.squares.swap(0, 1);
        assert_eq!(
            Board::try_from(shuffled),
            Err(Error::MisplacedPiece {
                square: Location::new(0, 1),
                claimed: a1
            })
        );

        let mut unknown = stored(&board);
        unknown.squares[0] = Some(Piece::new(a1, Color::White, 6));
        assert_eq!(
            Board::try_from(unknown),
            Err(Error::UnknownPieceType { index: 6 })
        );
    }

    #[cfg(feature = "serialize")]
    #[test]
    fn json_rejects_a_corrupt_board() {
        let mut board = Board::new(BoardInfo::default());
        let h8 = Location::new(7, 7);
        board.set(h8, Some(Piece::new(h8, Color::Black, 5)));
        let json = serde_json::to_string(&board).expect("serializable");
        assert_eq!(serde_json::from_str::<Board>(&json).ok(), Some(board.clone()));

        let mut value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        let squares = value["squares"].as_array_mut().expect("a list of squares");
        squares.swap(62, 63);
        assert!(serde_json::from_value::<Board>(value).is_err());
    }
}
