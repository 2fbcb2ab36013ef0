use crate::board::Board;
use crate::board_info::{BoardInfo, NUM_PIECE_TYPES};
use crate::color::Color;
use crate::error::Error;
use crate::game_state::GameState;
use crate::location::Location;
use crate::piece::Piece;

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

/// Letters used by the text layout for the standard piece-type table, by type index.
pub const LAYOUT_LETTERS: [char; NUM_PIECE_TYPES] = ['P', 'R', 'N', 'B', 'Q', 'K'];

/// Represents a position that has *not* been validated.
///
/// This structure is useful in the following cases:
/// * You are trying to build a position manually in code (tests, puzzles, analysis).
/// * You want to convert to or from the text layout.
///
/// The text layout is FEN-like: rows from the top of the board down, separated by `/`,
/// digits for runs of empty squares, and one letter per piece, upper case for White and lower
/// case for Black.  Letters follow the standard piece-type table (`P R N B Q K` for indices
/// 0 through 5).  An optional `w` or `b` gives the player to move.
///
/// ```
/// use fairy_chess::{BoardBuilder, Board, Color, GameState, Location};
/// use std::convert::TryFrom;
/// use std::str::FromStr;
///
/// let mut position = BoardBuilder::new(Default::default());
/// position.piece(Location::new(0, 4), 5, Color::White);
/// position.piece(Location::new(7, 4), 5, Color::Black);
/// let board = Board::try_from(&position).expect("valid position");
/// assert_eq!(board.piece_on(Location::new(7, 4)).map(|p| p.type_index()), Some(5));
///
/// let state = GameState::try_from(&BoardBuilder::from_str("4k3/8/8/8/8/8/8/4K3 b").unwrap());
/// assert_eq!(state.unwrap().player_to_move(), Color::Black);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BoardBuilder {
    info: BoardInfo,
    pieces: Vec<(Location, usize, Color)>,
    side_to_move: Color,
}

impl BoardBuilder {
    /// Construct a new, empty, BoardBuilder with White to move.
    pub fn new(info: BoardInfo) -> BoardBuilder {
        BoardBuilder {
            info,
            pieces: vec![],
            side_to_move: Color::White,
        }
    }

    /// Set up a board with everything pre-loaded.
    pub fn setup<'a>(
        info: BoardInfo,
        pieces: impl IntoIterator<Item = &'a (Location, usize, Color)>,
        side_to_move: Color,
    ) -> BoardBuilder {
        let mut result = BoardBuilder::new(info);
        result.side_to_move(side_to_move);
        for &(loc, type_index, color) in pieces {
            result.piece(loc, type_index, color);
        }
        result
    }

    /// The board dimensions this builder will produce.
    pub fn info(&self) -> &BoardInfo {
        &self.info
    }

    /// Get the current player
    pub fn get_side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Set the side to move on the position
    ///
    /// This function can be used on self directly or in a builder pattern.
    pub fn side_to_move(&mut self, color: Color) -> &mut Self {
        self.side_to_move = color;
        self
    }

    /// Set a piece on a square.
    ///
    /// Note that this can and will overwrite another piece on the square if need.
    ///
    /// This function can be used on self directly or in a builder pattern.
    pub fn piece(&mut self, loc: Location, type_index: usize, color: Color) -> &mut Self {
        self.clear_square(loc);
        self.pieces.push((loc, type_index, color));
        self
    }

    /// Clear a square on the board.
    pub fn clear_square(&mut self, loc: Location) -> &mut Self {
        self.pieces.retain(|&(l, _, _)| l != loc);
        self
    }

    /// What is on a particular square?
    pub fn get(&self, loc: Location) -> Option<(usize, Color)> {
        self.pieces
            .iter()
            .find(|&&(l, _, _)| l == loc)
            .map(|&(_, type_index, color)| (type_index, color))
    }
}

impl TryFrom<&BoardBuilder> for Board {
    type Error = Error;

    fn try_from(builder: &BoardBuilder) -> Result<Self, Self::Error> {
        let mut board = Board::new(builder.info);
        for &(loc, type_index, color) in builder.pieces.iter() {
            if !builder.info.in_bounds(loc) {
                return Err(Error::OutOfBounds { location: loc });
            }
            if type_index >= builder.info.num_piece_types() {
                return Err(Error::UnknownPieceType { index: type_index });
            }
            board.set(loc, Some(Piece::new(loc, color, type_index)));
        }
        Ok(board)
    }
}

impl TryFrom<BoardBuilder> for Board {
    type Error = Error;

    fn try_from(builder: BoardBuilder) -> Result<Self, Self::Error> {
        Board::try_from(&builder)
    }
}

impl TryFrom<&BoardBuilder> for GameState {
    type Error = Error;

    fn try_from(builder: &BoardBuilder) -> Result<Self, Self::Error> {
        Ok(GameState::new(Board::try_from(builder)?, builder.side_to_move))
    }
}

impl From<&GameState> for BoardBuilder {
    fn from(state: &GameState) -> Self {
        let board = state.board();
        let mut result = BoardBuilder::new(*board.info());
        result.side_to_move(state.player_to_move());
        for piece in board.pieces() {
            result.piece(piece.location(), piece.type_index(), piece.color());
        }
        result
    }
}

impl fmt::Display for BoardBuilder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in (0..self.info.num_rows() as i32).rev() {
            let mut count = 0;
            for col in 0..self.info.num_cols() as i32 {
                match self.get(Location::new(row, col)) {
                    Some((type_index, color)) => {
                        if count != 0 {
                            write!(f, "{}", count)?;
                            count = 0;
                        }
                        let letter = LAYOUT_LETTERS.get(type_index).copied().unwrap_or('?');
                        match color {
                            Color::White => write!(f, "{}", letter)?,
                            Color::Black => write!(f, "{}", letter.to_ascii_lowercase())?,
                        }
                    }
                    None => count += 1,
                }
            }
            if count != 0 {
                write!(f, "{}", count)?;
            }
            if row != 0 {
                write!(f, "/")?;
            }
        }

        match self.side_to_move {
            Color::White => write!(f, " w"),
            Color::Black => write!(f, " b"),
        }
    }
}

impl FromStr for BoardBuilder {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidLayout {
            layout: value.to_owned(),
        };
        let mut tokens = value.split_whitespace();
        let layout = tokens.next().ok_or_else(invalid)?;
        let side = match tokens.next() {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(_) => return Err(invalid()),
        };

        let rows: Vec<&str> = layout.split('/').collect();
        let mut parsed: Vec<Vec<Option<(usize, Color)>>> = Vec::with_capacity(rows.len());
        for row in rows.iter() {
            let mut squares = vec![];
            let mut empties = String::new();
            for c in row.chars() {
                if c.is_ascii_digit() {
                    empties.push(c);
                    continue;
                }
                if !empties.is_empty() {
                    let run: usize = empties.parse().map_err(|_| invalid())?;
                    squares.extend(std::iter::repeat(None).take(run));
                    empties.clear();
                }
                let type_index = LAYOUT_LETTERS
                    .iter()
                    .position(|l| *l == c.to_ascii_uppercase())
                    .ok_or_else(invalid)?;
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                squares.push(Some((type_index, color)));
            }
            if !empties.is_empty() {
                let run: usize = empties.parse().map_err(|_| invalid())?;
                squares.extend(std::iter::repeat(None).take(run));
            }
            parsed.push(squares);
        }

        let num_cols = parsed.first().map_or(0, |r| r.len());
        if parsed.iter().any(|r| r.len() != num_cols) {
            return Err(invalid());
        }
        let info = BoardInfo::new(parsed.len(), num_cols, NUM_PIECE_TYPES)?;

        let mut result = BoardBuilder::new(info);
        result.side_to_move(side);
        let top = parsed.len() as i32 - 1;
        for (i, squares) in parsed.iter().enumerate() {
            for (col, square) in squares.iter().enumerate() {
                if let Some((type_index, color)) = *square {
                    result.piece(Location::new(top - i as i32, col as i32), type_index, color);
                }
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_round_trip() {
        let text = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b";
        let builder = BoardBuilder::from_str(text).expect("valid layout");
        assert_eq!(builder.to_string(), text);
        assert_eq!(builder.get(Location::new(3, 4)), Some((0, Color::White)));
        assert_eq!(builder.get(Location::new(7, 3)), Some((4, Color::Black)));
        assert_eq!(builder.get_side_to_move(), Color::Black);
    }

    #[test]
    fn wide_rows_use_multi_digit_runs() {
        let builder = BoardBuilder::from_str("12/12/12/K11").expect("valid layout");
        assert_eq!(builder.info().num_cols(), 12);
        assert_eq!(builder.info().num_rows(), 4);
        assert_eq!(builder.get(Location::new(0, 0)), Some((5, Color::White)));
    }

    #[test]
    fn invalid_layouts() {
        assert!(BoardBuilder::from_str("").is_err());
        assert!(BoardBuilder::from_str("8/8/8/7").is_err());
        assert!(BoardBuilder::from_str("8/8/8/7X").is_err());
        assert!(BoardBuilder::from_str("8/8/8/8 x").is_err());
        assert!(BoardBuilder::from_str("8/8/8").is_err());
    }

    #[test]
    fn rejects_bad_pieces() {
        let mut builder = BoardBuilder::new(BoardInfo::default());
        builder.piece(Location::new(8, 0), 0, Color::White);
        assert_eq!(
            Board::try_from(&builder),
            Err(Error::OutOfBounds {
                location: Location::new(8, 0)
            })
        );

        let mut builder = BoardBuilder::new(BoardInfo::default());
        builder.piece(Location::new(0, 0), 6, Color::White);
        assert_eq!(
            Board::try_from(&builder),
            Err(Error::UnknownPieceType { index: 6 })
        );
    }

    #[test]
    fn later_pieces_replace_earlier_ones() {
        let a1 = Location::new(0, 0);
        let mut builder = BoardBuilder::new(BoardInfo::default());
        builder.piece(a1, 1, Color::White).piece(a1, 2, Color::Black);
        assert_eq!(builder.get(a1), Some((2, Color::Black)));
        let board = Board::try_from(builder).expect("valid board");
        assert_eq!(board.pieces().count(), 1);
    }
}
