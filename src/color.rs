use crate::board_info::BoardInfo;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Not;

/// Represent a color.
#[derive(PartialOrd, Ord, PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Color {
    White,
    Black,
}

/// How many colors are there?
pub const NUM_COLORS: usize = 2;
/// List all colors
pub const ALL_COLORS: [Color; NUM_COLORS] = [Color::White, Color::Black];

impl Color {
    /// Convert the `Color` to a `usize` for table lookups.
    #[inline]
    pub fn to_index(&self) -> usize {
        *self as usize
    }

    /// Which way is "forward" for this color, as a row delta?
    ///
    /// White starts on row 0 and moves up the board, Black the other way.
    #[inline]
    pub fn advance_direction(&self) -> i32 {
        match *self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// The row this color's back rank starts on.
    #[inline]
    pub fn home_row(&self, board_info: &BoardInfo) -> i32 {
        match *self {
            Color::White => 0,
            Color::Black => board_info.num_rows() as i32 - 1,
        }
    }

    /// The row this color's lowly pieces start on.
    #[inline]
    pub fn second_row(&self, board_info: &BoardInfo) -> i32 {
        self.home_row(board_info) + self.advance_direction()
    }
}

impl Not for Color {
    type Output = Color;

    /// Get the other color.
    #[inline]
    fn not(self) -> Color {
        if self == Color::White {
            Color::Black
        } else {
            Color::White
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_rows_face_each_other() {
        let info = BoardInfo::default();
        assert_eq!(Color::White.home_row(&info), 0);
        assert_eq!(Color::Black.home_row(&info), 7);
        assert_eq!(Color::White.second_row(&info), 1);
        assert_eq!(Color::Black.second_row(&info), 6);
        assert_eq!(!Color::White, Color::Black);
    }
}
