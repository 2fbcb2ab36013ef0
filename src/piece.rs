use crate::color::Color;
use crate::location::Location;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// A piece on the board.
///
/// `type_index` points into the game's piece-type table; the piece itself knows nothing about
/// how it moves.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Piece {
    location: Location,
    color: Color,
    type_index: usize,
    has_moved_yet: bool,
}

impl Piece {
    /// A piece that has not moved yet.
    #[inline]
    pub fn new(location: Location, color: Color, type_index: usize) -> Piece {
        Piece {
            location,
            color,
            type_index,
            has_moved_yet: false,
        }
    }

    #[inline]
    pub fn location(&self) -> Location {
        self.location
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn type_index(&self) -> usize {
        self.type_index
    }

    #[inline]
    pub fn has_moved_yet(&self) -> bool {
        self.has_moved_yet
    }

    /// This piece, after being moved to `location`.
    #[inline]
    pub fn moved_to(&self, location: Location) -> Piece {
        Piece {
            location,
            has_moved_yet: true,
            ..*self
        }
    }

    /// Only the board may relocate a piece without moving it.
    #[inline]
    pub(crate) fn placed_at(&self, location: Location) -> Piece {
        Piece { location, ..*self }
    }
}
