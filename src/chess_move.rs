use crate::location::Location;
use crate::piece::Piece;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a move does with its piece.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum MoveKind {
    /// Move the piece to a square, capturing any enemy piece there.
    SelfMove(Location),
    /// Swap places with the friendly piece on a square.
    Exchange(Location),
}

/// Represent a move in memory: the piece that moves, as it stood before the move, and what it
/// does.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Move {
    piece: Piece,
    kind: MoveKind,
}

impl Move {
    /// Create a new move for `piece`.
    #[inline]
    pub fn new(piece: Piece, kind: MoveKind) -> Move {
        Move { piece, kind }
    }

    /// Move `piece` to `to`.
    #[inline]
    pub fn self_move(piece: Piece, to: Location) -> Move {
        Move::new(piece, MoveKind::SelfMove(to))
    }

    /// Swap `piece` with the piece on `with`.
    #[inline]
    pub fn exchange(piece: Piece, with: Location) -> Move {
        Move::new(piece, MoveKind::Exchange(with))
    }

    /// Get the piece being moved.
    #[inline]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    #[inline]
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Get the source square (square the piece is currently on).
    #[inline]
    pub fn from(&self) -> Location {
        self.piece.location()
    }

    /// Get the destination square (square the piece is going to).
    #[inline]
    pub fn to(&self) -> Location {
        match self.kind {
            MoveKind::SelfMove(to) | MoveKind::Exchange(to) => to,
        }
    }

    #[inline]
    pub fn is_exchange(&self) -> bool {
        match self.kind {
            MoveKind::Exchange(_) => true,
            MoveKind::SelfMove(_) => false,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            MoveKind::SelfMove(to) => write!(f, "{}{}", self.from(), to),
            MoveKind::Exchange(with) => write!(f, "{}<>{}", self.from(), with),
        }
    }
}
