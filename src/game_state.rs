use crate::board::Board;
use crate::chess_move::{Move, MoveKind};
use crate::color::Color;
use crate::piece::Piece;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// What state is the game in?
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum GameStatus {
    NotOver,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    #[inline]
    pub fn is_over(&self) -> bool {
        *self != GameStatus::NotOver
    }
}

/// A snapshot of the game between two moves.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct GameState {
    board: Board,
    player_to_move: Color,
    status: GameStatus,
    captured_pieces: Vec<Piece>,
}

impl GameState {
    /// A state with nothing captured yet and the game in progress.
    pub fn new(board: Board, player_to_move: Color) -> GameState {
        GameState {
            board,
            player_to_move,
            status: GameStatus::NotOver,
            captured_pieces: vec![],
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn player_to_move(&self) -> Color {
        self.player_to_move
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Every piece taken so far, oldest first.
    #[inline]
    pub fn captured_pieces(&self) -> &[Piece] {
        &self.captured_pieces
    }

    #[inline]
    pub(crate) fn set_status(&mut self, status: GameStatus) {
        self.status = status;
    }

    /// The state after `m`, leaving this one untouched.  The move is assumed to be legal
    /// (its piece is where it says and its target is on the board), and the status is
    /// carried over as is.
    pub fn execute_move(&self, m: &Move) -> GameState {
        debug_assert_eq!(self.board.piece_on(m.from()), Some(m.piece()));
        debug_assert!(self.board.in_bounds(m.to()));

        let mut result = self.clone();
        let from = m.from();
        let mover = result.board.remove(from).unwrap_or_else(|| m.piece());

        match m.kind() {
            MoveKind::SelfMove(to) => {
                if let Some(captured) = result.board.set(to, Some(mover.moved_to(to))) {
                    result.captured_pieces.push(captured);
                }
            }
            MoveKind::Exchange(with) => {
                let partner = result.board.remove(with);
                result.board.set(with, Some(mover.moved_to(with)));
                if let Some(partner) = partner {
                    result.board.set(from, Some(partner.moved_to(from)));
                }
            }
        }

        result.player_to_move = !self.player_to_move;
        result
    }
}
