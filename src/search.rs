//! A small fixed-depth evaluator built on top of the move generator.
//!
//! Pieces are valued by mobility: the number of moves a lone piece of that type has from the
//! middle of an empty board.  Royal pieces are worth nothing, since losing one ends the game
//! anyway.

use crate::board::Board;
use crate::chess_move::Move;
use crate::color::Color;
use crate::game::Game;
use crate::game_state::GameState;
use crate::movegen::{is_in_check, legal_moves, semi_legal_moves_for_piece};
use crate::piece::Piece;
use log::{debug, trace};

/// The score of a position where the side being scored has delivered checkmate.
pub const MATE_SCORE: i32 = 1_000_000;

const INFINITY: i32 = MATE_SCORE + 1;

/// Scores positions of one game.
#[derive(Clone, Debug)]
pub struct Searcher<'a> {
    game: &'a Game,
    values: Vec<i32>,
}

impl<'a> Searcher<'a> {
    /// Work out the value of every piece type in `game`.
    ///
    /// ```
    /// use fairy_chess::{orthodox_piece_types, BoardBuilder, Game, GameState, Players, Searcher};
    /// use std::convert::TryFrom;
    /// use std::str::FromStr;
    ///
    /// let builder = BoardBuilder::from_str("4k3/8/8/8/8/8/8/R3K3 w").unwrap();
    /// let state = GameState::try_from(&builder).unwrap();
    /// let types = orthodox_piece_types(builder.info());
    /// let game = Game::new(Players::new("white", "black"), types, state).unwrap();
    ///
    /// let searcher = Searcher::new(&game);
    /// assert_eq!(searcher.value(1), 14);
    /// let board = game.current_state().board();
    /// assert_eq!(searcher.score_lead(board, fairy_chess::Color::White), 14);
    /// ```
    pub fn new(game: &'a Game) -> Searcher<'a> {
        let info = *game.board_info();
        let center = info.center();
        let values = game
            .piece_types()
            .iter()
            .enumerate()
            .map(|(index, piece_type)| {
                if piece_type.is_royal() {
                    return 0;
                }
                let piece = Piece::new(center, Color::White, index);
                let mut board = Board::new(info);
                board.set(center, Some(piece));
                let lone = GameState::new(board, Color::White);
                let value = semi_legal_moves_for_piece(game, &lone, &piece).len() as i32;
                debug!("{} is worth {}", piece_type.name(), value);
                value
            })
            .collect();
        Searcher { game, values }
    }

    /// The value of the piece type at `type_index`, or 0 for an unknown type.
    #[inline]
    pub fn value(&self, type_index: usize) -> i32 {
        self.values.get(type_index).copied().unwrap_or(0)
    }

    /// The material of `color` minus the material of its opponent.
    pub fn score_lead(&self, board: &Board, color: Color) -> i32 {
        board.pieces().fold(0, |lead, piece| {
            let value = self.value(piece.type_index());
            if piece.color() == color {
                lead + value
            } else {
                lead - value
            }
        })
    }

    fn terminal_score(&self, state: &GameState, moves: &[Move], color: Color) -> Option<i32> {
        if !moves.is_empty() {
            return None;
        }
        let mover = state.player_to_move();
        if !is_in_check(self.game, state, mover) {
            Some(0)
        } else if mover == color {
            Some(-MATE_SCORE)
        } else {
            Some(MATE_SCORE)
        }
    }

    /// The lead `color` can force within `plies` moves, searching every line.
    pub fn best_score_lead(&self, state: &GameState, color: Color, plies: usize) -> i32 {
        let moves = legal_moves(self.game, state);
        if let Some(score) = self.terminal_score(state, &moves, color) {
            return score;
        }
        if plies == 0 {
            return self.score_lead(state.board(), color);
        }

        let scores = moves
            .iter()
            .map(|m| self.best_score_lead(&state.execute_move(m), color, plies - 1));
        if state.player_to_move() == color {
            scores.max().unwrap_or(0)
        } else {
            scores.min().unwrap_or(0)
        }
    }

    fn negamax(&self, state: &GameState, plies: usize, mut alpha: i32, beta: i32) -> i32 {
        let mover = state.player_to_move();
        let moves = legal_moves(self.game, state);
        if let Some(score) = self.terminal_score(state, &moves, mover) {
            return score;
        }
        if plies == 0 {
            return self.score_lead(state.board(), mover);
        }

        let mut best = -INFINITY;
        for m in moves.iter() {
            let score = -self.negamax(&state.execute_move(m), plies - 1, -beta, -alpha);
            best = best.max(score);
            alpha = alpha.max(best);
            if alpha >= beta {
                break;
            }
        }
        best
    }

    /// The best move for the side to move, looking `plies` moves ahead, and the lead it
    /// secures.  Returns `None` when there are no legal moves.
    pub fn best_move(&self, state: &GameState, plies: usize) -> Option<(Move, i32)> {
        let mut alpha = -INFINITY;
        let mut best = None;
        for m in legal_moves(self.game, state) {
            let score = -self.negamax(
                &state.execute_move(&m),
                plies.saturating_sub(1),
                -INFINITY,
                -alpha,
            );
            trace!("{} scores {}", m, score);
            if score > alpha {
                alpha = score;
                best = Some((m, score));
            }
        }
        best
    }
}
