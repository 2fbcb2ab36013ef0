//! A rules engine for procedurally generated fairy chess.
//!
//! Every game draws a fresh set of piece types.  Each type moves by a `MovementRule` built
//! from a small grammar of walkers, riders, leapers and hoppers, optionally wrapped in a
//! composite rule.  Rules are expanded into per-color path tables once, when they are built,
//! and move generation walks those paths under a per-rule `Controller`.
//!
//! ```
//! use fairy_chess::{legal_moves, Game};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut game = Game::generate("alice", "bob", &mut StdRng::seed_from_u64(3));
//! let moves = legal_moves(&game, game.current_state());
//! assert!(!moves.is_empty());
//! assert!(game.make_move(moves[0]));
//! assert_eq!(game.current_state_index(), 1);
//! ```

mod error;
pub use crate::error::*;

mod location;
pub use crate::location::*;

mod board_info;
pub use crate::board_info::*;

mod color;
pub use crate::color::*;

mod piece;
pub use crate::piece::*;

mod board;
pub use crate::board::*;

mod board_builder;
pub use crate::board_builder::*;

mod movement_rule;
pub use crate::movement_rule::*;

mod paths;

mod controller;
pub use crate::controller::*;

mod piece_type;
pub use crate::piece_type::*;

mod chess_move;
pub use crate::chess_move::*;

mod game_state;
pub use crate::game_state::*;

mod movegen;
pub use crate::movegen::*;

mod game;
pub use crate::game::*;

mod generator;
pub use crate::generator::*;

mod search;
pub use crate::search::*;
