//! Procedural generation of piece types and the starting position.
//!
//! Every piece type except the pawn and the king gets a movement rule drawn at random from
//! the tables of its rank.  Composite rules only ever nest plain rules, and a composite never
//! draws the same kind twice.

mod rules;
mod setup;
mod weights;

pub use self::rules::*;
pub use self::setup::*;
pub use self::weights::*;
