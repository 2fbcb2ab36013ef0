use crate::board_info::BoardInfo;
use crate::color::{Color, NUM_COLORS};
use crate::location::{Location, Vector};
use crate::paths;
use arrayvec::ArrayVec;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// How many canonical step vectors there are.
pub const NUM_VECTORS: usize = 5;

/// The canonical step vectors.  Columns are never negative; every rule is mirrored left to
/// right when its paths are expanded.
pub const ALL_VECTORS: [Vector; NUM_VECTORS] = [
    Location::new(1, 0),
    Location::new(1, 1),
    Location::new(0, 1),
    Location::new(-1, 0),
    Location::new(-1, 1),
];

/// The vectors that move a piece toward the opponent.
pub const FORWARD_VECTORS: [Vector; 2] = [Location::new(1, 0), Location::new(1, 1)];

/// A non-empty subset of `ALL_VECTORS`.
pub type VectorSet = ArrayVec<Vector, NUM_VECTORS>;

/// One way of getting from a square to another: the steps taken, in order.
pub type Path = Vec<Vector>;

/// Every canonical vector.
pub fn all_vectors() -> VectorSet {
    ALL_VECTORS.iter().copied().collect()
}

/// The displacements a leaper can make: `m` squares one way and `n` the other, for every `m`
/// and `n` in the inclusive ranges.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct LeapRange {
    pub m_min: i32,
    pub m_max: i32,
    pub n_min: i32,
    pub n_max: i32,
}

impl LeapRange {
    pub fn new(m_min: i32, m_max: i32, n_min: i32, n_max: i32) -> LeapRange {
        LeapRange {
            m_min,
            m_max,
            n_min,
            n_max,
        }
    }

    /// A single `(m, n)` leap, such as the knight's `(1, 2)`.
    pub fn fixed(m: i32, n: i32) -> LeapRange {
        LeapRange::new(m, m, n, n)
    }
}

/// The parameters of a movement rule that can appear inside another one.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Motion {
    /// Between `min` and `max` single steps, each along any of the vectors.
    Walker {
        vectors: VectorSet,
        min: usize,
        max: usize,
    },
    /// Any distance along one vector.
    Rider { vectors: VectorSet },
    /// One leap, jumping over anything in between.
    Leaper(LeapRange),
    /// The same leap, repeated any number of times.
    Leaprider(LeapRange),
    /// Hop over an adjacent piece, then ride on.
    Catapult { vectors: VectorSet },
    /// Ride up to a piece and land just past it.
    Grasshopper { vectors: VectorSet },
    /// Up to `limit` hops, each over an adjacent piece.
    Leapfrog { vectors: VectorSet, limit: usize },
}

impl Motion {
    /// The tag of this motion.
    pub fn kind(&self) -> NestableKind {
        match *self {
            Motion::Walker { .. } => NestableKind::Walker,
            Motion::Rider { .. } => NestableKind::Rider,
            Motion::Leaper(_) => NestableKind::Leaper,
            Motion::Leaprider(_) => NestableKind::Leaprider,
            Motion::Catapult { .. } => NestableKind::Catapult,
            Motion::Grasshopper { .. } => NestableKind::Grasshopper,
            Motion::Leapfrog { .. } => NestableKind::Leapfrog,
        }
    }
}

/// A movement rule that may be nested inside a composite rule, along with its paths for each
/// color.
///
/// The paths are computed once, here, for the board the rule was built for.
///
/// ```
/// use fairy_chess::{BoardInfo, Color, Motion, NestableRule, all_vectors};
///
/// let king = NestableRule::new(
///     Motion::Walker { vectors: all_vectors(), min: 1, max: 1 },
///     &BoardInfo::default(),
/// );
/// assert_eq!(king.paths(Color::White).len(), 8);
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct NestableRule {
    motion: Motion,
    paths: [Vec<Path>; NUM_COLORS],
}

impl NestableRule {
    /// Build the rule and expand its paths for `board_info`.
    pub fn new(motion: Motion, board_info: &BoardInfo) -> NestableRule {
        let white = paths::expand(&motion, board_info);
        let black = paths::flip_vertical(&white);
        NestableRule {
            motion,
            paths: [white, black],
        }
    }

    #[inline]
    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    #[inline]
    pub fn kind(&self) -> NestableKind {
        self.motion.kind()
    }

    /// The precomputed paths for a piece of `color`.
    #[inline]
    pub fn paths(&self, color: Color) -> &[Path] {
        &self.paths[color.to_index()]
    }
}

/// Which home-row squares a retreating piece may jump back to.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum RetreatSquares {
    Black,
    White,
    Both,
}

/// Every option, in a fixed order.
pub const ALL_RETREAT_SQUARES: [RetreatSquares; 3] = [
    RetreatSquares::Black,
    RetreatSquares::White,
    RetreatSquares::Both,
];

impl RetreatSquares {
    /// May a piece retreat to `loc`?
    #[inline]
    pub fn allows(&self, loc: Location) -> bool {
        match *self {
            RetreatSquares::Black => loc.is_dark_square(),
            RetreatSquares::White => !loc.is_dark_square(),
            RetreatSquares::Both => true,
        }
    }
}

/// A rule built out of nestable rules.  Composites never contain composites.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum CompositeRule {
    /// Moves by `regular`, or swaps places with a friendly piece of type `with`.
    Exchange { with: usize, regular: NestableRule },
    /// Moves by `regular`, or jumps back to an empty square of its home row.
    Retreat {
        squares: RetreatSquares,
        regular: NestableRule,
    },
    /// Moves without capturing by `movement`, and captures only by `capture`.
    MoveCapture {
        movement: NestableRule,
        capture: NestableRule,
    },
    /// Moves and captures by either rule.
    Combination {
        first: NestableRule,
        second: NestableRule,
    },
}

impl CompositeRule {
    pub fn kind(&self) -> CompositeKind {
        match *self {
            CompositeRule::Exchange { .. } => CompositeKind::Exchange,
            CompositeRule::Retreat { .. } => CompositeKind::Retreat,
            CompositeRule::MoveCapture { .. } => CompositeKind::MoveCapture,
            CompositeRule::Combination { .. } => CompositeKind::Combination,
        }
    }
}

/// How a piece type moves.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum MovementRule {
    Nestable(NestableRule),
    Composite(CompositeRule),
}

impl MovementRule {
    pub fn kind(&self) -> RuleKind {
        match *self {
            MovementRule::Nestable(ref rule) => RuleKind::Nestable(rule.kind()),
            MovementRule::Composite(ref rule) => RuleKind::Composite(rule.kind()),
        }
    }

    /// One step in any direction: the king's rule.
    pub fn king(board_info: &BoardInfo) -> MovementRule {
        MovementRule::Nestable(NestableRule::new(
            Motion::Walker {
                vectors: all_vectors(),
                min: 1,
                max: 1,
            },
            board_info,
        ))
    }

    /// One step forward to move, one step diagonally forward to capture.
    pub fn pawn(board_info: &BoardInfo) -> MovementRule {
        let step = |vector: Vector| {
            let mut vectors = VectorSet::new();
            vectors.push(vector);
            NestableRule::new(
                Motion::Walker {
                    vectors,
                    min: 1,
                    max: 1,
                },
                board_info,
            )
        };
        MovementRule::Composite(CompositeRule::MoveCapture {
            movement: step(FORWARD_VECTORS[0]),
            capture: step(FORWARD_VECTORS[1]),
        })
    }
}

impl From<NestableRule> for MovementRule {
    fn from(rule: NestableRule) -> MovementRule {
        MovementRule::Nestable(rule)
    }
}

impl From<CompositeRule> for MovementRule {
    fn from(rule: CompositeRule) -> MovementRule {
        MovementRule::Composite(rule)
    }
}

/// The tag of a nestable rule.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum NestableKind {
    Walker,
    Rider,
    Leaper,
    Leaprider,
    Catapult,
    Grasshopper,
    Leapfrog,
}

/// The tag of a composite rule.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum CompositeKind {
    Exchange,
    Retreat,
    MoveCapture,
    Combination,
}

/// The tag of any movement rule, without its parameters.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum RuleKind {
    Nestable(NestableKind),
    Composite(CompositeKind),
}

impl From<NestableKind> for RuleKind {
    fn from(kind: NestableKind) -> RuleKind {
        RuleKind::Nestable(kind)
    }
}

impl From<CompositeKind> for RuleKind {
    fn from(kind: CompositeKind) -> RuleKind {
        RuleKind::Composite(kind)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            RuleKind::Nestable(NestableKind::Walker) => "walker",
            RuleKind::Nestable(NestableKind::Rider) => "rider",
            RuleKind::Nestable(NestableKind::Leaper) => "leaper",
            RuleKind::Nestable(NestableKind::Leaprider) => "leaprider",
            RuleKind::Nestable(NestableKind::Catapult) => "catapult",
            RuleKind::Nestable(NestableKind::Grasshopper) => "grasshopper",
            RuleKind::Nestable(NestableKind::Leapfrog) => "leapfrog",
            RuleKind::Composite(CompositeKind::Exchange) => "exchange",
            RuleKind::Composite(CompositeKind::Retreat) => "retreat",
            RuleKind::Composite(CompositeKind::MoveCapture) => "movecapture",
            RuleKind::Composite(CompositeKind::Combination) => "combination",
        };
        write!(f, "{}", name)
    }
}
