use crate::board_info::BoardInfo;
use crate::generator::weights::*;
use crate::movement_rule::{
    all_vectors, CompositeKind, CompositeRule, LeapRange, Motion, MovementRule, NestableKind,
    NestableRule, RetreatSquares, RuleKind, VectorSet, ALL_RETREAT_SQUARES, ALL_VECTORS,
    FORWARD_VECTORS,
};
use log::warn;
use rand::seq::IndexedRandom;
use rand::Rng;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// How strong a piece type is.  Each rank draws its movement rule from its own tables.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Rank {
    Lowly,
    Minor,
    Major,
    Queen,
    King,
}

impl Rank {
    /// The movement-type table for this rank.
    pub fn kinds(&self) -> &'static WeightTable<RuleKind> {
        match *self {
            Rank::Lowly => &LOWLY_KINDS,
            Rank::Minor => &MINOR_KINDS,
            Rank::Major => &MAJOR_KINDS,
            Rank::Queen => &QUEEN_KINDS,
            Rank::King => &KING_KINDS,
        }
    }
}

/// Generate a movement rule for the piece type at `own_index`.
///
/// Lowly pieces are always pawns and kings always step once in any direction.
pub fn generate_rule<R: Rng + ?Sized>(
    rank: Rank,
    board_info: &BoardInfo,
    own_index: usize,
    rng: &mut R,
) -> MovementRule {
    match rank {
        Rank::Lowly => MovementRule::pawn(board_info),
        Rank::King => MovementRule::king(board_info),
        Rank::Minor | Rank::Major | Rank::Queen => {
            match pick_kind(rank, &[], false, rng) {
                RuleKind::Nestable(kind) => {
                    MovementRule::Nestable(generate_nestable_of(kind, rank, board_info, rng))
                }
                RuleKind::Composite(kind) => MovementRule::Composite(generate_composite(
                    kind, rank, board_info, own_index, rng,
                )),
            }
        }
    }
}

/// Generate a rule that can sit inside a composite, avoiding the kinds in `exclusions`.
pub fn generate_nestable<R: Rng + ?Sized>(
    rank: Rank,
    board_info: &BoardInfo,
    exclusions: &[RuleKind],
    rng: &mut R,
) -> NestableRule {
    match pick_kind(rank, exclusions, true, rng) {
        RuleKind::Nestable(kind) => generate_nestable_of(kind, rank, board_info, rng),
        RuleKind::Composite(_) => generate_nestable_of(NestableKind::Walker, rank, board_info, rng),
    }
}

fn pick_kind<R: Rng + ?Sized>(
    rank: Rank,
    exclusions: &[RuleKind],
    nested: bool,
    rng: &mut R,
) -> RuleKind {
    let table = rank.kinds();
    let picked = table.select_excluding(rng, |kind| {
        exclusions.contains(kind) || (nested && matches!(kind, RuleKind::Composite(_)))
    });
    match picked {
        Some(kind) => kind,
        None => {
            warn!("every option of the {} table is excluded", table.name());
            RuleKind::Nestable(NestableKind::Walker)
        }
    }
}

fn generate_nestable_of<R: Rng + ?Sized>(
    kind: NestableKind,
    rank: Rank,
    board_info: &BoardInfo,
    rng: &mut R,
) -> NestableRule {
    NestableRule::new(generate_motion(kind, rank, rng), board_info)
}

fn generate_composite<R: Rng + ?Sized>(
    kind: CompositeKind,
    rank: Rank,
    board_info: &BoardInfo,
    own_index: usize,
    rng: &mut R,
) -> CompositeRule {
    match kind {
        CompositeKind::Exchange => {
            let options: Vec<usize> = (0..board_info.num_piece_types())
                .filter(|&i| i != own_index)
                .collect();
            let with = options.choose(rng).copied().unwrap_or(own_index);
            CompositeRule::Exchange {
                with,
                regular: generate_nestable(rank, board_info, &[], rng),
            }
        }
        CompositeKind::Retreat => {
            let squares = ALL_RETREAT_SQUARES
                .choose(rng)
                .copied()
                .unwrap_or(RetreatSquares::Both);
            CompositeRule::Retreat {
                squares,
                regular: generate_nestable(rank, board_info, &[], rng),
            }
        }
        CompositeKind::MoveCapture => {
            let movement = generate_nestable(rank, board_info, &[], rng);
            let capture = generate_nestable(rank, board_info, &[movement.kind().into()], rng);
            CompositeRule::MoveCapture { movement, capture }
        }
        CompositeKind::Combination => {
            let first = generate_nestable(rank, board_info, &[], rng);
            let second = generate_nestable(rank, board_info, &[first.kind().into()], rng);
            CompositeRule::Combination { first, second }
        }
    }
}

/// Which parameter tables a rank uses for a kind its own table never draws.
fn parameter_rank(kind: NestableKind, rank: Rank) -> Rank {
    if rank.kinds().contains(RuleKind::Nestable(kind)) && rank != Rank::King {
        rank
    } else {
        Rank::Major
    }
}

/// Generate the parameters of a nestable rule.
pub fn generate_motion<R: Rng + ?Sized>(kind: NestableKind, rank: Rank, rng: &mut R) -> Motion {
    let rank = parameter_rank(kind, rank);
    match kind {
        NestableKind::Walker => {
            let (min, max) = match rank {
                Rank::Minor => {
                    let min = MINOR_WALKER_MIN.select(rng);
                    (min, min)
                }
                Rank::Queen => (1, 1 + QUEEN_WALKER_EXTRA.select(rng)),
                _ => {
                    let min = MAJOR_WALKER_MIN.select(rng);
                    (min, min + MAJOR_WALKER_EXTRA.select(rng))
                }
            };
            Motion::Walker {
                vectors: walker_vectors(rank, rng),
                min,
                max,
            }
        }
        NestableKind::Rider => Motion::Rider {
            vectors: line_vectors(rank, rng),
        },
        NestableKind::Leaper => Motion::Leaper(match rank {
            Rank::Minor => {
                let m = MINOR_LEAPER_MIN.select(rng);
                let n = MINOR_LEAPER_MIN.select(rng);
                LeapRange::fixed(m, n)
            }
            Rank::Queen => leap_range(&QUEEN_LEAPER_MIN, &QUEEN_LEAPER_EXTRA, rng),
            _ => leap_range(&MAJOR_LEAPER_MIN, &MAJOR_LEAPER_EXTRA, rng),
        }),
        NestableKind::Leaprider => Motion::Leaprider(match rank {
            Rank::Queen => leap_range(&QUEEN_LEAPRIDER_MIN, &QUEEN_LEAPRIDER_EXTRA, rng),
            _ => {
                let m = MAJOR_LEAPRIDER_MIN.select(rng);
                let n = MAJOR_LEAPRIDER_MIN.select(rng);
                LeapRange::fixed(m, n)
            }
        }),
        NestableKind::Catapult => Motion::Catapult {
            vectors: line_vectors(rank, rng),
        },
        NestableKind::Grasshopper => Motion::Grasshopper {
            vectors: line_vectors(rank, rng),
        },
        NestableKind::Leapfrog => Motion::Leapfrog {
            vectors: line_vectors(rank, rng),
            limit: LEAPFROG_LIMIT.select(rng),
        },
    }
}

fn leap_range<R: Rng + ?Sized>(
    min: &WeightTable<i32>,
    extra: &WeightTable<i32>,
    rng: &mut R,
) -> LeapRange {
    let m_min = min.select(rng);
    let m_max = m_min + extra.select(rng);
    let n_min = min.select(rng);
    let n_max = n_min + extra.select(rng);
    LeapRange::new(m_min, m_max, n_min, n_max)
}

/// Walkers draw a vector set even at queen rank.
fn walker_vectors<R: Rng + ?Sized>(rank: Rank, rng: &mut R) -> VectorSet {
    match rank {
        Rank::Minor => generate_vectors(&MINOR_VECTOR_COUNT, rng),
        _ => generate_vectors(&MAJOR_VECTOR_COUNT, rng),
    }
}

/// Queens ride, hop and leapfrog in every direction.
fn line_vectors<R: Rng + ?Sized>(rank: Rank, rng: &mut R) -> VectorSet {
    match rank {
        Rank::Queen => all_vectors(),
        _ => walker_vectors(rank, rng),
    }
}

/// Draw a vector set.  It always holds one of the forward vectors; the rest are drawn without
/// replacement.
pub fn generate_vectors<R: Rng + ?Sized>(counts: &WeightTable<usize>, rng: &mut R) -> VectorSet {
    let count = counts.select(rng);
    let mut result = VectorSet::new();

    let forward = rng.random_range(0..FORWARD_VECTORS.len());
    result.push(FORWARD_VECTORS[forward]);

    let mut remaining: Vec<_> = ALL_VECTORS
        .iter()
        .copied()
        .filter(|v| *v != FORWARD_VECTORS[forward])
        .collect();
    while result.len() < count && !remaining.is_empty() {
        let i = rng.random_range(0..remaining.len());
        result.push(remaining.remove(i));
    }
    result
}
