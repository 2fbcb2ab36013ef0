//! Expanding a nestable rule into the paths a White piece can follow.
//!
//! Every path is a sequence of displacements from the piece's square.  The board is not
//! consulted beyond its size; whether a path can actually be taken is up to the movement
//! controllers.

use crate::board_info::BoardInfo;
use crate::location::{Location, Vector};
use crate::movement_rule::{LeapRange, Motion, Path};

/// All paths for a White piece moving by `motion`.
pub fn expand(motion: &Motion, board_info: &BoardInfo) -> Vec<Path> {
    let max_distance = board_info.max_distance();
    match *motion {
        Motion::Walker {
            ref vectors,
            min,
            max,
        } => walker_paths(&mirrored(vectors), min, max),
        Motion::Rider { ref vectors } => line_paths(&mirrored(vectors), 1..=max_distance),
        Motion::Leaper(range) => leaps(range, board_info)
            .into_iter()
            .map(|leap| vec![leap])
            .collect(),
        Motion::Leaprider(range) => leaprider_paths(range, board_info),
        Motion::Catapult { ref vectors } | Motion::Grasshopper { ref vectors } => {
            line_paths(&mirrored(vectors), 2..=max_distance)
        }
        Motion::Leapfrog { ref vectors, limit } => {
            let lengths = (1..=limit).map(|hops| hops * 2).filter(|&l| l <= max_distance);
            let seeds = mirrored(vectors);
            lengths
                .flat_map(|len| seeds.iter().map(move |seed| vec![*seed; len]))
                .collect()
        }
    }
}

/// The same paths, for the other side of the board.
pub fn flip_vertical(paths: &[Path]) -> Vec<Path> {
    paths
        .iter()
        .map(|path| path.iter().map(|step| step.flip_vertical()).collect())
        .collect()
}

/// The vectors plus their left-right mirrors, without repeats.
fn mirrored(vectors: &[Vector]) -> Vec<Vector> {
    let mut result: Vec<Vector> = Vec::with_capacity(vectors.len() * 2);
    for v in vectors.iter().flat_map(|v| vec![*v, v.flip_horizontal()]) {
        if !result.contains(&v) {
            result.push(v);
        }
    }
    result
}

/// Every sequence of `min..=max` steps drawn from `seeds`.
fn walker_paths(seeds: &[Vector], min: usize, max: usize) -> Vec<Path> {
    let mut result = vec![];
    let mut layer: Vec<Path> = vec![vec![]];
    for len in 1..=max {
        layer = layer
            .iter()
            .flat_map(|prefix| {
                seeds.iter().map(move |seed| {
                    let mut path = prefix.clone();
                    path.push(*seed);
                    path
                })
            })
            .collect();
        if len >= min {
            result.extend(layer.iter().cloned());
        }
    }
    result
}

/// Each seed repeated once for every length in `lengths`.
fn line_paths(seeds: &[Vector], lengths: std::ops::RangeInclusive<usize>) -> Vec<Path> {
    seeds
        .iter()
        .flat_map(|seed| lengths.clone().map(move |len| vec![*seed; len]))
        .collect()
}

/// Every distinct non-zero leap in `range` that fits on the board.
fn leaps(range: LeapRange, board_info: &BoardInfo) -> Vec<Vector> {
    let mut result: Vec<Vector> = vec![];
    for m in range.m_min..=range.m_max {
        for n in range.n_min..=range.n_max {
            let base = Location::new(n, m);
            for leap in [base, base.transpose()].iter() {
                for &(row_sign, col_sign) in [(1, 1), (1, -1), (-1, 1), (-1, -1)].iter() {
                    let v = Location::new(leap.row * row_sign, leap.col * col_sign);
                    if !v.is_zero() && fits(v, board_info) && !result.contains(&v) {
                        result.push(v);
                    }
                }
            }
        }
    }
    result
}

fn leaprider_paths(range: LeapRange, board_info: &BoardInfo) -> Vec<Path> {
    let mut result = vec![];
    for leap in leaps(range, board_info) {
        let mut len = 1;
        while fits(leap * len as i32, board_info) {
            result.push(vec![leap; len]);
            len += 1;
        }
    }
    result
}

/// Could a piece somewhere on the board be displaced by `v` and stay on it?
fn fits(v: Vector, board_info: &BoardInfo) -> bool {
    (v.row.abs() as usize) < board_info.num_rows() && (v.col.abs() as usize) < board_info.num_cols()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement_rule::{all_vectors, VectorSet};

    fn vectors(list: &[Vector]) -> VectorSet {
        list.iter().copied().collect()
    }

    #[test]
    fn walker_one_step_is_one_path_per_direction() {
        let motion = Motion::Walker {
            vectors: all_vectors(),
            min: 1,
            max: 1,
        };
        let paths = expand(&motion, &BoardInfo::default());
        assert_eq!(paths.len(), 8);
        assert!(paths.iter().all(|p| p.len() == 1));
    }

    #[test]
    fn walker_paths_are_not_uniform() {
        let motion = Motion::Walker {
            vectors: vectors(&[Location::new(1, 0), Location::new(0, 1)]),
            min: 2,
            max: 2,
        };
        let paths = expand(&motion, &BoardInfo::default());
        // three seeds: up, right, left
        assert_eq!(paths.len(), 9);
        assert!(paths.contains(&vec![Location::new(1, 0), Location::new(0, 1)]));
        assert!(paths.contains(&vec![Location::new(0, -1), Location::new(0, 1)]));
    }

    #[test]
    fn rider_rides_the_whole_board() {
        let motion = Motion::Rider {
            vectors: vectors(&[Location::new(1, 0)]),
        };
        let paths = expand(&motion, &BoardInfo::default());
        assert_eq!(paths.len(), 7);
        assert_eq!(paths[6], vec![Location::new(1, 0); 7]);
    }

    #[test]
    fn knight_leaps() {
        let paths = expand(&Motion::Leaper(LeapRange::fixed(1, 2)), &BoardInfo::default());
        assert_eq!(paths.len(), 8);
        assert!(paths.contains(&vec![Location::new(2, 1)]));
        assert!(paths.contains(&vec![Location::new(-1, -2)]));
    }

    #[test]
    fn degenerate_leaps() {
        // (0, 1) gives the four orthogonal steps, and (0, 0) is dropped.
        let paths = expand(&Motion::Leaper(LeapRange::new(0, 0, 0, 1)), &BoardInfo::default());
        assert_eq!(paths.len(), 4);
        assert!(!paths.contains(&vec![Location::new(0, 0)]));
    }

    #[test]
    fn leaprider_repeats_while_it_fits() {
        let paths = expand(&Motion::Leaprider(LeapRange::fixed(1, 2)), &BoardInfo::default());
        // (2, 1) fits 3 times on an 8x8 board.
        assert!(paths.contains(&vec![Location::new(2, 1); 3]));
        assert!(!paths.contains(&vec![Location::new(2, 1); 4]));
        assert!(paths.iter().all(|p| !p.is_empty()));
    }

    #[test]
    fn hopping_lengths() {
        let info = BoardInfo::default();
        let up = vectors(&[Location::new(1, 0)]);
        let catapult = expand(&Motion::Catapult { vectors: up.clone() }, &info);
        assert_eq!(catapult.iter().map(|p| p.len()).min(), Some(2));
        assert_eq!(catapult.len(), 6);

        let leapfrog = expand(
            &Motion::Leapfrog {
                vectors: up,
                limit: 3,
            },
            &info,
        );
        let lengths: Vec<usize> = leapfrog.iter().map(|p| p.len()).collect();
        assert_eq!(lengths, vec![2, 4, 6]);
    }
}
