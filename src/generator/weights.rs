use crate::error::Error;
use crate::movement_rule::{CompositeKind, NestableKind, RuleKind};
use log::warn;
use rand::Rng;

/// How far a table may drift from adding up to 1 before it is reported.
pub const WEIGHT_TOLERANCE: f64 = 1e-4;

/// Options with the probability of picking each one.  The weights should add up to 1.
#[derive(Copy, Clone, Debug)]
pub struct WeightTable<T: 'static> {
    name: &'static str,
    options: &'static [(T, f64)],
}

impl<T: Copy + PartialEq> WeightTable<T> {
    pub const fn new(name: &'static str, options: &'static [(T, f64)]) -> WeightTable<T> {
        WeightTable { name, options }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn options(&self) -> &'static [(T, f64)] {
        self.options
    }

    /// Is `value` one of the options?
    pub fn contains(&self, value: T) -> bool {
        self.options.iter().any(|&(option, _)| option == value)
    }

    pub fn sum(&self) -> f64 {
        self.options.iter().map(|&(_, weight)| weight).sum()
    }

    /// Check that the weights add up to 1.
    pub fn validate(&self) -> Result<(), Error> {
        let sum = self.sum();
        if (sum - 1.0).abs() >= WEIGHT_TOLERANCE {
            Err(Error::InvalidWeights {
                table: self.name,
                sum,
            })
        } else {
            Ok(())
        }
    }

    /// Pick an option at random.  If the weights fall short of 1 and the draw lands past
    /// the last option, the first option is picked.
    ///
    /// # Panics
    ///
    /// Panics if the table has no options.
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.select_excluding(rng, |_| false)
            .unwrap_or(self.options[0].0)
    }

    /// Pick an option at random, leaving out the options `excluded` rejects.  The remaining
    /// weights keep their proportions.  Returns `None` when every option is excluded.
    pub fn select_excluding<R, F>(&self, rng: &mut R, excluded: F) -> Option<T>
    where
        R: Rng + ?Sized,
        F: Fn(&T) -> bool,
    {
        if cfg!(debug_assertions) {
            if let Err(e) = self.validate() {
                warn!("{}", e);
            }
        }

        let allowed: Vec<(T, f64)> = self
            .options
            .iter()
            .filter(|(option, _)| !excluded(option))
            .copied()
            .collect();
        let first = allowed.first()?.0;

        // with nothing left out the draw is taken against 1, not against the table's sum
        let mut target = rng.random::<f64>();
        if allowed.len() < self.options.len() {
            target *= allowed.iter().map(|&(_, weight)| weight).sum::<f64>();
        }

        let mut running = 0.0;
        for &(option, weight) in allowed.iter() {
            running += weight;
            if target < running {
                return Some(option);
            }
        }

        Some(first)
    }
}

const fn nestable(kind: NestableKind) -> RuleKind {
    RuleKind::Nestable(kind)
}

const fn composite(kind: CompositeKind) -> RuleKind {
    RuleKind::Composite(kind)
}

pub const LOWLY_KINDS: WeightTable<RuleKind> = WeightTable::new(
    "lowly movement type",
    &[(composite(CompositeKind::MoveCapture), 1.0)],
);

pub const MINOR_KINDS: WeightTable<RuleKind> = WeightTable::new(
    "minor movement type",
    &[
        (nestable(NestableKind::Walker), 0.1),
        (nestable(NestableKind::Rider), 0.3),
        (nestable(NestableKind::Leaper), 0.3),
        (composite(CompositeKind::Exchange), 0.05),
        (composite(CompositeKind::Retreat), 0.05),
        (composite(CompositeKind::MoveCapture), 0.15),
        (composite(CompositeKind::Combination), 0.05),
    ],
);

pub const MAJOR_KINDS: WeightTable<RuleKind> = WeightTable::new(
    "major movement type",
    &[
        (nestable(NestableKind::Walker), 0.1),
        (nestable(NestableKind::Rider), 0.2),
        (nestable(NestableKind::Leaper), 0.15),
        (nestable(NestableKind::Leaprider), 0.05),
        (composite(CompositeKind::Exchange), 0.05),
        (composite(CompositeKind::Retreat), 0.05),
        (nestable(NestableKind::Catapult), 0.05),
        (nestable(NestableKind::Grasshopper), 0.05),
        (nestable(NestableKind::Leapfrog), 0.1),
        (composite(CompositeKind::MoveCapture), 0.15),
        (composite(CompositeKind::Combination), 0.05),
    ],
);

pub const QUEEN_KINDS: WeightTable<RuleKind> = WeightTable::new(
    "queen movement type",
    &[
        (nestable(NestableKind::Walker), 0.25),
        (nestable(NestableKind::Rider), 0.3),
        (nestable(NestableKind::Leaper), 0.2),
        (nestable(NestableKind::Leaprider), 0.1),
        (composite(CompositeKind::Exchange), 0.05),
        (nestable(NestableKind::Catapult), 0.03),
        (nestable(NestableKind::Grasshopper), 0.03),
        (nestable(NestableKind::Leapfrog), 0.04),
    ],
);

pub const KING_KINDS: WeightTable<RuleKind> =
    WeightTable::new("king movement type", &[(nestable(NestableKind::Walker), 1.0)]);

pub const MINOR_VECTOR_COUNT: WeightTable<usize> = WeightTable::new(
    "minor number of vectors",
    &[(2, 0.1), (3, 0.5), (4, 0.3), (5, 0.1)],
);

pub const MAJOR_VECTOR_COUNT: WeightTable<usize> =
    WeightTable::new("major number of vectors", &[(3, 0.2), (4, 0.4), (5, 0.4)]);

pub const MINOR_WALKER_MIN: WeightTable<usize> =
    WeightTable::new("minor walker min", &[(1, 0.8), (2, 0.2)]);

pub const MAJOR_WALKER_MIN: WeightTable<usize> =
    WeightTable::new("major walker min", &[(1, 0.7), (2, 0.3)]);

pub const MAJOR_WALKER_EXTRA: WeightTable<usize> =
    WeightTable::new("major walker max", &[(0, 0.5), (1, 0.5)]);

pub const QUEEN_WALKER_EXTRA: WeightTable<usize> =
    WeightTable::new("queen walker max", &[(0, 0.3), (1, 0.4), (2, 0.3)]);

pub const MINOR_LEAPER_MIN: WeightTable<i32> =
    WeightTable::new("minor leaper min", &[(1, 0.3), (2, 0.5), (3, 0.2)]);

pub const MAJOR_LEAPER_MIN: WeightTable<i32> =
    WeightTable::new("major leaper min", &[(1, 0.3), (2, 0.4), (3, 0.3)]);

pub const MAJOR_LEAPER_EXTRA: WeightTable<i32> =
    WeightTable::new("major leaper max", &[(0, 0.4), (1, 0.4), (2, 0.2)]);

pub const QUEEN_LEAPER_MIN: WeightTable<i32> =
    WeightTable::new("queen leaper min", &[(0, 0.5), (1, 0.5)]);

pub const QUEEN_LEAPER_EXTRA: WeightTable<i32> =
    WeightTable::new("queen leaper max", &[(1, 0.3), (2, 0.4), (3, 0.3)]);

pub const MAJOR_LEAPRIDER_MIN: WeightTable<i32> =
    WeightTable::new("major leaprider min", &[(1, 0.3), (2, 0.4), (3, 0.3)]);

pub const QUEEN_LEAPRIDER_MIN: WeightTable<i32> =
    WeightTable::new("queen leaprider min", &[(1, 0.5), (2, 0.5)]);

pub const QUEEN_LEAPRIDER_EXTRA: WeightTable<i32> =
    WeightTable::new("queen leaprider max", &[(0, 0.3), (1, 0.4), (2, 0.3)]);

pub const LEAPFROG_LIMIT: WeightTable<usize> = WeightTable::new(
    "leapfrog limit",
    &[(1, 0.05), (2, 0.25), (3, 0.65), (4, 0.05)],
);

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn every_table_adds_up() {
        for table in [LOWLY_KINDS, MINOR_KINDS, MAJOR_KINDS, QUEEN_KINDS, KING_KINDS].iter() {
            assert_eq!(table.validate(), Ok(()), "{}", table.name());
        }
        for table in [
            MINOR_VECTOR_COUNT,
            MAJOR_VECTOR_COUNT,
            MINOR_WALKER_MIN,
            MAJOR_WALKER_MIN,
            MAJOR_WALKER_EXTRA,
            QUEEN_WALKER_EXTRA,
            LEAPFROG_LIMIT,
        ]
        .iter()
        {
            assert_eq!(table.validate(), Ok(()), "{}", table.name());
        }
        for table in [
            MINOR_LEAPER_MIN,
            MAJOR_LEAPER_MIN,
            MAJOR_LEAPER_EXTRA,
            QUEEN_LEAPER_MIN,
            QUEEN_LEAPER_EXTRA,
            MAJOR_LEAPRIDER_MIN,
            QUEEN_LEAPRIDER_MIN,
            QUEEN_LEAPRIDER_EXTRA,
        ]
        .iter()
        {
            assert_eq!(table.validate(), Ok(()), "{}", table.name());
        }
    }

    #[test]
    fn bad_tables_are_reported() {
        const LOPSIDED: WeightTable<usize> = WeightTable::new("lopsided", &[(1, 0.5), (2, 0.3)]);
        match LOPSIDED.validate() {
            Err(Error::InvalidWeights { table, sum }) => {
                assert_eq!(table, "lopsided");
                assert!((sum - 0.8).abs() < 1e-9);
            }
            other => panic!("expected invalid weights, got {:?}", other),
        }
        // draws past 0.8 fall back to the first option
        let mut rng = StdRng::seed_from_u64(0);
        let draws = 20_000;
        let ones = (0..draws)
            .filter(|_| LOPSIDED.select(&mut rng) == 1)
            .count();
        let share = ones as f64 / draws as f64;
        assert!((share - 0.7).abs() < 0.02, "share was {}", share);
    }

    #[test]
    fn exclusion_renormalizes_what_is_left() {
        // leaving out 2 of a 0.8-sum table leaves 1 and 3 in a 0.5 : 0.2 ratio
        const DRIFTED: WeightTable<usize> =
            WeightTable::new("drifted", &[(1, 0.5), (2, 0.1), (3, 0.2)]);
        let mut rng = StdRng::seed_from_u64(2);
        let draws = 20_000;
        let mut ones = 0;
        for _ in 0..draws {
            match DRIFTED.select_excluding(&mut rng, |&o| o == 2) {
                Some(1) => ones += 1,
                Some(3) => {}
                other => panic!("unexpected pick {:?}", other),
            }
        }
        let share = ones as f64 / draws as f64;
        assert!((share - 0.5 / 0.7).abs() < 0.02, "share was {}", share);
    }

    #[test]
    fn exclusion_only_picks_what_is_left() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..200 {
            let kind = MAJOR_KINDS
                .select_excluding(&mut rng, |k| {
                    matches!(k, RuleKind::Composite(_))
                        || *k == RuleKind::Nestable(NestableKind::Rider)
                })
                .expect("nestable kinds remain");
            assert!(matches!(kind, RuleKind::Nestable(_)));
            assert_ne!(kind, RuleKind::Nestable(NestableKind::Rider));
        }
        assert_eq!(LOWLY_KINDS.select_excluding(&mut rng, |_| true), None);
    }

    #[test]
    fn selection_follows_the_weights() {
        let mut rng = StdRng::seed_from_u64(8);
        let draws = 10_000;
        let ones = (0..draws)
            .filter(|_| MINOR_WALKER_MIN.select(&mut rng) == 1)
            .count();
        let share = ones as f64 / draws as f64;
        assert!((share - 0.8).abs() < 0.03, "share was {}", share);
    }
}
