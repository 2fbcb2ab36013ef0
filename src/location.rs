use crate::error::Error;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg};
use std::str::FromStr;

/// A square on the board, as a row and a column.  Row 0 is White's back rank and column 0 is
/// the `a` file.
///
/// Locations are plain values: two locations are equal when their rows and columns are.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Location {
    pub row: i32,
    pub col: i32,
}

/// A displacement between two locations.
///
/// Movement rules describe single steps with components in `-1..=1`, but expanded leaper
/// paths carry the whole leap in one vector.
pub type Vector = Location;

impl Location {
    /// Make a location from a row and a column.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Location {
        Location { row, col }
    }

    /// The same displacement, pointing the other way along the rows.  This is how a
    /// White path becomes a Black one.
    #[inline]
    pub fn flip_vertical(&self) -> Location {
        Location::new(-self.row, self.col)
    }

    /// The same displacement, mirrored left to right.
    #[inline]
    pub fn flip_horizontal(&self) -> Location {
        Location::new(self.row, -self.col)
    }

    /// Swap rows and columns.
    #[inline]
    pub fn transpose(&self) -> Location {
        Location::new(self.col, self.row)
    }

    /// Is this the zero displacement?
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.row == 0 && self.col == 0
    }

    /// Is this a dark ("black") square?  `a1` is dark.
    #[inline]
    pub fn is_dark_square(&self) -> bool {
        (self.row + self.col).rem_euclid(2) == 0
    }
}

impl Add for Location {
    type Output = Location;

    #[inline]
    fn add(self, other: Location) -> Location {
        Location::new(self.row + other.row, self.col + other.col)
    }
}

impl Mul<i32> for Location {
    type Output = Location;

    #[inline]
    fn mul(self, factor: i32) -> Location {
        Location::new(self.row * factor, self.col * factor)
    }
}

impl Neg for Location {
    type Output = Location;

    #[inline]
    fn neg(self) -> Location {
        Location::new(-self.row, -self.col)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if (0..26).contains(&self.col) && self.row >= 0 {
            write!(f, "{}{}", (b'a' + self.col as u8) as char, self.row + 1)
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

impl FromStr for Location {
    type Err = Error;

    /// Parse algebraic notation, such as `e4` or `b12`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidLocation {
            text: s.to_owned(),
        };
        let mut chars = s.chars();
        let file = chars.next().ok_or_else(invalid)?;
        if !file.is_ascii_lowercase() {
            return Err(invalid());
        }
        let rank: i32 = chars.as_str().parse().map_err(|_| invalid())?;
        if rank < 1 {
            return Err(invalid());
        }
        Ok(Location::new(rank - 1, (file as u8 - b'a') as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let e4 = Location::from_str("e4").expect("valid location");
        assert_eq!(e4, Location::new(3, 4));
        assert_eq!(e4.to_string(), "e4");
        assert_eq!(Location::new(11, 1).to_string(), "b12");
        assert_eq!(Location::from_str("b12"), Ok(Location::new(11, 1)));
    }

    #[test]
    fn invalid_locations() {
        assert!(Location::from_str("").is_err());
        assert!(Location::from_str("e").is_err());
        assert!(Location::from_str("E4").is_err());
        assert!(Location::from_str("e0").is_err());
        assert!(Location::from_str("e-1").is_err());
    }

    #[test]
    fn arithmetic() {
        let a = Location::new(1, 2);
        assert_eq!(a + Location::new(-1, 3), Location::new(0, 5));
        assert_eq!(a * 3, Location::new(3, 6));
        assert_eq!(a.flip_vertical(), Location::new(-1, 2));
        assert_eq!(a.flip_horizontal(), Location::new(1, -2));
        assert_eq!(a.transpose(), Location::new(2, 1));
        assert!(Location::new(0, 0).is_dark_square());
        assert!(!Location::new(0, 1).is_dark_square());
    }
}
