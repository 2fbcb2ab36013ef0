use crate::movement_rule::MovementRule;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// How one kind of piece moves, and what it is called.
///
/// A royal piece must not be left in check; a side with no royal pieces on the board can
/// never be checkmated.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct PieceType {
    movement_rule: MovementRule,
    name: String,
    icon: String,
    royal: bool,
}

impl PieceType {
    pub fn new(movement_rule: MovementRule, name: &str, icon: &str, royal: bool) -> PieceType {
        PieceType {
            movement_rule,
            name: name.to_owned(),
            icon: icon.to_owned(),
            royal,
        }
    }

    #[inline]
    pub fn movement_rule(&self) -> &MovementRule {
        &self.movement_rule
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Which picture to draw the piece with.  This is one of the six orthodox piece names.
    #[inline]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    #[inline]
    pub fn is_royal(&self) -> bool {
        self.royal
    }

    /// The letter used for this piece type in move notation, if any.
    ///
    /// ```
    /// use fairy_chess::{BoardInfo, MovementRule, PieceType};
    ///
    /// let info = BoardInfo::default();
    /// let knight = PieceType::new(MovementRule::king(&info), "Knight", "Knight", false);
    /// assert_eq!(knight.notation_letter(), Some('N'));
    /// let pawn = PieceType::new(MovementRule::pawn(&info), "Pawn", "Pawn", false);
    /// assert_eq!(pawn.notation_letter(), None);
    /// ```
    pub fn notation_letter(&self) -> Option<char> {
        match self.icon.as_str() {
            "Pawn" => None,
            "Knight" => Some('N'),
            _ => self.name.chars().next().map(|c| c.to_ascii_uppercase()),
        }
    }
}
