use crate::board::Board;
use crate::location::{Location, Vector};
use crate::movement_rule::{NestableKind, NestableRule};
use crate::piece::Piece;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// What a controller says about one step of a path.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Directive {
    /// Keep going, and the piece may stop here if the path ends.
    Continue,
    /// The piece may stop here, but the path must end here.
    StopHereInclusive,
    /// The piece can neither stop here nor go on.
    StopHereExclusive,
    /// The piece may pass through here but not stop.
    ContinueNoStop,
}

/// The capture policy a composite rule puts on a nested one.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Mood {
    Regular,
    MoveOnly,
    CaptureOnly,
}

impl Mood {
    /// May the piece end on an empty square?
    #[inline]
    pub fn can_move(&self) -> bool {
        *self != Mood::CaptureOnly
    }

    /// May the piece end on an enemy piece?
    #[inline]
    pub fn can_capture(&self) -> bool {
        *self != Mood::MoveOnly
    }

    #[inline]
    fn on_empty(&self) -> Directive {
        if self.can_move() {
            Directive::Continue
        } else {
            Directive::ContinueNoStop
        }
    }
}

/// Decides, one step at a time, how a piece may travel along a path.
///
/// `Carry` is whatever the controller needs to remember between steps of a single path; it
/// starts at its default value for every path.
pub trait Controller {
    type Carry: Default + Copy;

    fn control(
        &self,
        board: &Board,
        piece: &Piece,
        step: Location,
        carry: Self::Carry,
    ) -> (Directive, Self::Carry);
}

/// Walkers and riders: blocked by everything, capture by stopping on an enemy.
pub struct RegularController(pub Mood);

/// Leapers and leapriders: only the landing square matters.
pub struct LeapController(pub Mood);

/// Needs a piece on the first step, then rides like a regular piece.
pub struct CatapultController(pub Mood);

/// Rides until it meets a piece, then lands on the square just past it.
pub struct GrasshopperController(pub Mood);

/// Hops over an adjacent piece on every other step.
pub struct LeapfrogController(pub Mood);

fn regular(mood: Mood, board: &Board, piece: &Piece, step: Location) -> Directive {
    match board.piece_on(step) {
        None => mood.on_empty(),
        Some(other) if other.color() == piece.color() => Directive::StopHereExclusive,
        Some(_) if mood.can_capture() => Directive::StopHereInclusive,
        Some(_) => Directive::StopHereExclusive,
    }
}

impl Controller for RegularController {
    type Carry = ();

    fn control(&self, board: &Board, piece: &Piece, step: Location, _: ()) -> (Directive, ()) {
        (regular(self.0, board, piece, step), ())
    }
}

impl Controller for LeapController {
    type Carry = ();

    fn control(&self, board: &Board, piece: &Piece, step: Location, _: ()) -> (Directive, ()) {
        let directive = match board.piece_on(step) {
            None => self.0.on_empty(),
            Some(other) if other.color() == piece.color() => Directive::ContinueNoStop,
            Some(_) if self.0.can_capture() => Directive::Continue,
            Some(_) => Directive::ContinueNoStop,
        };
        (directive, ())
    }
}

impl Controller for CatapultController {
    /// Has the piece been launched yet?
    type Carry = bool;

    fn control(
        &self,
        board: &Board,
        piece: &Piece,
        step: Location,
        launched: bool,
    ) -> (Directive, bool) {
        if launched {
            (regular(self.0, board, piece, step), true)
        } else if board.piece_on(step).is_some() {
            (Directive::ContinueNoStop, true)
        } else {
            (Directive::StopHereExclusive, false)
        }
    }
}

impl Controller for GrasshopperController {
    /// Has the piece hopped over something yet?
    type Carry = bool;

    fn control(
        &self,
        board: &Board,
        piece: &Piece,
        step: Location,
        hopped: bool,
    ) -> (Directive, bool) {
        let occupant = board.piece_on(step);
        if !hopped {
            return (Directive::ContinueNoStop, occupant.is_some());
        }
        let directive = match occupant {
            None if self.0.can_move() => Directive::StopHereInclusive,
            Some(other) if other.color() != piece.color() && self.0.can_capture() => {
                Directive::StopHereInclusive
            }
            _ => Directive::StopHereExclusive,
        };
        (directive, true)
    }
}

impl Controller for LeapfrogController {
    /// How many steps have been taken before this one.
    type Carry = usize;

    fn control(
        &self,
        board: &Board,
        piece: &Piece,
        step: Location,
        taken: usize,
    ) -> (Directive, usize) {
        let occupant = board.piece_on(step);
        let directive = if taken % 2 == 0 {
            match occupant {
                Some(_) => Directive::ContinueNoStop,
                None => Directive::StopHereExclusive,
            }
        } else {
            match occupant {
                None => self.0.on_empty(),
                Some(other) if other.color() == piece.color() => Directive::StopHereExclusive,
                Some(_) if self.0.can_capture() => Directive::StopHereInclusive,
                Some(_) => Directive::StopHereExclusive,
            }
        };
        (directive, taken + 1)
    }
}

/// Follow `path` from the piece's square, asking `controller` about every step.  Returns the
/// square the piece ends on, or `None` if it may not take this path.
pub fn walk_path<C: Controller>(
    controller: &C,
    board: &Board,
    piece: &Piece,
    path: &[Vector],
) -> Option<Location> {
    let last = path.len().checked_sub(1)?;
    let mut loc = piece.location();
    let mut carry = C::Carry::default();

    for (i, step) in path.iter().enumerate() {
        loc = loc + *step;
        if !board.in_bounds(loc) {
            return None;
        }
        let (directive, next) = controller.control(board, piece, loc, carry);
        carry = next;
        match directive {
            Directive::Continue => {}
            Directive::StopHereExclusive => return None,
            Directive::StopHereInclusive if i != last => return None,
            Directive::StopHereInclusive => {}
            Directive::ContinueNoStop if i == last => return None,
            Directive::ContinueNoStop => {}
        }
    }

    Some(loc)
}

fn walk_all<C: Controller>(
    controller: &C,
    rule: &NestableRule,
    board: &Board,
    piece: &Piece,
) -> Vec<Location> {
    rule.paths(piece.color())
        .iter()
        .filter_map(|path| walk_path(controller, board, piece, path))
        .collect()
}

/// Every square `piece` can reach by `rule` under `mood`, in path order.  Squares reachable
/// by more than one path appear more than once.
pub fn destinations(
    rule: &NestableRule,
    mood: Mood,
    board: &Board,
    piece: &Piece,
) -> Vec<Location> {
    match rule.kind() {
        NestableKind::Walker | NestableKind::Rider => {
            walk_all(&RegularController(mood), rule, board, piece)
        }
        NestableKind::Leaper | NestableKind::Leaprider => {
            walk_all(&LeapController(mood), rule, board, piece)
        }
        NestableKind::Catapult => walk_all(&CatapultController(mood), rule, board, piece),
        NestableKind::Grasshopper => walk_all(&GrasshopperController(mood), rule, board, piece),
        NestableKind::Leapfrog => walk_all(&LeapfrogController(mood), rule, board, piece),
    }
}
