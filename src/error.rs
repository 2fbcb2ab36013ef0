use crate::location::Location;
use failure::Fail;

/// Sometimes, bad stuff happens.
#[derive(Debug, Fail, PartialEq)]
pub enum Error {
    /// The board dimensions cannot hold a game
    #[fail(
        display = "Invalid board info: {} rows, {} columns, {} piece types",
        num_rows, num_cols, num_piece_types
    )]
    InvalidBoardInfo {
        num_rows: usize,
        num_cols: usize,
        num_piece_types: usize,
    },

    /// The string could not be parsed as a location (such as `e4`)
    #[fail(display = "Invalid location: {}", text)]
    InvalidLocation { text: String },

    /// A piece was placed off the board
    #[fail(display = "Location {} is out of bounds", location)]
    OutOfBounds { location: Location },

    /// A stored board does not have one square per location
    #[fail(display = "Expected {} squares, but the board has {}", expected, found)]
    SquareCount { expected: usize, found: usize },

    /// A stored piece disagrees with the square holding it
    #[fail(display = "The piece on {} claims to be on {}", square, claimed)]
    MisplacedPiece { square: Location, claimed: Location },

    /// The layout string is not understood
    #[fail(display = "Invalid layout: {}", layout)]
    InvalidLayout { layout: String },

    /// A piece refers to a piece type the game does not have
    #[fail(display = "Unknown piece type index {}", index)]
    UnknownPieceType { index: usize },

    /// The game has a different number of piece types than its board expects
    #[fail(
        display = "Expected {} piece types, but {} were given",
        expected, found
    )]
    PieceTypeCount { expected: usize, found: usize },

    /// The starting layout is only defined for some board widths
    #[fail(display = "No starting layout for a board with {} columns", num_cols)]
    UnsupportedLayout { num_cols: usize },

    /// A weighted table does not add up to 1
    #[fail(display = "The {} table adds up to {}, not 1", table, sum)]
    InvalidWeights { table: &'static str, sum: f64 },

    /// The game already ended in checkmate or stalemate
    #[fail(display = "The game is already over")]
    GameOver,

    /// The player is not part of this game
    #[fail(display = "{} is not playing this game", player)]
    UnknownPlayer { player: String },

    /// A player tried to move on the opponent's turn
    #[fail(display = "It is not {}'s turn to move", player)]
    NotYourTurn { player: String },

    /// The move was submitted against a state other than the current one
    #[fail(
        display = "Move submitted for state {}, but the current state is {}",
        submitted, current
    )]
    StaleMoveIndex { submitted: usize, current: usize },

    /// The move is not legal in the current state
    #[fail(display = "The move is not legal")]
    IllegalMove,
}
