use crate::board::Board;
use crate::board_info::{BoardInfo, NUM_PIECE_TYPES};
use crate::color::ALL_COLORS;
use crate::error::Error;
use crate::generator::rules::{generate_rule, Rank};
use crate::location::{Location, Vector};
use crate::movement_rule::{
    all_vectors, LeapRange, Motion, MovementRule, NestableRule, VectorSet,
};
use crate::piece::Piece;
use crate::piece_type::PieceType;
use rand::Rng;

/// Name and rank of every piece type, by type index.
pub const PIECE_TABLE: [(&str, Rank); NUM_PIECE_TYPES] = [
    ("Pawn", Rank::Lowly),
    ("Rook", Rank::Major),
    ("Knight", Rank::Minor),
    ("Bishop", Rank::Minor),
    ("Queen", Rank::Queen),
    ("King", Rank::King),
];

/// The type index of the lowly piece that fills the second row.
pub const PAWN_INDEX: usize = 0;

/// Type indices along the back row, from the `a` file.
pub const BACK_ROW: [usize; 8] = [1, 2, 3, 4, 5, 3, 2, 1];

/// How likely a generated queen is to be royal.
pub const ROYAL_QUEEN_CHANCE: f64 = 0.3;

/// Generate a fresh set of piece types.
///
/// Only the pawn and king keep their usual moves; everything else is drawn from its rank's
/// tables.  The result is the same for the same random numbers.
pub fn generate_piece_types<R: Rng + ?Sized>(
    board_info: &BoardInfo,
    rng: &mut R,
) -> Vec<PieceType> {
    PIECE_TABLE
        .iter()
        .enumerate()
        .map(|(index, &(name, rank))| {
            let rule = generate_rule(rank, board_info, index, rng);
            let royal = match rank {
                Rank::King => true,
                Rank::Queen => rng.random::<f64>() >= 1.0 - ROYAL_QUEEN_CHANCE,
                Rank::Lowly | Rank::Minor | Rank::Major => false,
            };
            PieceType::new(rule, name, name, royal)
        })
        .collect()
}

/// The orthodox chess pieces, minus castling, double steps, en passant and promotion.
pub fn orthodox_piece_types(board_info: &BoardInfo) -> Vec<PieceType> {
    let rider = |vectors: &[Vector]| {
        MovementRule::Nestable(NestableRule::new(
            Motion::Rider {
                vectors: vectors.iter().copied().collect::<VectorSet>(),
            },
            board_info,
        ))
    };
    let orthogonal = [Location::new(1, 0), Location::new(0, 1), Location::new(-1, 0)];
    let diagonal = [Location::new(1, 1), Location::new(-1, 1)];
    let knight = MovementRule::Nestable(NestableRule::new(
        Motion::Leaper(LeapRange::fixed(1, 2)),
        board_info,
    ));
    let queen = MovementRule::Nestable(NestableRule::new(
        Motion::Rider {
            vectors: all_vectors(),
        },
        board_info,
    ));

    vec![
        PieceType::new(MovementRule::pawn(board_info), "Pawn", "Pawn", false),
        PieceType::new(rider(&orthogonal), "Rook", "Rook", false),
        PieceType::new(knight, "Knight", "Knight", false),
        PieceType::new(rider(&diagonal), "Bishop", "Bishop", false),
        PieceType::new(queen, "Queen", "Queen", false),
        PieceType::new(MovementRule::king(board_info), "King", "King", true),
    ]
}

fn place_starting_rows(board: &mut Board) {
    let info = *board.info();
    for &color in ALL_COLORS.iter() {
        let back = color.home_row(&info);
        let second = color.second_row(&info);
        for (col, &type_index) in BACK_ROW.iter().enumerate() {
            let col = col as i32;
            board.set(
                Location::new(back, col),
                Some(Piece::new(Location::new(back, col), color, type_index)),
            );
            board.set(
                Location::new(second, col),
                Some(Piece::new(Location::new(second, col), color, PAWN_INDEX)),
            );
        }
    }
}

/// The starting position: back rows on the edges, a row of pawns in front of each.
///
/// Only boards with eight columns have a starting layout.
pub fn starting_board(board_info: &BoardInfo) -> Result<Board, Error> {
    if board_info.num_cols() != BACK_ROW.len() {
        return Err(Error::UnsupportedLayout {
            num_cols: board_info.num_cols(),
        });
    }
    if let Some(&index) = BACK_ROW.iter().find(|&&i| i >= board_info.num_piece_types()) {
        return Err(Error::UnknownPieceType { index });
    }
    let mut board = Board::new(*board_info);
    place_starting_rows(&mut board);
    Ok(board)
}

/// The starting position on the standard board.
pub fn standard_starting_board() -> Board {
    let mut board = Board::new(BoardInfo::default());
    place_starting_rows(&mut board);
    board
}
