//! Semi-legal and legal move generation.
//!
//! A semi-legal move is one the piece's movement rule allows.  A legal move is a semi-legal
//! move that does not leave the mover's royal pieces in check.

use crate::board::Board;
use crate::chess_move::{Move, MoveKind};
use crate::color::Color;
use crate::controller::{destinations, Mood};
use crate::game::Game;
use crate::game_state::{GameState, GameStatus};
use crate::location::Location;
use crate::movement_rule::{CompositeRule, MovementRule, NestableRule};
use crate::piece::Piece;
use std::iter::ExactSizeIterator;

fn push_unique(moves: &mut Vec<Move>, m: Move) {
    if !moves.contains(&m) {
        moves.push(m);
    }
}

fn push_nested(
    moves: &mut Vec<Move>,
    rule: &NestableRule,
    mood: Mood,
    board: &Board,
    piece: &Piece,
) {
    for to in destinations(rule, mood, board, piece) {
        push_unique(moves, Move::self_move(*piece, to));
    }
}

/// Every move `piece` may make in `state` by its movement rule, ignoring check.
///
/// A piece whose type the game does not know has no moves.
pub fn semi_legal_moves_for_piece(game: &Game, state: &GameState, piece: &Piece) -> Vec<Move> {
    let mut moves = vec![];
    let piece_type = match game.piece_type(piece.type_index()) {
        Some(piece_type) => piece_type,
        None => return moves,
    };
    let board = state.board();

    match *piece_type.movement_rule() {
        MovementRule::Nestable(ref rule) => {
            push_nested(&mut moves, rule, Mood::Regular, board, piece);
        }
        MovementRule::Composite(CompositeRule::Exchange { with, ref regular }) => {
            push_nested(&mut moves, regular, Mood::Regular, board, piece);
            for partner in board.pieces_of(piece.color()) {
                if partner.type_index() == with && partner.location() != piece.location() {
                    push_unique(&mut moves, Move::exchange(*piece, partner.location()));
                }
            }
        }
        MovementRule::Composite(CompositeRule::Retreat {
            squares,
            ref regular,
        }) => {
            push_nested(&mut moves, regular, Mood::Regular, board, piece);
            let row = piece.color().home_row(board.info());
            for col in 0..board.info().num_cols() as i32 {
                let to = Location::new(row, col);
                if board.is_empty(to) && squares.allows(to) {
                    push_unique(&mut moves, Move::self_move(*piece, to));
                }
            }
        }
        MovementRule::Composite(CompositeRule::MoveCapture {
            ref movement,
            ref capture,
        }) => {
            push_nested(&mut moves, capture, Mood::CaptureOnly, board, piece);
            push_nested(&mut moves, movement, Mood::MoveOnly, board, piece);
        }
        MovementRule::Composite(CompositeRule::Combination {
            ref first,
            ref second,
        }) => {
            push_nested(&mut moves, first, Mood::Regular, board, piece);
            push_nested(&mut moves, second, Mood::Regular, board, piece);
        }
    }

    moves
}

/// Every semi-legal move of the player to move, scanning the board row by row.
pub fn semi_legal_moves(game: &Game, state: &GameState) -> Vec<Move> {
    state
        .board()
        .pieces_of(state.player_to_move())
        .flat_map(|piece| semi_legal_moves_for_piece(game, state, piece))
        .collect()
}

/// Could the opponent of `color` capture one of `color`'s royal pieces, if it were their move?
///
/// A side without royal pieces is never in check.
pub fn is_in_check(game: &Game, state: &GameState, color: Color) -> bool {
    let board = state.board();
    let is_royal_target = |to| {
        board.piece_on(to).map_or(false, |target: Piece| {
            target.color() == color
                && game
                    .piece_type(target.type_index())
                    .map_or(false, |t| t.is_royal())
        })
    };

    board.pieces_of(!color).any(|attacker| {
        semi_legal_moves_for_piece(game, state, attacker)
            .iter()
            .any(|m| match m.kind() {
                MoveKind::SelfMove(to) => is_royal_target(to),
                MoveKind::Exchange(_) => false,
            })
    })
}

fn leaves_mover_safe(game: &Game, state: &GameState, m: &Move) -> bool {
    !is_in_check(game, &state.execute_move(m), state.player_to_move())
}

/// Every legal move of one piece.
pub fn legal_moves_for_piece(game: &Game, state: &GameState, piece: &Piece) -> Vec<Move> {
    semi_legal_moves_for_piece(game, state, piece)
        .into_iter()
        .filter(|m| leaves_mover_safe(game, state, m))
        .collect()
}

/// Every legal move of the player to move.
///
/// ```
/// use fairy_chess::{legal_moves, BoardBuilder, Game, GameState, Players, orthodox_piece_types};
/// use std::convert::TryFrom;
/// use std::str::FromStr;
///
/// let builder = BoardBuilder::from_str("8/8/8/8/8/8/8/R7 w").unwrap();
/// let state = GameState::try_from(&builder).unwrap();
/// let piece_types = orthodox_piece_types(builder.info());
/// let game = Game::new(Players::new("alice", "bob"), piece_types, state).unwrap();
///
/// assert_eq!(legal_moves(&game, game.current_state()).len(), 14);
/// ```
pub fn legal_moves(game: &Game, state: &GameState) -> Vec<Move> {
    semi_legal_moves(game, state)
        .into_iter()
        .filter(|m| leaves_mover_safe(game, state, m))
        .collect()
}

/// Is the game over in `state`, and how?
pub fn game_status(game: &Game, state: &GameState) -> GameStatus {
    let can_move = state
        .board()
        .pieces_of(state.player_to_move())
        .any(|piece| {
            semi_legal_moves_for_piece(game, state, piece)
                .iter()
                .any(|m| leaves_mover_safe(game, state, m))
        });

    if can_move {
        GameStatus::NotOver
    } else if is_in_check(game, state, state.player_to_move()) {
        GameStatus::Checkmate
    } else {
        GameStatus::Stalemate
    }
}

/// Does the move's rule allow it?  The piece must be the player to move's and must be where
/// the move says it is.
pub fn move_is_semi_legal(game: &Game, state: &GameState, m: &Move) -> bool {
    let piece = m.piece();
    piece.color() == state.player_to_move()
        && state.board().piece_on(piece.location()) == Some(piece)
        && semi_legal_moves_for_piece(game, state, &piece).contains(m)
}

/// Is the move semi-legal, and does it keep the mover out of check?
pub fn move_is_legal(game: &Game, state: &GameState, m: &Move) -> bool {
    move_is_semi_legal(game, state, m) && leaves_mover_safe(game, state, m)
}

/// An incremental iterator over the moves of a position.
///
/// ```
/// use fairy_chess::{Game, MoveGen};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let game = Game::generate("alice", "bob", &mut StdRng::seed_from_u64(7));
/// let moves = MoveGen::new_legal(&game, game.current_state());
/// let count = moves.len();
/// assert_eq!(moves.count(), count);
/// ```
pub struct MoveGen {
    moves: Vec<Move>,
    index: usize,
}

impl MoveGen {
    /// Create a new `MoveGen` over the legal moves of `state`.
    pub fn new_legal(game: &Game, state: &GameState) -> MoveGen {
        MoveGen {
            moves: legal_moves(game, state),
            index: 0,
        }
    }

    /// Create a new `MoveGen` over the semi-legal moves of `state`, which may leave the mover
    /// in check.
    pub fn new_semi_legal(game: &Game, state: &GameState) -> MoveGen {
        MoveGen {
            moves: semi_legal_moves(game, state),
            index: 0,
        }
    }

    /// Remove a specific move from the list of moves still to come.  Returns whether it was
    /// there.
    pub fn remove_move(&mut self, m: &Move) -> bool {
        match self.moves[self.index..].iter().position(|x| x == m) {
            Some(i) => {
                self.moves.remove(self.index + i);
                true
            }
            None => false,
        }
    }

    /// Count the positions reachable in exactly `depth` legal moves.
    pub fn perft(game: &Game, state: &GameState, depth: usize) -> usize {
        if depth == 0 {
            return 1;
        }
        let iterable = MoveGen::new_legal(game, state);
        if depth == 1 {
            iterable.len()
        } else {
            iterable
                .map(|m| MoveGen::perft(game, &state.execute_move(&m), depth - 1))
                .sum()
        }
    }
}

impl ExactSizeIterator for MoveGen {
    /// Give the exact length of this iterator
    fn len(&self) -> usize {
        self.moves.len() - self.index
    }
}

impl Iterator for MoveGen {
    type Item = Move;

    /// Give a size_hint to some functions that need it
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }

    /// Find the next move
    fn next(&mut self) -> Option<Move> {
        let m = self.moves.get(self.index).copied();
        if m.is_some() {
            self.index += 1;
        }
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board_builder::BoardBuilder;
    use crate::board_info::BoardInfo;
    use crate::game::Players;
    use crate::generator::orthodox_piece_types;
    use crate::movement_rule::{
        all_vectors, CompositeRule, LeapRange, Motion, MovementRule, NestableRule, RetreatSquares,
    };
    use crate::piece_type::PieceType;
    use std::convert::TryFrom;
    use std::str::FromStr;

    fn orthodox(layout: &str) -> Game {
        with_types(layout, |info| orthodox_piece_types(info))
    }

    fn with_types<F: Fn(&BoardInfo) -> Vec<PieceType>>(layout: &str, types: F) -> Game {
        let builder = BoardBuilder::from_str(layout).expect("valid layout");
        let state = GameState::try_from(&builder).expect("valid state");
        Game::new(Players::new("white", "black"), types(builder.info()), state)
            .expect("valid game")
    }

    fn loc(text: &str) -> Location {
        Location::from_str(text).expect("valid location")
    }

    fn targets(moves: &[Move]) -> Vec<String> {
        let mut result: Vec<String> = moves.iter().map(|m| m.to().to_string()).collect();
        result.sort();
        result
    }

    fn moves_from(game: &Game, square: &str) -> Vec<Move> {
        let state = game.current_state();
        let piece = state.board().piece_on(loc(square)).expect("a piece");
        semi_legal_moves_for_piece(game, state, &piece)
    }

    #[test]
    fn rook_in_the_corner() {
        let game = orthodox("8/8/8/8/8/8/8/R7 w");
        assert_eq!(legal_moves(&game, game.current_state()).len(), 14);
    }

    #[test]
    fn rider_stops_at_the_first_piece() {
        let game = orthodox("8/8/8/8/R2p4/8/8/8 w");
        let moves = moves_from(&game, "a4");
        assert_eq!(
            targets(&moves),
            vec!["a1", "a2", "a3", "a5", "a6", "a7", "a8", "b4", "c4", "d4"]
        );
    }

    #[test]
    fn king_moves() {
        let game = orthodox("8/8/8/3K4/8/8/8/8 w");
        assert_eq!(legal_moves(&game, game.current_state()).len(), 8);
        let game = orthodox("K7/8/8/8/8/8/8/8 w");
        assert_eq!(legal_moves(&game, game.current_state()).len(), 3);
    }

    #[test]
    fn pawn_moves_and_captures() {
        let game = orthodox("8/8/8/8/8/8/1P6/8 w");
        assert_eq!(targets(&moves_from(&game, "b2")), vec!["b3"]);

        let game = orthodox("8/8/8/8/8/2p5/1P6/8 w");
        assert_eq!(targets(&moves_from(&game, "b2")), vec!["b3", "c3"]);

        let game = orthodox("8/8/8/8/8/1p6/1P6/8 w");
        assert!(moves_from(&game, "b2").is_empty());

        let game = orthodox("8/8/8/8/8/2P5/1P6/8 w");
        assert_eq!(targets(&moves_from(&game, "b2")), vec!["b3"]);

        let game = orthodox("8/1p6/8/8/8/8/8/8 b");
        assert_eq!(targets(&moves_from(&game, "b7")), vec!["b6"]);
    }

    #[test]
    fn moves_stay_on_the_board() {
        let game = orthodox("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w");
        let state = game.current_state();
        for color in crate::color::ALL_COLORS.iter() {
            for piece in state.board().pieces_of(*color) {
                for m in semi_legal_moves_for_piece(&game, state, piece) {
                    assert!(state.board().in_bounds(m.to()));
                }
            }
        }
        // eight single pawn steps and four knight moves
        assert_eq!(legal_moves(&game, state).len(), 12);
    }

    #[test]
    fn pinned_piece_may_not_expose_the_king() {
        let game = orthodox("4r3/8/8/8/8/8/4R3/4K3 w");
        let state = game.current_state();
        let rook = state.board().piece_on(loc("e2")).expect("rook");
        let sideways = Move::self_move(rook, loc("d2"));
        let forward = Move::self_move(rook, loc("e5"));

        assert!(semi_legal_moves(&game, state).contains(&sideways));
        assert!(!legal_moves(&game, state).contains(&sideways));
        assert!(legal_moves(&game, state).contains(&forward));
        assert!(move_is_semi_legal(&game, state, &sideways));
        assert!(!move_is_legal(&game, state, &sideways));
        assert!(move_is_legal(&game, state, &forward));
    }

    #[test]
    fn check_detection() {
        let game = orthodox("4k3/8/8/8/8/8/8/4R1K1 w");
        let state = game.current_state();
        assert!(is_in_check(&game, state, Color::Black));
        assert!(!is_in_check(&game, state, Color::White));

        let mirrored = orthodox("4r1k1/8/8/8/8/8/8/4K3 b");
        let state = mirrored.current_state();
        assert!(is_in_check(&mirrored, state, Color::White));
        assert!(!is_in_check(&mirrored, state, Color::Black));

        // nothing royal to attack
        let kingless = orthodox("4q3/8/8/8/8/8/8/4R3 w");
        assert!(!is_in_check(&kingless, kingless.current_state(), Color::White));
        assert!(!is_in_check(&kingless, kingless.current_state(), Color::Black));
    }

    #[test]
    fn checkmate_and_stalemate() {
        let mate = orthodox("R5k1/5ppp/8/8/8/8/8/6K1 b");
        assert_eq!(game_status(&mate, mate.current_state()), GameStatus::Checkmate);

        let stalemate = orthodox("k7/2Q5/8/8/8/8/8/7K b");
        assert_eq!(
            game_status(&stalemate, stalemate.current_state()),
            GameStatus::Stalemate
        );

        let ongoing = orthodox("k7/8/8/8/8/8/8/7K b");
        assert_eq!(game_status(&ongoing, ongoing.current_state()), GameStatus::NotOver);
    }

    #[test]
    fn exchange_with_a_friendly_piece() {
        let game = with_types("8/8/8/8/8/8/8/3QK3 w", |info| {
            let mut types = orthodox_piece_types(info);
            let step = NestableRule::new(
                Motion::Walker {
                    vectors: all_vectors(),
                    min: 1,
                    max: 1,
                },
                info,
            );
            types[4] = PieceType::new(
                CompositeRule::Exchange {
                    with: 5,
                    regular: step,
                }
                .into(),
                "Queen",
                "Queen",
                false,
            );
            types
        });
        let moves = moves_from(&game, "d1");
        let exchanges: Vec<&Move> = moves.iter().filter(|m| m.is_exchange()).collect();
        assert_eq!(exchanges.len(), 1);
        assert_eq!(exchanges[0].to(), loc("e1"));
        // c1, c2, d2, e2 by walking; e1 is taken by the king
        assert_eq!(moves.len(), 5);
    }

    #[test]
    fn retreat_to_the_home_row() {
        let game = with_types("8/8/8/3N4/8/8/8/R3K3 w", |info| {
            let mut types = orthodox_piece_types(info);
            types[2] = PieceType::new(
                CompositeRule::Retreat {
                    squares: RetreatSquares::Black,
                    regular: NestableRule::new(Motion::Leaper(LeapRange::fixed(1, 2)), info),
                }
                .into(),
                "Knight",
                "Knight",
                false,
            );
            types
        });
        let moves = moves_from(&game, "d5");
        let home: Vec<String> = moves
            .iter()
            .filter(|m| m.to().row == 0)
            .map(|m| m.to().to_string())
            .collect();
        // dark squares on the first row are a1, c1, e1 and g1; a1 and e1 are occupied
        assert_eq!(home, vec!["c1", "g1"]);
        assert_eq!(moves.len(), 8 + 2);
    }

    #[test]
    fn black_retreats_to_its_own_home_row() {
        let game = with_types("r3k3/8/8/3n4/8/8/8/4K3 b", |info| {
            let mut types = orthodox_piece_types(info);
            types[2] = PieceType::new(
                CompositeRule::Retreat {
                    squares: RetreatSquares::White,
                    regular: NestableRule::new(Motion::Leaper(LeapRange::fixed(1, 2)), info),
                }
                .into(),
                "Knight",
                "Knight",
                false,
            );
            types
        });
        let moves = moves_from(&game, "d5");
        let home: Vec<String> = moves
            .iter()
            .filter(|m| m.to().row == 7)
            .map(|m| m.to().to_string())
            .collect();
        // light squares on the eighth row are a8, c8, e8 and g8; a8 and e8 are occupied
        assert_eq!(home, vec!["c8", "g8"]);
        assert_eq!(moves.len(), 8 + 2);
        assert!(moves.iter().all(|m| m.to().row != 0));
    }

    #[test]
    fn move_capture_with_leaping_parts() {
        let game = with_types("8/8/4p3/2p2P2/3N4/8/8/8 w", |info| {
            let mut types = orthodox_piece_types(info);
            types[2] = PieceType::new(
                CompositeRule::MoveCapture {
                    movement: NestableRule::new(Motion::Leaper(LeapRange::fixed(1, 1)), info),
                    capture: NestableRule::new(Motion::Leaper(LeapRange::fixed(1, 2)), info),
                }
                .into(),
                "Knight",
                "Knight",
                false,
            );
            types
        });
        let moves = moves_from(&game, "d4");
        // c5 is only reachable by the non-capturing part, f5 holds a friend
        assert_eq!(targets(&moves), vec!["c3", "e3", "e5", "e6"]);
        assert_eq!(moves[0].to(), loc("e6"));
    }

    #[test]
    fn combination_and_duplicates() {
        let game = with_types("8/8/8/8/3B4/8/8/8 w", |info| {
            let mut types = orthodox_piece_types(info);
            let slide = |vectors: &[Location]| {
                NestableRule::new(
                    Motion::Rider {
                        vectors: vectors.iter().copied().collect(),
                    },
                    info,
                )
            };
            types[3] = PieceType::new(
                MovementRule::Composite(CompositeRule::Combination {
                    first: slide(&[Location::new(1, 1), Location::new(-1, 1)]),
                    second: slide(&[Location::new(1, 1), Location::new(1, 0)]),
                }),
                "Bishop",
                "Bishop",
                false,
            );
            types
        });
        let moves = moves_from(&game, "d4");
        // 13 diagonal squares and 4 squares up the file, with the shared diagonals once
        assert_eq!(moves.len(), 17);
    }

    #[test]
    fn perft_counts() {
        let game = orthodox("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w");
        let state = game.current_state();
        assert_eq!(MoveGen::perft(&game, state, 0), 1);
        assert_eq!(MoveGen::perft(&game, state, 1), 12);
        assert_eq!(MoveGen::perft(&game, state, 2), 144);
    }

    #[test]
    fn movegen_iterates_every_move() {
        let game = orthodox("4k3/8/8/8/8/8/8/4K2R w");
        let state = game.current_state();
        let mut iterable = MoveGen::new_legal(&game, state);
        let total = iterable.len();
        assert_eq!(total, legal_moves(&game, state).len());
        let first = iterable.next().expect("a move");
        assert_eq!(iterable.len(), total - 1);
        assert!(!iterable.remove_move(&first));
        let last = *legal_moves(&game, state).last().expect("a move");
        assert!(iterable.remove_move(&last));
        assert_eq!(iterable.count(), total - 2);

        let semi = MoveGen::new_semi_legal(&game, state);
        assert!(semi.len() >= total);
    }
}
