use crate::board_info::{BoardInfo, NUM_PIECE_TYPES};
use crate::chess_move::{Move, MoveKind};
use crate::color::Color;
use crate::error::Error;
use crate::game_state::{GameState, GameStatus};
use crate::generator::{generate_piece_types, standard_starting_board, starting_board};
use crate::location::Location;
use crate::movegen::{game_status, is_in_check, legal_moves_for_piece, move_is_legal};
use crate::piece_type::PieceType;
use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Who plays which side.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Players {
    pub white: String,
    pub black: String,
}

impl Players {
    pub fn new(white: &str, black: &str) -> Players {
        Players {
            white: white.to_owned(),
            black: black.to_owned(),
        }
    }

    /// The name of the player of `color`.
    pub fn player(&self, color: Color) -> &str {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
}

/// What was the result of this game?
#[derive(Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Debug, Hash)]
pub enum GameResult {
    WhiteCheckmates,
    BlackCheckmates,
    Stalemate,
}

/// A whole game: its piece types, and every state and move so far.
///
/// `moves[n]` turns `states[n]` into `states[n + 1]`, so there is always one more state than
/// there are moves.  Nothing is ever taken back.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Game {
    players: Players,
    piece_types: Vec<PieceType>,
    board_info: BoardInfo,
    states: Vec<GameState>,
    moves: Vec<Move>,
    notations: Vec<String>,
}

/// Generate a game between two players, with freshly generated piece types and the players
/// assigned to colors at random.
pub fn generate_game(player1: &str, player2: &str) -> Game {
    Game::generate(player1, player2, &mut rand::rng())
}

impl Game {
    /// Create a new `Game` from a starting state.
    ///
    /// There must be exactly one piece type for each type index the board allows.
    pub fn new(
        players: Players,
        piece_types: Vec<PieceType>,
        initial: GameState,
    ) -> Result<Game, Error> {
        let board_info = *initial.board().info();
        if piece_types.len() != board_info.num_piece_types() {
            return Err(Error::PieceTypeCount {
                expected: board_info.num_piece_types(),
                found: piece_types.len(),
            });
        }
        Ok(Game::assemble(players, piece_types, initial))
    }

    fn assemble(players: Players, piece_types: Vec<PieceType>, initial: GameState) -> Game {
        let mut game = Game {
            players,
            piece_types,
            board_info: *initial.board().info(),
            states: vec![initial],
            moves: vec![],
            notations: vec![],
        };
        let status = game_status(&game, game.current_state());
        game.states[0].set_status(status);
        game
    }

    /// Generate a game on the standard board.
    ///
    /// ```
    /// use fairy_chess::{Game, GameStatus};
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    ///
    /// let game = Game::generate("alice", "bob", &mut StdRng::seed_from_u64(1));
    /// assert_eq!(game.current_state_index(), 0);
    /// assert_eq!(game.current_state().status(), GameStatus::NotOver);
    /// assert!(game.player_color("alice").is_some());
    /// ```
    pub fn generate<R: Rng + ?Sized>(player1: &str, player2: &str, rng: &mut R) -> Game {
        let info = BoardInfo::default();
        let players = Game::assign_colors(player1, player2, rng);
        let piece_types = generate_piece_types(&info, rng);
        Game::log_piece_types(&piece_types);
        let initial = GameState::new(standard_starting_board(), Color::White);
        Game::assemble(players, piece_types, initial)
    }

    /// Generate a game on a board of some other shape.  Only boards with the standard number
    /// of columns and piece types have a starting layout.
    pub fn generate_with_info<R: Rng + ?Sized>(
        board_info: BoardInfo,
        player1: &str,
        player2: &str,
        rng: &mut R,
    ) -> Result<Game, Error> {
        if board_info.num_piece_types() != NUM_PIECE_TYPES {
            return Err(Error::PieceTypeCount {
                expected: NUM_PIECE_TYPES,
                found: board_info.num_piece_types(),
            });
        }
        let board = starting_board(&board_info)?;
        let players = Game::assign_colors(player1, player2, rng);
        let piece_types = generate_piece_types(&board_info, rng);
        Game::log_piece_types(&piece_types);
        Ok(Game::assemble(
            players,
            piece_types,
            GameState::new(board, Color::White),
        ))
    }

    fn assign_colors<R: Rng + ?Sized>(player1: &str, player2: &str, rng: &mut R) -> Players {
        let mut shuffled = [player1, player2];
        shuffled.shuffle(rng);
        debug!("{} plays white, {} plays black", shuffled[0], shuffled[1]);
        Players::new(shuffled[0], shuffled[1])
    }

    fn log_piece_types(piece_types: &[PieceType]) {
        for (index, piece_type) in piece_types.iter().enumerate() {
            debug!(
                "piece type {}: {} moves as {} (royal: {})",
                index,
                piece_type.name(),
                piece_type.movement_rule().kind(),
                piece_type.is_royal()
            );
        }
    }

    #[inline]
    pub fn players(&self) -> &Players {
        &self.players
    }

    #[inline]
    pub fn piece_types(&self) -> &[PieceType] {
        &self.piece_types
    }

    #[inline]
    pub fn piece_type(&self, index: usize) -> Option<&PieceType> {
        self.piece_types.get(index)
    }

    #[inline]
    pub fn board_info(&self) -> &BoardInfo {
        &self.board_info
    }

    /// Every state so far, starting with the initial one.
    #[inline]
    pub fn states(&self) -> &[GameState] {
        &self.states
    }

    /// Every move so far.
    #[inline]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// The algebraic notation of every move so far.
    #[inline]
    pub fn notations(&self) -> &[String] {
        &self.notations
    }

    /// An earlier (or the current) state, by index.
    #[inline]
    pub fn state(&self, index: usize) -> Option<&GameState> {
        self.states.get(index)
    }

    #[inline]
    pub fn current_state_index(&self) -> usize {
        self.states.len() - 1
    }

    #[inline]
    pub fn current_state(&self) -> &GameState {
        &self.states[self.current_state_index()]
    }

    /// Which color does `player` play?
    pub fn player_color(&self, player: &str) -> Option<Color> {
        if self.players.white == player {
            Some(Color::White)
        } else if self.players.black == player {
            Some(Color::Black)
        } else {
            None
        }
    }

    /// What was the result of this game, if it is over?
    pub fn result(&self) -> Option<GameResult> {
        let state = self.current_state();
        match state.status() {
            GameStatus::NotOver => None,
            GameStatus::Stalemate => Some(GameResult::Stalemate),
            GameStatus::Checkmate => match state.player_to_move() {
                Color::White => Some(GameResult::BlackCheckmates),
                Color::Black => Some(GameResult::WhiteCheckmates),
            },
        }
    }

    pub fn move_is_legal_in_current_state(&self, m: &Move) -> bool {
        move_is_legal(self, self.current_state(), m)
    }

    /// The legal move of the piece on `from` that ends on `to`, if there is one.
    pub fn find_move(&self, from: Location, to: Location) -> Option<Move> {
        let state = self.current_state();
        let piece = state.board().piece_on(from)?;
        if piece.color() != state.player_to_move() {
            return None;
        }
        legal_moves_for_piece(self, state, &piece)
            .into_iter()
            .find(|m| m.to() == to)
    }

    /// Play `m`, which is assumed to be legal, and record it.
    pub fn execute_move(&mut self, m: Move) {
        let current = self.current_state();
        let mut next = current.execute_move(&m);
        let status = game_status(self, &next);
        next.set_status(status);
        let notation = self.notation(current, &m, &next);
        trace!("{} plays {} ({})", current.player_to_move(), m, notation);

        self.states.push(next);
        self.moves.push(m);
        self.notations.push(notation);
    }

    /// Play `m` if it is legal.  Returns whether it was played.
    pub fn make_move(&mut self, m: Move) -> bool {
        if self.current_state().status().is_over() || !self.move_is_legal_in_current_state(&m) {
            return false;
        }
        self.execute_move(m);
        true
    }

    /// Play a move on behalf of `player`, who saw the game at state `move_index`.
    ///
    /// ```
    /// use fairy_chess::{Error, Game};
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    ///
    /// let mut game = Game::generate("alice", "bob", &mut StdRng::seed_from_u64(3));
    /// let white = game.players().white.clone();
    /// let m = fairy_chess::legal_moves(&game, game.current_state())[0];
    ///
    /// assert!(game.submit_move(&white, 0, m).is_ok());
    /// assert_eq!(
    ///     game.submit_move(&white, 1, m),
    ///     Err(Error::NotYourTurn { player: white.clone() })
    /// );
    /// ```
    pub fn submit_move(&mut self, player: &str, move_index: usize, m: Move) -> Result<(), Error> {
        let color = self
            .player_color(player)
            .ok_or_else(|| Error::UnknownPlayer {
                player: player.to_owned(),
            })?;
        let state = self.current_state();
        if state.status().is_over() {
            return Err(Error::GameOver);
        }
        if color != state.player_to_move() {
            return Err(Error::NotYourTurn {
                player: player.to_owned(),
            });
        }
        if move_index != self.current_state_index() {
            return Err(Error::StaleMoveIndex {
                submitted: move_index,
                current: self.current_state_index(),
            });
        }
        if !self.move_is_legal_in_current_state(&m) {
            return Err(Error::IllegalMove);
        }
        self.execute_move(m);
        Ok(())
    }

    fn notation(&self, before: &GameState, m: &Move, after: &GameState) -> String {
        let letter = self
            .piece_type(m.piece().type_index())
            .and_then(|t| t.notation_letter())
            .map(|c| c.to_string())
            .unwrap_or_default();

        let mut result = match m.kind() {
            MoveKind::SelfMove(to) => {
                let capture = before
                    .board()
                    .piece_on(to)
                    .map_or(false, |p| p.color() != m.piece().color());
                format!("{}{}{}", letter, if capture { "x" } else { "" }, to)
            }
            MoveKind::Exchange(with) => format!("{}{}<>{}", letter, m.from(), with),
        };

        if after.status() == GameStatus::Checkmate {
            result.push('#');
        } else if is_in_check(self, after, after.player_to_move()) {
            result.push('+');
        }
        result
    }
}
