use log::{debug, info, warn};
use serde::Serialize;

use crate::ai::GreedySelector;
use crate::board::{Board, MoveError};
use crate::config::{ConfigError, GameConfig};
use crate::types::{GameResult, GameState, Position, Side, Winner};

pub trait MoveSelector: Send + Sync {
    fn select_move(&self, board: &Board, side: Side) -> Option<Position>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("game is already over")]
    GameOver,

    #[error("previous move has not been committed yet")]
    MoveInProgress,

    #[error("it is not {0:?}'s turn")]
    NotYourTurn(Side),

    #[error("{0:?} has legal moves and cannot pass")]
    CannotPass(Side),

    #[error("no move to commit")]
    NothingToAdvance,

    #[error("invalid move: {0}")]
    InvalidMove(#[from] MoveError),

    #[error("computer selected an illegal move at ({row}, {col})")]
    IllegalSelection { row: u8, col: u8 },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Where the turn cycle stands for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "side", rename_all = "snake_case")]
pub enum TurnStatus {
    AwaitingMove(Side),
    MustPass(Side),
    Terminal,
}

/// The next step the host should run, and how long to wait before running it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduledAction {
    /// Commit the last move and hand the turn over (`advance`).
    AdvanceTurn { delay_ms: u32 },
    /// Let the computer play (`do_ai_move`).
    ComputerMove { delay_ms: u32 },
    /// The side to move has nothing legal (`pass`).
    Pass { delay_ms: u32 },
}

pub struct GameInstance {
    board: Board,
    config: GameConfig,
    current_player: Side,
    is_game_over: bool,
    /// Set between an applied move and the following `advance`.
    pending_advance: bool,
    is_pass: bool,
    flipped: Vec<Position>,
    placed: Option<Position>,
    message: String,
    selector: Box<dyn MoveSelector>,
}

impl GameInstance {
    pub fn new(config: GameConfig, selector: Box<dyn MoveSelector>) -> Result<Self, GameError> {
        config.validate()?;

        let mut game = Self {
            board: Board::new(),
            config,
            current_player: Side::White,
            is_game_over: false,
            pending_advance: false,
            is_pass: false,
            flipped: Vec::new(),
            placed: None,
            message: String::new(),
            selector,
        };
        game.reset();
        Ok(game)
    }

    pub fn with_greedy(config: GameConfig) -> Result<Self, GameError> {
        Self::new(config, Box::new(GreedySelector))
    }

    /// Starts over on a fresh board. White always moves first.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.current_player = Side::White;
        self.is_game_over = false;
        self.pending_advance = false;
        self.is_pass = false;
        self.flipped.clear();
        self.placed = None;
        self.message = "Game started!".to_string();
        info!("new game: human plays {}", self.config.human_side.name());
    }

    /// Starts over with the human on `human_side`.
    pub fn new_game(&mut self, human_side: Side) {
        self.config.human_side = human_side;
        self.reset();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn current_player(&self) -> Side {
        self.current_player
    }

    pub fn human_side(&self) -> Side {
        self.config.human_side
    }

    pub fn computer_side(&self) -> Side {
        self.config.human_side.opponent()
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> TurnStatus {
        if self.board.is_terminal() {
            TurnStatus::Terminal
        } else if self.board.must_pass(self.current_player) {
            TurnStatus::MustPass(self.current_player)
        } else {
            TurnStatus::AwaitingMove(self.current_player)
        }
    }

    /// Human move. Rejected moves leave the board untouched.
    pub fn place(&mut self, row: usize, col: usize) -> Result<Position, GameError> {
        self.ensure_can_move()?;
        if self.current_player != self.config.human_side {
            return Err(GameError::NotYourTurn(self.config.human_side));
        }

        let result = Position::new(row, col).and_then(|pos| {
            self.board
                .apply_move(row, col, self.current_player)
                .map(|flips| (pos, flips))
        });

        match result {
            Ok((pos, flips)) => {
                self.record_move(pos, flips);
                Ok(pos)
            }
            Err(err) => {
                warn!("rejected human move: {err}");
                self.message = "Invalid move!".to_string();
                Err(err.into())
            }
        }
    }

    /// Computer move. Returns `None` when the computer had to pass instead.
    pub fn do_ai_move(&mut self) -> Result<Option<Position>, GameError> {
        self.ensure_can_move()?;
        let side = self.computer_side();
        if self.current_player != side {
            return Err(GameError::NotYourTurn(side));
        }

        let Some(pos) = self.selector.select_move(&self.board, side) else {
            self.pass()?;
            self.message = format!("Computer ({}) has no moves.", side.name());
            return Ok(None);
        };

        let flips = self
            .board
            .apply_move(pos.row as usize, pos.col as usize, side)
            .map_err(|_| GameError::IllegalSelection {
                row: pos.row,
                col: pos.col,
            })?;

        self.record_move(pos, flips);
        self.message = format!(
            "Computer ({}) moves to ({}, {})",
            side.name(),
            pos.row,
            pos.col
        );
        Ok(Some(pos))
    }

    /// Hands the turn to the other side after a move and re-evaluates the position.
    pub fn advance(&mut self) -> Result<TurnStatus, GameError> {
        if !self.pending_advance {
            return Err(GameError::NothingToAdvance);
        }
        self.pending_advance = false;
        self.current_player = self.current_player.opponent();
        Ok(self.refresh_status())
    }

    /// Forced pass for the side to move; the board is not modified.
    pub fn pass(&mut self) -> Result<TurnStatus, GameError> {
        self.ensure_can_move()?;
        let side = self.current_player;
        if !self.board.must_pass(side) {
            return Err(GameError::CannotPass(side));
        }

        debug!("{} passes", side.name());
        self.is_pass = true;
        self.flipped.clear();
        self.placed = None;
        self.current_player = side.opponent();
        Ok(self.refresh_status())
    }

    /// What the host should schedule next. `None` means the game is over or
    /// it is waiting on human input.
    pub fn next_action(&self) -> Option<ScheduledAction> {
        if self.is_game_over {
            return None;
        }
        if self.pending_advance {
            return Some(ScheduledAction::AdvanceTurn {
                delay_ms: self.config.move_animation_ms,
            });
        }

        match self.status() {
            TurnStatus::Terminal => None,
            TurnStatus::MustPass(_) => Some(ScheduledAction::Pass {
                delay_ms: self.config.pass_delay_ms,
            }),
            TurnStatus::AwaitingMove(side) if side == self.computer_side() => {
                Some(ScheduledAction::ComputerMove {
                    delay_ms: self.config.computer_delay_ms,
                })
            }
            TurnStatus::AwaitingMove(_) => None,
        }
    }

    pub fn legal_moves(&self) -> Vec<Position> {
        self.board.legal_moves(self.current_player)
    }

    /// Legal moves to highlight; empty unless the human is to move.
    pub fn hint_moves(&self) -> Vec<Position> {
        let humans_turn = self.current_player == self.config.human_side;
        if self.is_game_over || self.pending_advance || !humans_turn {
            return Vec::new();
        }
        self.legal_moves()
    }

    pub fn to_game_state(&self) -> GameState {
        let (white_count, black_count) = self.board.score();
        GameState {
            board: self.board.to_codes().to_vec(),
            current_player: self.current_player,
            human_side: self.config.human_side,
            computer_side: self.computer_side(),
            white_count,
            black_count,
            is_active: !self.is_game_over,
            is_game_over: self.is_game_over,
            is_pass: self.is_pass,
            flipped: self.flipped.clone(),
            placed: self.placed,
            message: self.message.clone(),
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        let (white_count, black_count) = self.board.score();
        GameResult::from_counts(white_count, black_count)
    }

    fn ensure_can_move(&self) -> Result<(), GameError> {
        if self.is_game_over {
            return Err(GameError::GameOver);
        }
        if self.pending_advance {
            return Err(GameError::MoveInProgress);
        }
        Ok(())
    }

    fn record_move(&mut self, pos: Position, flips: Vec<Position>) {
        debug!(
            "{} plays ({}, {}) flipping {}",
            self.current_player.name(),
            pos.row,
            pos.col,
            flips.len()
        );
        self.is_pass = false;
        self.flipped = flips;
        self.placed = Some(pos);
        self.pending_advance = true;
    }

    fn refresh_status(&mut self) -> TurnStatus {
        let status = self.status();
        match status {
            TurnStatus::Terminal => {
                self.is_game_over = true;
                let result = self.to_game_result();
                let outcome = match result.winner {
                    Winner::White => "White wins!",
                    Winner::Black => "Black wins!",
                    Winner::Draw => "It's a draw!",
                };
                self.message = format!("Game Over! {outcome}");
                info!(
                    "game over: white {} black {}",
                    result.white_count, result.black_count
                );
            }
            TurnStatus::MustPass(side) => {
                self.message = format!("{} has no moves. Skipping turn.", side.name());
            }
            TurnStatus::AwaitingMove(_) => {}
        }
        status
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current_player: Side) {
        self.board = board;
        self.current_player = current_player;
        self.is_game_over = false;
        self.pending_advance = false;
        self.is_pass = false;
        self.flipped.clear();
        self.placed = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedMoveSelector {
        mv: Position,
    }

    impl MoveSelector for FixedMoveSelector {
        fn select_move(&self, _board: &Board, _side: Side) -> Option<Position> {
            Some(self.mv)
        }
    }

    fn pos(row: u8, col: u8) -> Position {
        Position { row, col }
    }

    fn white_must_pass_board() -> Board {
        Board::from_rows(&[
            ".WBBBBBB", "BBBBBBBB", "BBBBBBBB", "BBBBBBBB", "BBBBBBBB", "BBBBBBBB", "BBBBBBBB",
            "BBBBBBBB",
        ])
        .unwrap()
    }

    #[test]
    fn initial_state_is_correct() {
        let game = GameInstance::with_greedy(GameConfig::default()).unwrap();
        let state = game.to_game_state();

        assert_eq!(state.current_player, Side::White);
        assert_eq!(state.human_side, Side::White);
        assert_eq!(state.computer_side, Side::Black);
        assert_eq!(state.white_count, 2);
        assert_eq!(state.black_count, 2);
        assert!(state.is_active);
        assert!(!state.is_game_over);
        assert!(!state.is_pass);
        assert!(state.flipped.is_empty());
        assert_eq!(state.message, "Game started!");
        assert_eq!(game.status(), TurnStatus::AwaitingMove(Side::White));
        assert_eq!(game.hint_moves().len(), 4);
        assert_eq!(game.next_action(), None);
    }

    #[test]
    fn white_opens_even_when_human_is_black() {
        let mut game = GameInstance::with_greedy(GameConfig::for_side(Side::Black)).unwrap();

        assert_eq!(game.current_player(), Side::White);
        assert!(game.hint_moves().is_empty());
        assert_eq!(
            game.next_action(),
            Some(ScheduledAction::ComputerMove { delay_ms: 1000 })
        );
        assert_eq!(game.place(2, 3), Err(GameError::NotYourTurn(Side::Black)));

        assert_eq!(game.do_ai_move(), Ok(Some(pos(2, 4))));
        assert_eq!(game.message(), "Computer (White) moves to (2, 4)");
    }

    #[test]
    fn t01_opening_move_then_turn_switch() {
        let mut game = GameInstance::with_greedy(GameConfig::default()).unwrap();

        assert_eq!(game.place(2, 4), Ok(pos(2, 4)));
        let state = game.to_game_state();
        assert_eq!(state.white_count, 4);
        assert_eq!(state.black_count, 1);
        assert_eq!(state.flipped, vec![pos(3, 4)]);
        assert_eq!(state.placed, Some(pos(2, 4)));
        assert_eq!(
            game.next_action(),
            Some(ScheduledAction::AdvanceTurn { delay_ms: 500 })
        );
        assert_eq!(game.place(3, 5), Err(GameError::MoveInProgress));

        assert_eq!(game.advance(), Ok(TurnStatus::AwaitingMove(Side::Black)));
        assert_eq!(
            game.next_action(),
            Some(ScheduledAction::ComputerMove { delay_ms: 1000 })
        );
        assert_eq!(game.do_ai_move(), Ok(Some(pos(2, 3))));
        assert_eq!(game.message(), "Computer (Black) moves to (2, 3)");
    }

    #[test]
    fn t02_illegal_player_move_returns_error() {
        let mut game = GameInstance::with_greedy(GameConfig::default()).unwrap();
        let before = *game.board();

        let err = game.place(0, 0).unwrap_err();

        assert_eq!(
            err,
            GameError::InvalidMove(MoveError::NoCapture { row: 0, col: 0 })
        );
        assert_eq!(game.message(), "Invalid move!");
        assert_eq!(*game.board(), before);
        assert_eq!(game.current_player(), Side::White);
    }

    #[test]
    fn out_of_bounds_player_move_is_rejected() {
        let mut game = GameInstance::with_greedy(GameConfig::default()).unwrap();

        assert_eq!(
            game.place(8, 2),
            Err(GameError::InvalidMove(MoveError::OutOfBounds { row: 8, col: 2 }))
        );
    }

    #[test]
    fn pass_is_refused_while_moves_exist() {
        let mut game = GameInstance::with_greedy(GameConfig::default()).unwrap();

        assert_eq!(game.pass(), Err(GameError::CannotPass(Side::White)));
        assert_eq!(game.advance(), Err(GameError::NothingToAdvance));
    }

    #[test]
    fn t03_forced_pass_switches_turn_then_game_ends() {
        let mut game = GameInstance::with_greedy(GameConfig::default()).unwrap();
        game.set_board_for_test(white_must_pass_board(), Side::White);

        assert_eq!(game.status(), TurnStatus::MustPass(Side::White));
        assert_eq!(
            game.next_action(),
            Some(ScheduledAction::Pass { delay_ms: 1000 })
        );

        assert_eq!(game.pass(), Ok(TurnStatus::AwaitingMove(Side::Black)));
        let state = game.to_game_state();
        assert!(state.is_pass);
        assert!(state.flipped.is_empty());
        assert_eq!(state.current_player, Side::Black);
        assert!(!state.is_game_over);

        assert_eq!(game.do_ai_move(), Ok(Some(pos(0, 0))));
        assert_eq!(game.advance(), Ok(TurnStatus::Terminal));

        let state = game.to_game_state();
        assert!(state.is_game_over);
        assert!(!state.is_active);
        assert_eq!(state.black_count, 64);
        assert_eq!(state.message, "Game Over! Black wins!");
        assert_eq!(game.to_game_result().winner, Winner::Black);
        assert_eq!(game.next_action(), None);
        assert_eq!(game.place(0, 0), Err(GameError::GameOver));
    }

    #[test]
    fn t04_computer_without_moves_passes() {
        let mut game = GameInstance::with_greedy(GameConfig::for_side(Side::Black)).unwrap();
        game.set_board_for_test(white_must_pass_board(), Side::White);

        assert_eq!(game.do_ai_move(), Ok(None));
        assert_eq!(game.message(), "Computer (White) has no moves.");
        assert_eq!(game.current_player(), Side::Black);
        assert!(game.to_game_state().is_pass);
        assert_eq!(game.hint_moves(), vec![pos(0, 0)]);
    }

    #[test]
    fn illegal_selection_is_reported() {
        let mut game = GameInstance::new(
            GameConfig::for_side(Side::Black),
            Box::new(FixedMoveSelector { mv: pos(0, 0) }),
        )
        .unwrap();
        let before = *game.board();

        assert_eq!(
            game.do_ai_move(),
            Err(GameError::IllegalSelection { row: 0, col: 0 })
        );
        assert_eq!(*game.board(), before);
    }

    #[test]
    fn t05_selector_giving_up_with_moves_left_keeps_state() {
        struct GiveUpSelector;

        impl MoveSelector for GiveUpSelector {
            fn select_move(&self, _board: &Board, _side: Side) -> Option<Position> {
                None
            }
        }

        let mut game =
            GameInstance::new(GameConfig::for_side(Side::Black), Box::new(GiveUpSelector)).unwrap();

        assert_eq!(game.do_ai_move(), Err(GameError::CannotPass(Side::White)));
        assert_eq!(game.message(), "Game started!");
        assert_eq!(game.current_player(), Side::White);
        assert!(!game.to_game_state().is_pass);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = GameConfig {
            pass_delay_ms: 20_000,
            ..GameConfig::default()
        };

        assert!(matches!(
            GameInstance::with_greedy(config),
            Err(GameError::Config(_))
        ));
    }

    #[test]
    fn new_game_resets_board_and_side() {
        let mut game = GameInstance::with_greedy(GameConfig::default()).unwrap();
        game.place(2, 4).unwrap();

        game.new_game(Side::Black);

        assert_eq!(*game.board(), Board::new());
        assert_eq!(game.human_side(), Side::Black);
        assert_eq!(game.current_player(), Side::White);
        assert_eq!(game.to_game_state().placed, None);
    }
}
