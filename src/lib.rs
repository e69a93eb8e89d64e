use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod config;
pub mod game;
pub mod types;
pub mod wasm;

pub use ai::GreedySelector;
pub use board::{Board, Direction, MoveError};
pub use config::GameConfig;
pub use game::{GameError, GameInstance, MoveSelector, ScheduledAction, TurnStatus};
pub use types::{Cell, GameResult, GameState, Position, Side, Winner};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
