use serde::{Deserialize, Serialize};

use crate::types::Side;

const MAX_DELAY_MS: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be at most 10000 ms, got {value}")]
    DelayTooLong { field: &'static str, value: u32 },
}

/// Session settings supplied by the host when a game starts.
///
/// Delays are pacing hints returned with each scheduled action; the engine
/// itself never waits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub human_side: Side,
    /// Pause between a move and the turn switch, so flips can animate.
    pub move_animation_ms: u32,
    pub computer_delay_ms: u32,
    pub pass_delay_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            human_side: Side::White,
            move_animation_ms: 500,
            computer_delay_ms: 1000,
            pass_delay_ms: 1000,
        }
    }
}

impl GameConfig {
    pub fn for_side(human_side: Side) -> Self {
        Self {
            human_side,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("move_animation_ms", self.move_animation_ms),
            ("computer_delay_ms", self.computer_delay_ms),
            ("pass_delay_ms", self.pass_delay_ms),
        ] {
            if value > MAX_DELAY_MS {
                return Err(ConfigError::DelayTooLong { field, value });
            }
        }
        Ok(())
    }
}
