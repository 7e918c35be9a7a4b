//! Discrete horizontal steering

use serde::{Deserialize, Serialize};

use super::state::Player;
use crate::config::GameConfig;

/// Steering commands from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
}

impl Command {
    /// Signed direction along x
    #[inline]
    pub fn direction(&self) -> f32 {
        match self {
            Command::MoveLeft => -1.0,
            Command::MoveRight => 1.0,
        }
    }
}

/// Teleport the body one step sideways, clamped to the playfield.
/// Accepted in every run state.
pub fn apply(player: &mut Player, command: Command, config: &GameConfig) {
    let x = player.pos.x + command.direction() * config.move_step;
    player.pos.x = x.clamp(0.0, config.max_player_x());
}
