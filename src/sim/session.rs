//! One isolated game instance
//!
//! Holds every piece of mutable run state plus the session's own tunables and
//! RNG. Ticks read and write this value directly.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::{self, Command};
use super::obstacles;
use super::state::{CountdownDisplay, Obstacle, Player, RngState, RunState, RunStats};
use crate::config::{GameConfig, Theme};
use crate::error::ConfigError;

/// Everything the presentation layer needs to draw a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub player: Vec2,
    /// Always exactly `obstacle_count` entries
    pub obstacles: Vec<Vec2>,
    pub countdown: CountdownDisplay,
    pub run_state: RunState,
    pub theme: Theme,
    pub stats: RunStats,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) config: GameConfig,
    theme: Theme,
    rng_state: RngState,
    rng: Pcg32,
    pub player: Player,
    /// Live window, oldest first
    pub obstacles: Vec<Obstacle>,
    pub run_state: RunState,
    pub countdown: CountdownDisplay,
    pub stats: RunStats,
}

impl Session {
    /// Create a session in its initial countdown state
    pub fn new(config: GameConfig, seed: u64, theme: Theme) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(config, seed, theme))
    }

    /// Build from a config that already passed `GameConfig::validate`
    pub(crate) fn from_validated(config: GameConfig, seed: u64, theme: Theme) -> Self {
        let rng_state = RngState::new(seed);
        let mut session = Self {
            rng: rng_state.to_rng(),
            rng_state,
            theme,
            player: Player::at(config.player_start()),
            obstacles: Vec::with_capacity(config.obstacle_count),
            run_state: RunState::Countdown(config.countdown_from),
            countdown: CountdownDisplay::Count(config.countdown_from),
            stats: RunStats::default(),
            config,
        };
        session.seed_obstacles();
        session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    /// Return to `Countdown(initial)` with a fresh player and obstacle window.
    /// The RNG stream continues, so bar placement differs from the previous run.
    pub fn reset(&mut self) {
        self.player = Player::at(self.config.player_start());
        self.seed_obstacles();
        self.run_state = RunState::Countdown(self.config.countdown_from);
        self.countdown = CountdownDisplay::Count(self.config.countdown_from);
        self.stats = RunStats::default();
    }

    /// Apply a steering command (valid in every run state)
    pub fn command(&mut self, command: Command) {
        input::apply(&mut self.player, command, &self.config);
    }

    pub fn move_left(&mut self) {
        self.command(Command::MoveLeft);
    }

    pub fn move_right(&mut self) {
        self.command(Command::MoveRight);
    }

    /// Descend and recycle the obstacle window, returning how many were replaced
    pub(crate) fn advance_obstacles(&mut self) -> usize {
        let max_x = self.config.max_obstacle_x();
        let rng = &mut self.rng;
        obstacles::advance(&mut self.obstacles, &self.config, || {
            rng.random_range(0.0..=max_x)
        })
    }

    fn seed_obstacles(&mut self) {
        let max_x = self.config.max_obstacle_x();
        let rng = &mut self.rng;
        obstacles::seed_window(&mut self.obstacles, &self.config, || {
            rng.random_range(0.0..=max_x)
        });
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player: self.player.pos,
            obstacles: self.obstacles.iter().map(|o| o.pos).collect(),
            countdown: self.countdown,
            run_state: self.run_state,
            theme: self.theme,
            stats: self.stats,
        }
    }
}
