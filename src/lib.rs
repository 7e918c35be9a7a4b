//! Fly High - An endless falling-and-bouncing obstacle dodger
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, run state)
//! - `scheduler`: Tick and countdown tasks driven by elapsed time
//! - `host`: Session handles and presentation-facing entry points
//! - `autopilot`: Idle/demo steering
//! - `config`: Data-driven game tuning

pub mod autopilot;
pub mod config;
pub mod error;
pub mod host;
pub mod scheduler;
pub mod sim;

pub use config::{BouncePriority, GameConfig, Theme};
pub use error::{ConfigError, SessionError};
pub use host::{GameHost, GameListener, SessionHandle};
pub use scheduler::Scheduler;
pub use sim::{GameEvent, Session, Snapshot};

/// Default tuning values
pub mod consts {
    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 400.0;
    pub const PLAYFIELD_HEIGHT: f32 = 800.0;

    /// Obstacle ("bar") dimensions
    pub const OBSTACLE_WIDTH: f32 = 100.0;
    pub const OBSTACLE_HEIGHT: f32 = 20.0;
    /// Vertical spacing between consecutive obstacles
    pub const OBSTACLE_GAP: f32 = 100.0;
    /// Live obstacle window size
    pub const OBSTACLE_COUNT: usize = 10;
    /// Obstacle descent per tick
    pub const DESCENT_SPEED: f32 = 7.0;

    /// Player body is a square of this side
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PLAYER_START_Y: f32 = 50.0;

    /// Velocity gained per tick while falling
    pub const GRAVITY: f32 = 2.0;
    /// Velocity set on bounce (negative = upward)
    pub const JUMP_VELOCITY: f32 = -15.0;
    /// Horizontal distance per move command
    pub const MOVE_STEP: f32 = 20.0;

    /// Countdown starts here before a run
    pub const COUNTDOWN_FROM: u32 = 3;
    /// Simulation tick interval
    pub const TICK_INTERVAL_MS: u64 = 30;
    /// Countdown step interval
    pub const COUNTDOWN_INTERVAL_MS: u64 = 1000;
    /// Elapsed time clamp per scheduler advance
    pub const MAX_FRAME_DELTA_MS: u64 = 250;
    /// Maximum ticks fired per advance to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}
