//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Pre-roll; obstacles move but the player is frozen
    Countdown(u32),
    /// Active gameplay
    Running,
    /// Player fell out of the playfield, waiting for acknowledgment
    GameOver,
}

impl RunState {
    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }
}

/// What the countdown overlay should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountdownDisplay {
    Count(u32),
    /// The "go" cue shown once the countdown has elapsed
    Ready,
}

impl CountdownDisplay {
    pub const READY_LABEL: &'static str = "Let's go!";

    pub fn label(&self) -> String {
        match self {
            CountdownDisplay::Count(n) => n.to_string(),
            CountdownDisplay::Ready => Self::READY_LABEL.to_string(),
        }
    }
}

/// A descending bar the player lands on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner; y grows downward, negative is above the view
    pub pos: Vec2,
}

impl Obstacle {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }
}

/// The falling player body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner of the body's bounding square
    pub pos: Vec2,
    /// Vertical velocity per tick (positive = falling)
    pub vy: f32,
}

impl Player {
    pub fn at(pos: Vec2) -> Self {
        Self { pos, vy: 0.0 }
    }
}

/// Per-run counters, cleared on reset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Ticks simulated while running
    pub ticks: u64,
    pub bounces: u32,
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Notable things that happened during a tick or countdown step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Countdown moved to a new value
    Countdown(u32),
    /// Countdown elapsed; physics is live
    RunStarted,
    /// Obstacles left through the bottom edge and were replaced
    ObstaclesRecycled(usize),
    /// Player bounced off the obstacle at this window index
    Bounced { obstacle: usize },
    /// Player fell out of the playfield
    GameOver(RunStats),
}
