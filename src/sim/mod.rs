//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (obstacle window order)
//! - No rendering, timer or platform dependencies

pub mod collision;
pub mod input;
pub mod obstacles;
pub mod physics;
pub mod session;
pub mod state;
pub mod tick;

pub use collision::{Landing, find_landing, resolve_bounce};
pub use input::Command;
pub use session::{Session, Snapshot};
pub use state::{CountdownDisplay, GameEvent, Obstacle, Player, RunState, RunStats};
pub use tick::{countdown_step, tick};
