//! Fixed timestep simulation tick and countdown step
//!
//! Per-tick order: physics, obstacle stream, landing, terminal check.
//! Steering commands are applied between ticks by the caller.

use super::collision;
use super::physics;
use super::session::Session;
use super::state::{CountdownDisplay, GameEvent, RunState};

/// Advance the session by one simulation tick
pub fn tick(session: &mut Session) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Nothing moves until the run is acknowledged
    if session.run_state == RunState::GameOver {
        return events;
    }

    let running = session.run_state.is_running();
    if running {
        physics::integrate(&mut session.player, session.config.gravity);
    }

    // Obstacles keep descending during the countdown
    let recycled = session.advance_obstacles();
    if recycled > 0 {
        events.push(GameEvent::ObstaclesRecycled(recycled));
    }

    if !running {
        return events;
    }

    session.stats.ticks += 1;

    let landing =
        collision::resolve_bounce(&mut session.player, &session.obstacles, &session.config);
    if let Some(landing) = landing {
        session.stats.bounces += 1;
        log::debug!(
            "Bounce off obstacle {} at y={}",
            landing.index,
            session.obstacles[landing.index].pos.y
        );
        events.push(GameEvent::Bounced {
            obstacle: landing.index,
        });
    }

    if session.player.pos.y > session.config.playfield_height {
        session.run_state = RunState::GameOver;
        log::info!(
            "Game over after {} ticks, {} bounces",
            session.stats.ticks,
            session.stats.bounces
        );
        events.push(GameEvent::GameOver(session.stats));
    }

    events
}

/// Advance the pre-roll countdown by one interval.
///
/// Returns `None` outside of `Countdown`.
pub fn countdown_step(session: &mut Session) -> Option<GameEvent> {
    match session.run_state {
        RunState::Countdown(n) if n > 1 => {
            session.run_state = RunState::Countdown(n - 1);
            session.countdown = CountdownDisplay::Count(n - 1);
            Some(GameEvent::Countdown(n - 1))
        }
        RunState::Countdown(_) => {
            session.run_state = RunState::Running;
            session.countdown = CountdownDisplay::Ready;
            log::info!("Countdown complete, run started");
            Some(GameEvent::RunStarted)
        }
        RunState::Running | RunState::GameOver => None,
    }
}
