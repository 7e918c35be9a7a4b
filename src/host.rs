//! Presentation-facing entry points
//!
//! The host owns at most one live session (the game screen) and hands out
//! opaque handles for it. Commands against a stale handle are errors.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{GameConfig, Theme};
use crate::error::{ConfigError, SessionError};
use crate::scheduler::Scheduler;
use crate::sim::{Command, CountdownDisplay, GameEvent, Session, Snapshot};

/// Opaque reference to a session started on a `GameHost`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionHandle(u64);

impl SessionHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Receives notifications from running sessions
pub trait GameListener {
    /// The run ended. Call `GameHost::reset_session` to acknowledge.
    fn on_game_over(&mut self, handle: SessionHandle);

    fn on_bounce(&mut self, _handle: SessionHandle, _obstacle: usize) {}

    fn on_countdown(&mut self, _handle: SessionHandle, _display: CountdownDisplay) {}
}

struct ActiveSession {
    handle: SessionHandle,
    session: Session,
    scheduler: Scheduler,
}

pub struct GameHost {
    config: GameConfig,
    base_seed: u64,
    next_id: u64,
    active: Option<ActiveSession>,
    listener: Option<Box<dyn GameListener>>,
}

impl GameHost {
    pub fn new(config: GameConfig, base_seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            base_seed,
            next_id: 1,
            active: None,
            listener: None,
        })
    }

    pub fn set_listener(&mut self, listener: Box<dyn GameListener>) {
        self.listener = Some(listener);
    }

    pub fn active_handle(&self) -> Option<SessionHandle> {
        self.active.as_ref().map(|a| a.handle)
    }

    /// Start the game screen's session in its countdown
    pub fn start_session(&mut self, is_dark_mode: bool) -> Result<SessionHandle, SessionError> {
        if let Some(active) = &self.active {
            return Err(SessionError::AlreadyActive(active.handle));
        }

        let handle = SessionHandle(self.next_id);
        self.next_id += 1;

        // Distinct but reproducible seed per session
        let seed = self
            .base_seed
            .wrapping_add(handle.0.wrapping_mul(2654435761));
        let theme = Theme::from_dark_mode(is_dark_mode);
        let session = Session::from_validated(self.config.clone(), seed, theme);
        let scheduler = Scheduler::for_session(&session);

        log::info!("Session {handle} started ({} theme, seed {seed})", theme.as_str());
        self.active = Some(ActiveSession {
            handle,
            session,
            scheduler,
        });
        Ok(handle)
    }

    pub fn move_left(&mut self, handle: SessionHandle) -> Result<(), SessionError> {
        self.command(handle, Command::MoveLeft)
    }

    pub fn move_right(&mut self, handle: SessionHandle) -> Result<(), SessionError> {
        self.command(handle, Command::MoveRight)
    }

    pub fn command(&mut self, handle: SessionHandle, command: Command) -> Result<(), SessionError> {
        self.get_mut(handle)?.session.command(command);
        Ok(())
    }

    /// Run the session's tasks for `elapsed` wall time and notify the listener
    pub fn advance(
        &mut self,
        handle: SessionHandle,
        elapsed: Duration,
    ) -> Result<Vec<GameEvent>, SessionError> {
        let active = self.get_mut(handle)?;
        let events = active.scheduler.advance(&mut active.session, elapsed);
        let countdown = active.session.countdown;

        if let Some(listener) = self.listener.as_mut() {
            for event in &events {
                match event {
                    GameEvent::GameOver(_) => listener.on_game_over(handle),
                    GameEvent::Bounced { obstacle } => listener.on_bounce(handle, *obstacle),
                    GameEvent::Countdown(n) => {
                        listener.on_countdown(handle, CountdownDisplay::Count(*n))
                    }
                    GameEvent::RunStarted => listener.on_countdown(handle, countdown),
                    GameEvent::ObstaclesRecycled(_) => {}
                }
            }
        }
        Ok(events)
    }

    /// Acknowledge game over (or restart mid-run): back to `Countdown(initial)`
    pub fn reset_session(&mut self, handle: SessionHandle) -> Result<(), SessionError> {
        let active = self.get_mut(handle)?;
        active.session.reset();
        active.scheduler.rearm(&active.session);
        log::info!("Session {handle} reset");
        Ok(())
    }

    /// Cancel both tasks and release the session
    pub fn teardown_session(&mut self, handle: SessionHandle) -> Result<(), SessionError> {
        self.get_mut(handle)?;
        if let Some(mut active) = self.active.take() {
            active.scheduler.cancel();
            log::info!("Session {handle} torn down");
        }
        Ok(())
    }

    pub fn snapshot(&self, handle: SessionHandle) -> Result<Snapshot, SessionError> {
        Ok(self.get(handle)?.session.snapshot())
    }

    pub fn session(&self, handle: SessionHandle) -> Result<&Session, SessionError> {
        Ok(&self.get(handle)?.session)
    }

    pub fn session_mut(&mut self, handle: SessionHandle) -> Result<&mut Session, SessionError> {
        Ok(&mut self.get_mut(handle)?.session)
    }

    fn get(&self, handle: SessionHandle) -> Result<&ActiveSession, SessionError> {
        self.active
            .as_ref()
            .filter(|a| a.handle == handle)
            .ok_or(SessionError::InvalidSession(handle))
    }

    fn get_mut(&mut self, handle: SessionHandle) -> Result<&mut ActiveSession, SessionError> {
        self.active
            .as_mut()
            .filter(|a| a.handle == handle)
            .ok_or(SessionError::InvalidSession(handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::RunState;

    fn host() -> GameHost {
        GameHost::new(GameConfig::default(), 99).unwrap()
    }

    #[test]
    fn test_start_twice_is_already_active() {
        let mut host = host();
        let handle = host.start_session(false).unwrap();
        assert_eq!(
            host.start_session(true),
            Err(SessionError::AlreadyActive(handle))
        );
    }

    #[test]
    fn test_stale_handle_is_invalid() {
        let mut host = host();
        let handle = host.start_session(false).unwrap();
        host.teardown_session(handle).unwrap();

        assert_eq!(host.move_left(handle), Err(SessionError::InvalidSession(handle)));
        assert_eq!(host.move_right(handle), Err(SessionError::InvalidSession(handle)));
        assert_eq!(
            host.teardown_session(handle),
            Err(SessionError::InvalidSession(handle))
        );
        assert!(host.snapshot(handle).is_err());
        assert!(host.active_handle().is_none());

        // A new session gets a fresh handle; the old one stays invalid
        let next = host.start_session(false).unwrap();
        assert_ne!(next, handle);
        assert!(host.reset_session(handle).is_err());
        assert!(host.reset_session(next).is_ok());
    }

    #[test]
    fn test_theme_round_trip() {
        let mut host = host();
        let handle = host.start_session(true).unwrap();
        assert_eq!(host.snapshot(handle).unwrap().theme, Theme::Dark);
        assert_eq!(host.session(handle).unwrap().run_state, RunState::Countdown(3));
    }

    #[test]
    fn test_handle_display() {
        assert_eq!(SessionHandle(4).to_string(), "#4");
        assert_eq!(SessionHandle(4).id(), 4);
    }
}
