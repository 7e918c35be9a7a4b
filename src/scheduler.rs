//! One scheduler, two cooperating repeating tasks
//!
//! The tick task drives the simulation; the countdown task drives the pre-roll.
//! Both are advanced from elapsed wall time and fire in chronological order,
//! so they never race over the session.

use std::time::Duration;

use crate::consts::MAX_SUBSTEPS;
use crate::sim::{GameEvent, RunState, Session, countdown_step, tick};

/// A repeating timer with an accumulator
#[derive(Debug, Clone)]
pub struct RepeatingTask {
    period: Duration,
    accumulated: Duration,
    armed: bool,
}

impl RepeatingTask {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            accumulated: Duration::ZERO,
            armed: true,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Arm the task; a newly armed task starts a full period from now
    pub fn arm(&mut self) {
        if !self.armed {
            self.armed = true;
            self.accumulated = Duration::ZERO;
        }
    }

    pub fn disarm(&mut self) {
        self.armed = false;
        self.accumulated = Duration::ZERO;
    }

    /// Time until the next fire, `None` while disarmed
    fn until_due(&self) -> Option<Duration> {
        self.armed
            .then(|| self.period.saturating_sub(self.accumulated))
    }

    fn is_due(&self) -> bool {
        self.armed && self.accumulated >= self.period
    }

    fn elapse(&mut self, dt: Duration) {
        if self.armed {
            self.accumulated += dt;
        }
    }

    fn fire(&mut self) {
        self.accumulated -= self.period;
    }
}

/// Drives one session's tick and countdown tasks
#[derive(Debug, Clone)]
pub struct Scheduler {
    tick_task: RepeatingTask,
    countdown_task: RepeatingTask,
    max_frame_delta: Duration,
    cancelled: bool,
}

impl Scheduler {
    /// Create a scheduler whose tasks match the session's current run state
    pub fn for_session(session: &Session) -> Self {
        let config = session.config();
        let mut scheduler = Self {
            tick_task: RepeatingTask::new(config.tick_interval()),
            countdown_task: RepeatingTask::new(config.countdown_interval()),
            max_frame_delta: config.max_frame_delta(),
            cancelled: false,
        };
        scheduler.sync(session.run_state);
        scheduler
    }

    pub fn tick_task(&self) -> &RepeatingTask {
        &self.tick_task
    }

    pub fn countdown_task(&self) -> &RepeatingTask {
        &self.countdown_task
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Stop both tasks for good. Further advances do nothing.
    pub fn cancel(&mut self) {
        self.tick_task.disarm();
        self.countdown_task.disarm();
        self.cancelled = true;
    }

    /// Restart both tasks from zero after the session was reset
    pub fn rearm(&mut self, session: &Session) {
        if self.cancelled {
            return;
        }
        self.tick_task.disarm();
        self.countdown_task.disarm();
        self.sync(session.run_state);
    }

    /// Feed `elapsed` wall time and run every task that falls due, in order.
    ///
    /// Elapsed time is clamped to the configured frame delta and at most
    /// `MAX_SUBSTEPS` ticks fire per call; surplus tick time is dropped.
    /// When both tasks fall due at the same instant the countdown runs first.
    pub fn advance(&mut self, session: &mut Session, elapsed: Duration) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.cancelled {
            return events;
        }

        let mut remaining = elapsed.min(self.max_frame_delta);
        let mut substeps = 0;

        loop {
            let next_tick = if substeps < MAX_SUBSTEPS {
                self.tick_task.until_due()
            } else {
                None
            };
            let step = match (self.countdown_task.until_due(), next_tick) {
                (Some(a), Some(b)) => a.min(b),
                (Some(a), None) | (None, Some(a)) => a,
                (None, None) => break,
            };
            if step > remaining {
                break;
            }

            self.countdown_task.elapse(step);
            self.tick_task.elapse(step);
            remaining -= step;

            if self.countdown_task.is_due() {
                self.countdown_task.fire();
                events.extend(countdown_step(session));
                self.sync(session.run_state);
            }
            if substeps < MAX_SUBSTEPS && self.tick_task.is_due() {
                self.tick_task.fire();
                events.extend(tick(session));
                substeps += 1;
                self.sync(session.run_state);
            }
        }

        self.countdown_task.elapse(remaining);
        self.tick_task.elapse(remaining);

        if substeps == MAX_SUBSTEPS && self.tick_task.is_due() {
            let backlog = self.tick_task.accumulated;
            let ticks = backlog.as_nanos() / self.tick_task.period().as_nanos();
            log::warn!(
                "Dropping {ticks} ticks ({backlog:?}) of backlog after {MAX_SUBSTEPS} substeps"
            );
            self.tick_task.accumulated = Duration::ZERO;
        }

        events
    }

    /// Arm exactly the tasks the run state needs
    fn sync(&mut self, state: RunState) {
        match state {
            RunState::Countdown(_) => {
                self.countdown_task.arm();
                self.tick_task.arm();
            }
            RunState::Running => {
                self.countdown_task.disarm();
                self.tick_task.arm();
            }
            RunState::GameOver => {
                self.countdown_task.disarm();
                self.tick_task.disarm();
            }
        }
    }
}
