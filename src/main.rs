//! Fly High entry point
//!
//! Headless demo: drives one session in real time with the autopilot steering
//! and logs what a presentation layer would draw.
//!
//! Usage: `fly-high [config.json] [--dark]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::cell::Cell;
    use std::error::Error;
    use std::rc::Rc;
    use std::thread;
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use fly_high::sim::CountdownDisplay;
    use fly_high::{GameConfig, GameHost, GameListener, SessionHandle, autopilot};

    /// Runs to play before tearing the session down
    const DEMO_RUNS: u32 = 3;
    const FRAME: Duration = Duration::from_millis(16);
    /// Autopilot reaction time
    const STEER_INTERVAL: Duration = Duration::from_millis(90);
    const REPORT_INTERVAL: Duration = Duration::from_secs(1);

    /// Counts game-over notifications so the loop can acknowledge them
    struct GameOverCounter(Rc<Cell<u32>>);

    impl GameListener for GameOverCounter {
        fn on_game_over(&mut self, handle: SessionHandle) {
            log::info!("Session {handle}: you fell down!");
            self.0.set(self.0.get() + 1);
        }

        fn on_countdown(&mut self, handle: SessionHandle, display: CountdownDisplay) {
            log::info!("Session {handle}: {}", display.label());
        }
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        let mut dark_mode = false;
        let mut config = GameConfig::default();
        for arg in std::env::args().skip(1) {
            if arg == "--dark" {
                dark_mode = true;
            } else {
                config = GameConfig::load(&arg)?;
            }
        }

        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        let mut host = GameHost::new(config, seed)?;
        let game_overs = Rc::new(Cell::new(0));
        host.set_listener(Box::new(GameOverCounter(Rc::clone(&game_overs))));

        let handle = host.start_session(dark_mode)?;
        let mut acknowledged = 0;
        let mut last = Instant::now();
        let mut last_steer = last;
        let mut last_report = last;

        loop {
            thread::sleep(FRAME);
            let now = Instant::now();
            host.advance(handle, now - last)?;
            last = now;

            if now - last_steer >= STEER_INTERVAL {
                if let Some(command) = autopilot::steer(host.session(handle)?) {
                    host.command(handle, command)?;
                }
                last_steer = now;
            }

            if now - last_report >= REPORT_INTERVAL {
                let snapshot = host.snapshot(handle)?;
                log::info!("{}", serde_json::to_string(&snapshot)?);
                last_report = now;
            }

            if game_overs.get() > acknowledged {
                acknowledged = game_overs.get();
                if acknowledged >= DEMO_RUNS {
                    break;
                }
                host.reset_session(handle)?;
            }
        }

        host.teardown_session(handle)?;
        log::info!("Demo finished after {DEMO_RUNS} runs");
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Fly High (headless) starting...");

    match native::run() {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the embedding page on wasm
}
