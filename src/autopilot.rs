//! Idle/demo mode steering
//!
//! Aims the body's center at the nearest reachable bar below it. Good enough
//! to keep a demo run alive for a while, not meant to be optimal.

use crate::config::GameConfig;
use crate::sim::{Command, Obstacle, Player, Session};

/// How far ahead `ticks_to_meet` simulates before giving up
const LOOKAHEAD_TICKS: u32 = 120;

/// The bar the autopilot is aiming for: the nearest one whose top is below
/// the body's bottom edge and that the body can line up with in time
pub fn target(session: &Session) -> Option<&Obstacle> {
    let config = session.config();
    let player = &session.player;
    let feet = player.pos.y + config.player_size;
    session
        .obstacles
        .iter()
        .filter(|o| o.pos.y >= feet && o.pos.y < config.playfield_height)
        .filter(|o| is_reachable(player, o, config))
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
}

/// Ticks until the body's bottom edge reaches the bar's top, assuming free fall
fn ticks_to_meet(player: &Player, obstacle: &Obstacle, config: &GameConfig) -> u32 {
    let mut feet = player.pos.y + config.player_size;
    let mut vy = player.vy;
    let mut top = obstacle.pos.y;
    for n in 1..=LOOKAHEAD_TICKS {
        feet += vy;
        vy += config.gravity;
        top += config.descent_speed;
        if feet >= top {
            return n;
        }
    }
    LOOKAHEAD_TICKS
}

/// Whether one move per tick can center the body on the bar before it arrives
fn is_reachable(player: &Player, obstacle: &Obstacle, config: &GameConfig) -> bool {
    let offset = center_offset(player, obstacle, config).abs();
    let moves = ticks_to_meet(player, obstacle, config) as f32;
    offset <= config.move_step * moves + config.move_step / 2.0
}

fn center_offset(player: &Player, obstacle: &Obstacle, config: &GameConfig) -> f32 {
    let body_center = player.pos.x + config.player_size / 2.0;
    let bar_center = obstacle.pos.x + config.obstacle_width / 2.0;
    bar_center - body_center
}

/// Next steering command, or `None` when already lined up (or nothing to aim at)
pub fn steer(session: &Session) -> Option<Command> {
    let config = session.config();
    let obstacle = target(session)?;

    let offset = center_offset(&session.player, obstacle, config);

    if offset.abs() < config.move_step / 2.0 {
        None
    } else if offset > 0.0 {
        Some(Command::MoveRight)
    } else {
        Some(Command::MoveLeft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, Theme};
    use glam::Vec2;

    fn session_with(bars: &[(f32, f32)]) -> Session {
        let mut session = Session::new(GameConfig::default(), 5, Theme::Light).unwrap();
        session.obstacles = bars.iter().map(|&(x, y)| Obstacle::new(x, y)).collect();
        session.player.pos = Vec2::new(175.0, 50.0);
        session
    }

    #[test]
    fn test_targets_nearest_bar_below() {
        let session = session_with(&[(0.0, 400.0), (300.0, 200.0), (0.0, -50.0)]);
        assert_eq!(target(&session).unwrap().pos, Vec2::new(300.0, 200.0));
        assert_eq!(steer(&session), Some(Command::MoveRight));
    }

    #[test]
    fn test_steers_left() {
        let session = session_with(&[(0.0, 300.0)]);
        assert_eq!(steer(&session), Some(Command::MoveLeft));
    }

    #[test]
    fn test_lined_up_holds_position() {
        // Bar center 200 matches body center 175 + 25
        let session = session_with(&[(150.0, 300.0)]);
        assert_eq!(steer(&session), None);
    }

    #[test]
    fn test_skips_bar_arriving_too_soon() {
        // Falling fast: the near bar on the far left is met next tick, one
        // step short of the 150 needed to line up
        let mut session = session_with(&[(0.0, 110.0), (150.0, 400.0)]);
        session.player.vy = 30.0;
        assert_eq!(target(&session).unwrap().pos, Vec2::new(150.0, 400.0));
        assert_eq!(steer(&session), None);

        // At rest the same near bar is many ticks away and worth chasing
        session.player.vy = 0.0;
        assert_eq!(target(&session).unwrap().pos, Vec2::new(0.0, 110.0));
        assert_eq!(steer(&session), Some(Command::MoveLeft));
    }

    #[test]
    fn test_nothing_below() {
        let session = session_with(&[(150.0, -300.0), (0.0, 20.0)]);
        assert!(target(&session).is_none());
        assert_eq!(steer(&session), None);
    }
}
