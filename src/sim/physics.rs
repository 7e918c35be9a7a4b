//! Vertical integration of the player body

use super::state::Player;

/// Advance the body by one tick of constant gravity.
///
/// Velocity is incremented first, but position moves by the velocity the body
/// had at the start of the tick. No terminal velocity, no position clamp.
#[inline]
pub fn integrate(player: &mut Player, gravity: f32) {
    let vy_prev = player.vy;
    player.vy += gravity;
    player.pos.y += vy_prev;
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_position_uses_previous_velocity() {
        let mut player = Player::at(Vec2::new(0.0, 50.0));
        integrate(&mut player, 2.0);
        assert_eq!(player.vy, 2.0);
        assert_eq!(player.pos.y, 50.0);

        integrate(&mut player, 2.0);
        assert_eq!(player.vy, 4.0);
        assert_eq!(player.pos.y, 52.0);

        integrate(&mut player, 2.0);
        assert_eq!(player.vy, 6.0);
        assert_eq!(player.pos.y, 56.0);
    }

    #[test]
    fn test_upward_velocity_decays() {
        let mut player = Player {
            pos: Vec2::new(10.0, 100.0),
            vy: -15.0,
        };
        integrate(&mut player, 2.0);
        assert_eq!(player.vy, -13.0);
        assert_eq!(player.pos.y, 85.0);
        assert_eq!(player.pos.x, 10.0);
    }

    #[test]
    fn test_no_terminal_velocity() {
        let mut player = Player::at(Vec2::ZERO);
        for _ in 0..1000 {
            integrate(&mut player, 2.0);
        }
        assert_eq!(player.vy, 2000.0);
    }
}
