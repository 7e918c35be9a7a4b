//! Landing detection and bounce response
//!
//! A bounce happens only when the body is coming down onto a bar's top band.
//! Rising through a bar never bounces.

use super::state::{Obstacle, Player};
use crate::config::{BouncePriority, GameConfig};

/// Result of a landing check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landing {
    /// Window index of the obstacle landed on
    pub index: usize,
    /// Player y after snapping on top of the obstacle
    pub rest_y: f32,
}

/// Whether the body qualifies to bounce off `obstacle` this tick
pub fn lands_on(player: &Player, obstacle: &Obstacle, config: &GameConfig) -> bool {
    let p = player.pos;
    let o = obstacle.pos;

    let horizontal = p.x < o.x + config.obstacle_width && p.x + config.player_size > o.x;
    let vertical = p.y + config.player_size > o.y && p.y < o.y + config.obstacle_height;
    let descending = p.y + player.vy > o.y;

    horizontal && vertical && descending
}

/// Pick the obstacle the body lands on, if any, according to `config.bounce_priority`
pub fn find_landing(
    player: &Player,
    obstacles: &[Obstacle],
    config: &GameConfig,
) -> Option<Landing> {
    let mut hits = obstacles
        .iter()
        .enumerate()
        .filter(|(_, o)| lands_on(player, o, config));

    let (index, obstacle) = match config.bounce_priority {
        // min_by keeps the first of equal elements
        BouncePriority::Topmost => hits.min_by(|(_, a), (_, b)| a.pos.y.total_cmp(&b.pos.y)),
        BouncePriority::LastInOrder => hits.next_back(),
    }?;

    Some(Landing {
        index,
        rest_y: obstacle.pos.y - config.player_size,
    })
}

/// Resolve landings for this tick. Snaps the body on top of the chosen obstacle
/// and replaces its velocity with the jump velocity.
pub fn resolve_bounce(
    player: &mut Player,
    obstacles: &[Obstacle],
    config: &GameConfig,
) -> Option<Landing> {
    let landing = find_landing(player, obstacles, config)?;
    player.pos.y = landing.rest_y;
    player.vy = config.jump_velocity;
    Some(landing)
}
