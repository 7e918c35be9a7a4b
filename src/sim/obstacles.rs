//! Obstacle stream: a fixed-size rolling window of descending bars
//!
//! Bars enter above the view, descend at constant speed and are replaced once
//! they leave through the bottom edge. Spacing between successive bars is
//! always `obstacle_gap`, so there is always a next bar to aim for.

use super::state::Obstacle;
use crate::config::GameConfig;

/// Re-draws allowed before a placement falls back to the range center
pub const MAX_REDRAWS: u32 = 16;

/// Draw a horizontal offset in `[0, max_x]` from `sample`.
///
/// Non-finite or out-of-range draws are discarded and re-drawn.
pub fn draw_x(max_x: f32, mut sample: impl FnMut() -> f32) -> f32 {
    for _ in 0..MAX_REDRAWS {
        let x = sample();
        if x.is_finite() && (0.0..=max_x).contains(&x) {
            return x;
        }
        log::warn!("Rejected obstacle placement draw {x} (range 0..={max_x})");
    }
    log::warn!("Placement source exhausted {MAX_REDRAWS} draws, centering obstacle");
    max_x / 2.0
}

/// Replace the window with a fresh staggered column at `y = 0, -gap, -2gap, ...`
pub fn seed_window(
    obstacles: &mut Vec<Obstacle>,
    config: &GameConfig,
    mut sample: impl FnMut() -> f32,
) {
    let max_x = config.max_obstacle_x();
    obstacles.clear();
    obstacles.extend((0..config.obstacle_count).map(|i| {
        let x = draw_x(max_x, &mut sample);
        Obstacle::new(x, -(i as f32) * config.obstacle_gap)
    }));
}

/// Descend every obstacle, drop those past the bottom edge and refill the window.
///
/// Returns the number of obstacles recycled this tick.
pub fn advance(
    obstacles: &mut Vec<Obstacle>,
    config: &GameConfig,
    mut sample: impl FnMut() -> f32,
) -> usize {
    for obstacle in obstacles.iter_mut() {
        obstacle.pos.y += config.descent_speed;
    }
    obstacles.retain(|o| o.pos.y < config.playfield_height);

    let max_x = config.max_obstacle_x();
    let mut recycled = 0;
    while obstacles.len() < config.obstacle_count {
        let y = match topmost_y(obstacles) {
            Some(min_y) => min_y - config.obstacle_gap,
            None => 0.0,
        };
        let x = draw_x(max_x, &mut sample);
        obstacles.push(Obstacle::new(x, y));
        recycled += 1;
    }

    if recycled > 0 {
        log::debug!("Recycled {recycled} obstacle(s)");
    }
    recycled
}

/// Smallest y in the window (the bar furthest above the view)
pub fn topmost_y(obstacles: &[Obstacle]) -> Option<f32> {
    obstacles.iter().map(|o| o.pos.y).reduce(f32::min)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(x: f32) -> impl FnMut() -> f32 {
        move || x
    }

    #[test]
    fn test_seed_window_staggered() {
        let config = GameConfig::default();
        let mut obstacles = Vec::new();
        seed_window(&mut obstacles, &config, fixed(42.0));

        assert_eq!(obstacles.len(), config.obstacle_count);
        for (i, obstacle) in obstacles.iter().enumerate() {
            assert_eq!(obstacle.pos.x, 42.0);
            assert_eq!(obstacle.pos.y, -(i as f32) * 100.0);
        }
    }

    #[test]
    fn test_advance_descends_without_recycling() {
        let config = GameConfig::default();
        let mut obstacles = Vec::new();
        seed_window(&mut obstacles, &config, fixed(10.0));
        let before = obstacles.clone();

        let recycled = advance(&mut obstacles, &config, fixed(10.0));
        assert_eq!(recycled, 0);
        for (old, new) in before.iter().zip(&obstacles) {
            assert_eq!(new.pos.y, old.pos.y + config.descent_speed);
            assert_eq!(new.pos.x, old.pos.x);
        }
    }

    #[test]
    fn test_recycle_spaced_above_topmost() {
        let config = GameConfig::default();
        let mut obstacles = vec![
            Obstacle::new(0.0, 795.0),
            Obstacle::new(50.0, 300.0),
            Obstacle::new(60.0, -120.0),
        ];
        let config = GameConfig {
            obstacle_count: 3,
            ..config
        };

        let recycled = advance(&mut obstacles, &config, fixed(200.0));
        assert_eq!(recycled, 1);
        assert_eq!(obstacles.len(), 3);
        // Survivors at 307 and -113; new bar one gap above the topmost
        let new = obstacles[2];
        assert_eq!(new.pos, glam::Vec2::new(200.0, -213.0));
    }

    #[test]
    fn test_refill_from_empty_starts_at_zero() {
        let config = GameConfig {
            obstacle_count: 3,
            ..Default::default()
        };
        let mut obstacles = vec![Obstacle::new(0.0, 900.0)];

        advance(&mut obstacles, &config, fixed(5.0));
        let ys: Vec<f32> = obstacles.iter().map(|o| o.pos.y).collect();
        assert_eq!(ys, vec![0.0, -100.0, -200.0]);
    }

    #[test]
    fn test_removal_at_bottom_edge() {
        let config = GameConfig {
            obstacle_count: 1,
            ..Default::default()
        };
        // 793 + 7 lands exactly on the bottom edge and is removed
        let mut obstacles = vec![Obstacle::new(0.0, 793.0)];
        assert_eq!(advance(&mut obstacles, &config, fixed(1.0)), 1);

        let mut obstacles = vec![Obstacle::new(0.0, 792.0)];
        assert_eq!(advance(&mut obstacles, &config, fixed(1.0)), 0);
        assert_eq!(obstacles[0].pos.y, 799.0);
    }

    #[test]
    fn test_draw_x_rejects_non_finite() {
        let mut draws = vec![f32::NAN, f32::INFINITY, -5.0, 301.0, 120.0].into_iter();
        let x = draw_x(300.0, || draws.next().unwrap_or(0.0));
        assert_eq!(x, 120.0);
    }

    #[test]
    fn test_draw_x_falls_back_to_center() {
        let x = draw_x(300.0, || f32::NAN);
        assert_eq!(x, 150.0);
    }

    #[test]
    fn test_topmost_y() {
        assert_eq!(topmost_y(&[]), None);
        let obstacles = [Obstacle::new(0.0, 10.0), Obstacle::new(0.0, -40.0)];
        assert_eq!(topmost_y(&obstacles), Some(-40.0));
    }
}
