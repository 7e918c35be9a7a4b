//! Game tuning and presentation preferences
//!
//! Every session carries its own copy, so concurrent sessions never share
//! tunables. Loaded from JSON; missing fields fall back to `consts`.

use std::path::Path;
use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Color theme requested by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_mode(is_dark_mode: bool) -> Self {
        if is_dark_mode { Theme::Dark } else { Theme::Light }
    }

    pub fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }
}

/// Which obstacle wins when several qualify for a bounce in the same tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BouncePriority {
    /// Highest qualifying obstacle (smallest y): the first surface a falling body meets
    #[default]
    Topmost,
    /// Last qualifying obstacle in window order (legacy behavior)
    LastInOrder,
}

/// Simulation tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    /// Vertical spacing between consecutive obstacles
    pub obstacle_gap: f32,
    /// Live window size (N)
    pub obstacle_count: usize,
    /// Descent per tick (S)
    pub descent_speed: f32,

    // === Player ===
    pub player_size: f32,
    /// Start position; `None` x means horizontally centered
    pub player_start_x: Option<f32>,
    pub player_start_y: f32,
    /// Distance per move command
    pub move_step: f32,

    // === Physics ===
    /// Velocity gained per tick (G)
    pub gravity: f32,
    /// Velocity set by a bounce, must be negative
    pub jump_velocity: f32,
    pub bounce_priority: BouncePriority,

    // === Timing ===
    pub countdown_from: u32,
    pub tick_interval_ms: u64,
    pub countdown_interval_ms: u64,
    pub max_frame_delta_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            obstacle_gap: OBSTACLE_GAP,
            obstacle_count: OBSTACLE_COUNT,
            descent_speed: DESCENT_SPEED,

            player_size: PLAYER_SIZE,
            player_start_x: None,
            player_start_y: PLAYER_START_Y,
            move_step: MOVE_STEP,

            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            bounce_priority: BouncePriority::default(),

            countdown_from: COUNTDOWN_FROM,
            tick_interval_ms: TICK_INTERVAL_MS,
            countdown_interval_ms: COUNTDOWN_INTERVAL_MS,
            max_frame_delta_ms: MAX_FRAME_DELTA_MS,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("obstacle_gap", self.obstacle_gap),
            ("descent_speed", self.descent_speed),
            ("player_size", self.player_size),
            ("player_start_y", self.player_start_y),
            ("move_step", self.move_step),
            ("gravity", self.gravity),
            ("jump_velocity", self.jump_velocity),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(format!("{name} must be finite")));
        }

        if self.playfield_width <= 0.0 || self.playfield_height <= 0.0 {
            return Err(invalid("playfield dimensions must be positive"));
        }
        if self.obstacle_width <= 0.0 || self.obstacle_width > self.playfield_width {
            return Err(invalid("obstacle_width must be in (0, playfield_width]"));
        }
        if self.obstacle_height <= 0.0 {
            return Err(invalid("obstacle_height must be positive"));
        }
        if self.player_size <= 0.0 || self.player_size > self.playfield_width {
            return Err(invalid("player_size must be in (0, playfield_width]"));
        }
        if let Some(x) = self.player_start_x {
            if !x.is_finite() || x < 0.0 || x > self.max_player_x() {
                return Err(invalid("player_start_x must lie inside the playfield"));
            }
        }
        if self.obstacle_count == 0 {
            return Err(invalid("obstacle_count must be at least 1"));
        }
        if self.obstacle_gap <= 0.0 {
            return Err(invalid("obstacle_gap must be positive"));
        }
        if self.descent_speed < 0.0 {
            return Err(invalid("descent_speed must not be negative"));
        }
        if self.move_step <= 0.0 {
            return Err(invalid("move_step must be positive"));
        }
        if self.jump_velocity >= 0.0 {
            return Err(invalid("jump_velocity must be negative (upward)"));
        }
        if self.countdown_from == 0 {
            return Err(invalid("countdown_from must be at least 1"));
        }
        if self.tick_interval_ms == 0 || self.countdown_interval_ms == 0 {
            return Err(invalid("timer intervals must be non-zero"));
        }
        if self.max_frame_delta_ms < self.tick_interval_ms {
            return Err(invalid("max_frame_delta_ms must cover at least one tick"));
        }
        Ok(())
    }

    /// Rightmost legal player x
    #[inline]
    pub fn max_player_x(&self) -> f32 {
        self.playfield_width - self.player_size
    }

    /// Rightmost legal obstacle x
    #[inline]
    pub fn max_obstacle_x(&self) -> f32 {
        self.playfield_width - self.obstacle_width
    }

    /// Player spawn position (horizontally centered unless overridden)
    pub fn player_start(&self) -> Vec2 {
        let x = self
            .player_start_x
            .unwrap_or(self.playfield_width / 2.0 - self.player_size / 2.0);
        Vec2::new(x, self.player_start_y)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn countdown_interval(&self) -> Duration {
        Duration::from_millis(self.countdown_interval_ms)
    }

    pub fn max_frame_delta(&self) -> Duration {
        Duration::from_millis(self.max_frame_delta_ms)
    }
}

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.player_start(), Vec2::new(175.0, 50.0));
        assert_eq!(config.max_obstacle_x(), 300.0);
        assert_eq!(config.max_player_x(), 350.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            GameConfig::from_json(r#"{ "gravity": 3.0, "bounce_priority": "LastInOrder" }"#)
                .unwrap();
        assert_eq!(config.gravity, 3.0);
        assert_eq!(config.bounce_priority, BouncePriority::LastInOrder);
        assert_eq!(config.obstacle_count, OBSTACLE_COUNT);
    }

    #[test]
    fn test_rejects_bad_values() {
        let downward_jump = GameConfig {
            jump_velocity: 5.0,
            ..Default::default()
        };
        assert!(matches!(downward_jump.validate(), Err(ConfigError::Invalid(_))));

        let wide_bar = GameConfig {
            obstacle_width: 500.0,
            ..Default::default()
        };
        assert!(wide_bar.validate().is_err());

        let empty_window = GameConfig {
            obstacle_count: 0,
            ..Default::default()
        };
        assert!(empty_window.validate().is_err());

        let nan_gravity = GameConfig {
            gravity: f32::NAN,
            ..Default::default()
        };
        assert!(nan_gravity.validate().is_err());

        let off_field = GameConfig {
            player_start_x: Some(390.0),
            ..Default::default()
        };
        assert!(off_field.validate().is_err());

        // Countdown(0) would sit frozen for a whole interval before running
        let no_countdown = GameConfig {
            countdown_from: 0,
            ..Default::default()
        };
        assert!(matches!(no_countdown.validate(), Err(ConfigError::Invalid(_))));
        assert!(GameConfig::from_json(r#"{ "countdown_from": 0 }"#).is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_theme_from_flag() {
        assert_eq!(Theme::from_dark_mode(true), Theme::Dark);
        assert_eq!(Theme::from_dark_mode(false), Theme::Light);
        assert!(Theme::Dark.is_dark());
        assert_eq!(Theme::Light.as_str(), "Light");
    }
}
