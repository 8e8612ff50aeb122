//! Game configuration
//!
//! One immutable struct handed to the session at construction. Loadable from
//! JSON; any field left out keeps its default.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Ball tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    /// Speed in px/s
    pub speed: f32,
    pub default_radius: f32,
    /// Radius while a LargeBall power-up is active
    pub large_radius: f32,
    pub start_position: Vec2,
    /// Initial heading; normalized when the ball is built
    pub start_direction: Vec2,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            speed: BALL_SPEED,
            default_radius: BALL_RADIUS,
            large_radius: LARGE_BALL_RADIUS,
            start_position: Vec2::new(100.0, 100.0),
            start_direction: Vec2::new(-1.0, 1.0),
        }
    }
}

/// Paddle tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleConfig {
    pub width: f32,
    pub height: f32,
    /// Keyboard movement speed in px/s
    pub speed: f32,
}

impl Default for PaddleConfig {
    fn default() -> Self {
        Self {
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Timing ===
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Cap on ticks drained in one frame
    pub max_substeps: u32,
    /// Frame deltas longer than this are clamped (seconds)
    pub max_frame_time: f32,

    // === Block grid ===
    pub block_dim: f32,
    /// Grid capacity used for centering; levels may not exceed it
    pub block_rows: usize,
    pub block_cols: usize,
    pub top_margin: f32,

    pub ball: BallConfig,
    pub paddle: PaddleConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            tick_rate: TICK_RATE,
            max_substeps: MAX_SUBSTEPS,
            max_frame_time: MAX_FRAME_TIME,

            block_dim: BLOCK_DIM,
            block_rows: BLOCK_ROWS,
            block_cols: BLOCK_COLS,
            top_margin: TOP_MARGIN,

            ball: BallConfig::default(),
            paddle: PaddleConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Fixed simulation timestep in seconds
    #[inline]
    pub fn tick_duration(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    /// Distance between neighbouring block origins
    #[inline]
    pub fn block_pitch(&self) -> f32 {
        self.block_dim + BLOCK_GUTTER
    }

    /// Lower-left corner of grid cell (0, 0)
    pub fn grid_origin(&self) -> Vec2 {
        let pitch = self.block_pitch();
        // Center horizontally
        let x = (self.screen_width - pitch * self.block_cols as f32) / 2.0;
        // Flush to the top margin
        let y = self.screen_height - pitch * (self.block_rows + 1) as f32 - self.top_margin;
        Vec2::new(x, y)
    }

    /// Reject configs the simulation cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return invalid("screen dimensions must be positive");
        }
        if self.tick_rate == 0 {
            return invalid("tick_rate must be at least 1");
        }
        if self.max_substeps == 0 {
            return invalid("max_substeps must be at least 1");
        }
        if !(self.max_frame_time > 0.0) {
            return invalid("max_frame_time must be positive");
        }
        if !(self.block_dim > 0.0) {
            return invalid("block_dim must be positive");
        }
        if !(self.ball.default_radius > 0.0) {
            return invalid("ball.default_radius must be positive");
        }
        if self.ball.large_radius < self.ball.default_radius {
            return invalid("ball.large_radius must not be smaller than ball.default_radius");
        }
        let diameter = 2.0 * self.ball.large_radius;
        if diameter > self.screen_width || diameter > self.screen_height {
            return invalid("ball.large_radius does not fit on the screen");
        }
        if !(self.ball.speed >= 0.0) {
            return invalid("ball.speed must not be negative");
        }
        if self.ball.start_direction.length_squared() == 0.0 {
            return invalid("ball.start_direction must be non-zero");
        }
        if !(self.paddle.width > 0.0 && self.paddle.height > 0.0) {
            return invalid("paddle dimensions must be positive");
        }
        if self.paddle.width > self.screen_width {
            return invalid("paddle is wider than the screen");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.tick_duration() - 1.0 / 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_grid_origin() {
        let config = GameConfig::default();
        let origin = config.grid_origin();
        // (800 - 33 * 20) / 2
        assert_eq!(origin.x, 70.0);
        // 700 - 33 * 8 - 10
        assert_eq!(origin.y, 426.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "tick_rate": 60, "paddle": { "width": 64 } }"#)
            .unwrap();
        assert_eq!(config.tick_rate, 60);
        assert_eq!(config.paddle.width, 64.0);
        assert_eq!(config.paddle.height, PADDLE_HEIGHT);
        assert_eq!(config.screen_width, SCREEN_WIDTH);
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(matches!(
            GameConfig::from_json(r#"{ "tick_rate": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "ball": { "large_radius": 4 } }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "ball": { "large_radius": 400 } }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "paddle": { "width": 900 } }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
