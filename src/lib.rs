//! Smash - a Breakout-style arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball, paddle, blocks, power-ups, session)
//! - `config`: Immutable game configuration
//! - `level`: Plain-text level grids and the cell table that keys them
//! - `error`: Construction-time failures

pub mod config;
pub mod error;
pub mod level;
pub mod sim;

pub use config::{BallConfig, GameConfig, PaddleConfig};
pub use error::{ConfigError, LevelError, ReplayError, SessionError};
pub use level::{BlockTable, CellSpec, Level, PowerUpSpec};

/// Default configuration values
pub mod consts {
    /// Playfield dimensions (px)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 700.0;

    /// Simulation rate (30 Hz)
    pub const TICK_RATE: u32 = 30;
    /// Maximum ticks drained per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the driver will accumulate (seconds)
    pub const MAX_FRAME_TIME: f32 = 0.25;

    /// Block grid
    pub const BLOCK_DIM: f32 = 32.0;
    pub const BLOCK_GUTTER: f32 = 1.0;
    pub const BLOCK_ROWS: usize = 7;
    pub const BLOCK_COLS: usize = 20;
    pub const TOP_MARGIN: f32 = 10.0;

    /// Ball defaults
    pub const BALL_SPEED: f32 = 200.0; // px/s
    pub const BALL_RADIUS: f32 = 8.0;
    pub const LARGE_BALL_RADIUS: f32 = 16.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 50.0;
    pub const PADDLE_SPEED: f32 = 200.0; // px/s
}
