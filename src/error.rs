//! Errors surfaced while building a session
//!
//! Everything past construction is infallible: the tick loop is pure
//! in-memory arithmetic.

use thiserror::Error;

/// Rejected configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Rejected level grid or cell table
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level: {0}")]
    Io(#[from] std::io::Error),
    #[error("no cell table entry for {cell:?} at row {row}, column {column}")]
    UnknownCell { cell: char, row: usize, column: usize },
    #[error("level has {rows} rows, grid holds at most {max}")]
    TooManyRows { rows: usize, max: usize },
    #[error("level row {row} has {columns} columns, grid holds at most {max}")]
    TooManyColumns { row: usize, columns: usize, max: usize },
    #[error("spawn probability {probability} for {cell:?} is outside [0, 1]")]
    InvalidProbability { cell: char, probability: f64 },
    #[error("power-up lifetime {lifetime} for {cell:?} must be positive")]
    InvalidLifetime { cell: char, lifetime: f32 },
}

/// Unreadable replay recording
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("malformed replay: {0}")]
    Json(#[from] serde_json::Error),
}

/// Any failure while constructing a [`crate::sim::GameSession`]
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Level(#[from] LevelError),
}
