//! Level grids and the cell table that keys them
//!
//! A level is plain text: one row per line, a space is an empty cell and any
//! other character is a block whose look and payload come from the
//! [`BlockTable`] entry for that character.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, LevelError};
use crate::sim::PowerUpKind;

/// The level bundled with the game
pub const CHECKER_BOARD: &str = include_str!("../levels/checker_board.level");

/// Rectangular-ish character grid, rows in file order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    rows: Vec<Vec<char>>,
}

impl Level {
    /// Parse a level from text. Rows may differ in length.
    pub fn parse(text: &str) -> Self {
        Self {
            rows: text.lines().map(|line| line.chars().collect()).collect(),
        }
    }

    /// Read a level file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    /// A level with no blocks at all
    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn rows(&self) -> &[Vec<char>] {
        &self.rows
    }

    /// Non-empty cells in row-major order as (row, column, cell)
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, char)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .filter(|&(_, &cell)| cell != ' ')
                .map(move |(column, &cell)| (row, column, cell))
        })
    }

    /// Number of blocks this level will produce
    pub fn block_count(&self) -> usize {
        self.cells().count()
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::parse(CHECKER_BOARD)
    }
}

/// Power-up granted by a block category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUpSpec {
    pub kind: PowerUpKind,
    /// Seconds the effect lasts once granted
    pub lifetime: f32,
}

/// What a cell character stands for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSpec {
    /// Texture handle for the renderer
    pub texture: String,
    #[serde(default)]
    pub power_up: Option<PowerUpSpec>,
    /// Chance in [0, 1] that a block of this category carries `power_up`
    #[serde(default)]
    pub spawn_probability: f64,
}

/// Cell character -> block category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockTable {
    cells: BTreeMap<char, CellSpec>,
}

impl BlockTable {
    pub fn new() -> Self {
        Self {
            cells: BTreeMap::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builder-style insert
    pub fn with(mut self, cell: char, spec: CellSpec) -> Self {
        self.cells.insert(cell, spec);
        self
    }

    pub fn get(&self, cell: char) -> Option<&CellSpec> {
        self.cells.get(&cell)
    }

    /// Check every entry's probability and lifetime
    pub fn validate(&self) -> Result<(), LevelError> {
        for (&cell, spec) in &self.cells {
            if !(0.0..=1.0).contains(&spec.spawn_probability) {
                return Err(LevelError::InvalidProbability {
                    cell,
                    probability: spec.spawn_probability,
                });
            }
            if let Some(power_up) = spec.power_up {
                if !(power_up.lifetime > 0.0) {
                    return Err(LevelError::InvalidLifetime {
                        cell,
                        lifetime: power_up.lifetime,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for BlockTable {
    /// Red blocks carry a fireball, green ones a large ball, blue ones nothing
    fn default() -> Self {
        Self::new()
            .with(
                'r',
                CellSpec {
                    texture: "red_rectangle".to_string(),
                    power_up: Some(PowerUpSpec {
                        kind: PowerUpKind::FireBall,
                        lifetime: 2.0,
                    }),
                    spawn_probability: 0.9,
                },
            )
            .with(
                'b',
                CellSpec {
                    texture: "blue_rectangle".to_string(),
                    power_up: None,
                    spawn_probability: 1.0,
                },
            )
            .with(
                'g',
                CellSpec {
                    texture: "green_rectangle".to_string(),
                    power_up: Some(PowerUpSpec {
                        kind: PowerUpKind::LargeBall,
                        lifetime: 2.0,
                    }),
                    spawn_probability: 0.9,
                },
            )
    }
}
