//! Destructible blocks and the field that owns them

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Rectangle;
use super::power_up::{PowerUp, PowerUpId};
use crate::config::GameConfig;
use crate::error::LevelError;
use crate::level::{BlockTable, Level};

/// Sound played when a block breaks. Fire-and-forget: the simulation never
/// looks at whether the sound actually played.
pub trait AudioSink {
    fn play_hit(&mut self);
}

/// Audio sink that plays nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play_hit(&mut self) {}
}

impl<F: FnMut()> AudioSink for F {
    fn play_hit(&mut self) {
        self()
    }
}

/// A destructible block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub rectangle: Rectangle,
    /// Texture handle for the renderer
    pub texture: String,
    /// Granted to the ball when this block breaks
    pub power_up: Option<PowerUp>,
}

impl Block {
    pub fn new(rectangle: Rectangle, texture: impl Into<String>, power_up: Option<PowerUp>) -> Self {
        Self {
            rectangle,
            texture: texture.into(),
            power_up,
        }
    }

    pub fn hits(&self, ball_rect: &Rectangle) -> bool {
        self.rectangle.overlaps(ball_rect)
    }
}

/// All live blocks, kept in row-major load order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockField {
    blocks: Vec<Block>,
}

impl BlockField {
    /// Wrap already-placed blocks; scan order is the order given
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Lay a level out on the configured grid, drawing each block's power-up
    /// with one Bernoulli trial at its category's spawn probability
    pub fn from_level<R: Rng>(
        level: &Level,
        table: &BlockTable,
        config: &GameConfig,
        rng: &mut R,
    ) -> Result<Self, LevelError> {
        table.validate()?;

        // Only cells holding a block count against the grid; blank padding
        // is free
        if let Some(last_row) = level.cells().map(|(row, _, _)| row).max() {
            if last_row >= config.block_rows {
                return Err(LevelError::TooManyRows {
                    rows: last_row + 1,
                    max: config.block_rows,
                });
            }
        }
        if let Some((row, column, _)) = level
            .cells()
            .find(|&(_, column, _)| column >= config.block_cols)
        {
            return Err(LevelError::TooManyColumns {
                row,
                columns: column + 1,
                max: config.block_cols,
            });
        }

        let origin = config.grid_origin();
        let pitch = config.block_pitch();
        let mut blocks = Vec::with_capacity(level.block_count());

        for (row, column, cell) in level.cells() {
            let spec = table
                .get(cell)
                .ok_or(LevelError::UnknownCell { cell, row, column })?;

            let pos = origin + Vec2::new(column as f32, row as f32) * pitch;
            let rectangle = Rectangle::new(pos.x, pos.y, config.block_dim, config.block_dim);

            let spawned = rng.random_bool(spec.spawn_probability);
            let power_up = spec
                .power_up
                .filter(|_| spawned)
                .map(|p| PowerUp::new(PowerUpId(blocks.len() as u32), p.kind, p.lifetime));

            blocks.push(Block::new(rectangle, spec.texture.clone(), power_up));
        }

        let with_power_ups = blocks.iter().filter(|b| b.power_up.is_some()).count();
        log::info!(
            "Built block field: {} blocks, {} carrying power-ups",
            blocks.len(),
            with_power_ups
        );

        Ok(Self { blocks })
    }

    /// Remove and return the first block (in scan order) that overlaps
    /// `ball_rect`. At most one block goes per call even when several
    /// overlap.
    pub fn check_hit(&mut self, ball_rect: &Rectangle, audio: &mut dyn AudioSink) -> Option<Block> {
        let index = self.blocks.iter().position(|block| block.hits(ball_rect))?;
        // Vec::remove keeps the remaining blocks in scan order
        let block = self.blocks.remove(index);
        audio.play_hit();
        Some(block)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }
}
