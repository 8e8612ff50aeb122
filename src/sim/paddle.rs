//! The player's paddle

use serde::{Deserialize, Serialize};

use super::geometry::Rectangle;
use crate::config::GameConfig;

/// Keyboard movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Player-controlled rectangle, always kept inside the playfield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    rectangle: Rectangle,
    /// Keyboard speed in px/s
    speed: f32,
    screen_width: f32,
}

impl Paddle {
    /// Centered on the bottom edge
    pub fn new(config: &GameConfig) -> Self {
        let width = config.paddle.width;
        Self {
            rectangle: Rectangle::new(
                (config.screen_width - width) / 2.0,
                0.0,
                width,
                config.paddle.height,
            ),
            speed: config.paddle.speed,
            screen_width: config.screen_width,
        }
    }

    pub fn rectangle(&self) -> &Rectangle {
        &self.rectangle
    }

    pub fn x(&self) -> f32 {
        self.rectangle.x
    }

    pub fn width(&self) -> f32 {
        self.rectangle.width
    }

    /// Upper edge
    pub fn top(&self) -> f32 {
        self.rectangle.top()
    }

    /// Shift by `speed * delta` in `direction`, then clamp
    pub fn move_by(&mut self, delta: f32, direction: Direction) {
        self.rectangle.x += direction.sign() * self.speed * delta;
        self.clamp();
    }

    /// Jump to an absolute x (left edge), then clamp
    pub fn set_x(&mut self, x: f32) {
        self.rectangle.x = x;
        self.clamp();
    }

    /// Center the paddle on `x`, then clamp
    pub fn center_on(&mut self, x: f32) {
        self.set_x(x - self.rectangle.width / 2.0);
    }

    pub fn hits(&self, ball_rect: &Rectangle) -> bool {
        self.rectangle.overlaps(ball_rect)
    }

    fn clamp(&mut self) {
        let max_x = self.screen_width - self.rectangle.width;
        self.rectangle.x = self.rectangle.x.clamp(0.0, max_x);
        debug_assert!(self.rectangle.x >= 0.0 && self.rectangle.x <= max_x);
    }
}
