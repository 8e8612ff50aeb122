//! The ball: movement, wall bounces, block/paddle response and power-ups

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Circle, Rectangle};
use super::power_up::{PowerUp, PowerUpId};
use crate::config::BallConfig;

/// Which texture the renderer should draw the ball with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BallSkin {
    #[default]
    Normal,
    Fire,
    Large,
}

/// What the ball collides against during one update
///
/// The session implements this over its block field and paddle; tests can
/// script it directly.
pub trait CollisionOracle {
    /// Break at most one block overlapping the ball's bounding rectangle and
    /// return that block's rectangle. May grant the ball a power-up before
    /// returning, in which case the bounce already honors it.
    fn check_block(&mut self, ball: &mut Ball) -> Option<Rectangle>;

    /// Whether the paddle overlaps the ball's bounding rectangle
    fn check_paddle(&mut self, ball: &Ball) -> bool;
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    position: Vec2,
    /// Unit heading
    direction: Vec2,
    /// px/s
    speed: f32,
    radius: f32,
    default_radius: f32,
    large_radius: f32,
    /// Square around the circle, used for every hit test
    rectangle: Rectangle,
    skin: BallSkin,
    /// Sign applied to the heading after breaking a block: -1 bounces,
    /// +1 passes straight through
    block_direction_change: f32,
    /// Active power-ups in grant order
    power_ups: Vec<PowerUp>,
}

impl Ball {
    pub fn new(config: &BallConfig) -> Self {
        let mut ball = Self {
            position: config.start_position,
            direction: config.start_direction.normalize(),
            speed: config.speed,
            radius: config.default_radius,
            default_radius: config.default_radius,
            large_radius: config.large_radius,
            rectangle: Rectangle::default(),
            skin: BallSkin::Normal,
            block_direction_change: -1.0,
            power_ups: Vec::new(),
        };
        ball.sync_rectangle();
        ball
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn default_radius(&self) -> f32 {
        self.default_radius
    }

    pub fn large_radius(&self) -> f32 {
        self.large_radius
    }

    pub fn rectangle(&self) -> &Rectangle {
        &self.rectangle
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.position, self.radius)
    }

    pub fn skin(&self) -> BallSkin {
        self.skin
    }

    pub fn block_direction_change(&self) -> f32 {
        self.block_direction_change
    }

    /// Move the ball and set its heading (normalized; a zero heading parks
    /// the ball). For level scripting and tests; regular play never
    /// teleports the ball.
    pub fn place(&mut self, position: Vec2, direction: Vec2) {
        self.position = position;
        self.direction = direction.normalize_or_zero();
        self.sync_rectangle();
    }

    fn sync_rectangle(&mut self) {
        self.rectangle = Rectangle::bounding(&self.circle());
    }

    // === Effect primitives (driven by power-ups only) ===

    pub(crate) fn set_radius(&mut self, radius: f32) {
        assert!(radius > 0.0, "ball radius must be positive, got {radius}");
        self.radius = radius;
        self.sync_rectangle();
    }

    pub(crate) fn reset_radius(&mut self) {
        self.set_radius(self.default_radius);
    }

    pub(crate) fn set_skin(&mut self, skin: BallSkin) {
        self.skin = skin;
    }

    pub(crate) fn reset_skin(&mut self) {
        self.skin = BallSkin::Normal;
    }

    pub(crate) fn set_block_direction_change(&mut self, sign: f32) {
        debug_assert!(sign == 1.0 || sign == -1.0);
        self.block_direction_change = sign;
    }

    pub(crate) fn reset_block_direction_change(&mut self) {
        self.block_direction_change = -1.0;
    }

    // === Power-ups ===

    pub fn power_ups(&self) -> &[PowerUp] {
        &self.power_ups
    }

    /// Take ownership of `power_up` and apply its effect immediately
    pub fn add_power_up(&mut self, power_up: PowerUp) -> PowerUpId {
        let id = power_up.id();
        debug_assert!(
            self.power_ups.iter().all(|p| p.id() != id),
            "power-up {id:?} granted twice"
        );
        power_up.apply_effect(self);
        self.power_ups.push(power_up);
        id
    }

    /// Undo and drop the active power-up `id`. Returns `None` (and changes
    /// nothing) if no such power-up is active.
    pub fn remove_power_up(&mut self, id: PowerUpId) -> Option<PowerUp> {
        let index = self.power_ups.iter().position(|p| p.id() == id)?;
        let power_up = self.power_ups.remove(index);
        power_up.remove_effect(self);
        self.reapply_power_ups();
        Some(power_up)
    }

    /// Effects are absolute sets, so re-applying the survivors restores any
    /// attribute a removal just reset underneath them.
    fn reapply_power_ups(&mut self) {
        let active = std::mem::take(&mut self.power_ups);
        for power_up in &active {
            power_up.apply_effect(self);
        }
        self.power_ups = active;
    }

    /// Age every active power-up and drop the ones that ran out
    pub fn tick(&mut self, delta: f32) {
        for power_up in &mut self.power_ups {
            power_up.tick(delta);
        }

        let expired: Vec<PowerUpId> = self
            .power_ups
            .iter()
            .filter(|p| p.has_expired())
            .map(|p| p.id())
            .collect();

        for id in expired {
            if let Some(power_up) = self.remove_power_up(id) {
                log::debug!("{:?} {:?} expired", power_up.kind(), id);
            }
        }
    }

    /// Active power-ups for the HUD, or "Lame" when there are none
    pub fn power_ups_string(&self) -> String {
        if self.power_ups.is_empty() {
            "Lame".to_string()
        } else {
            self.power_ups
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        }
    }

    // === Movement ===

    #[inline]
    fn displacement(&self, delta: f32) -> Vec2 {
        self.direction * self.speed * delta
    }

    /// Advance one tick and resolve collisions
    ///
    /// Walls are checked against the predicted position first; a side wall
    /// takes priority over top/bottom, so a corner only bounces x. Then the
    /// ball moves with the (possibly flipped) heading and is pulled back
    /// inside the wall it bounced off, breaks at most one block and finally
    /// bounces off the paddle.
    pub fn update_coordinates<O>(
        &mut self,
        delta: f32,
        screen_width: f32,
        screen_height: f32,
        oracle: &mut O,
    ) where
        O: CollisionOracle + ?Sized,
    {
        let next = self.position + self.displacement(delta);
        let radius = self.radius;
        let dir = self.direction;

        // Only a wall the ball is heading into bounces it
        let wall_x = (next.x < radius && dir.x < 0.0)
            || (next.x > screen_width - radius && dir.x > 0.0);
        let wall_y = (next.y > screen_height - radius && dir.y > 0.0)
            || (next.y < radius && dir.y < 0.0);

        if wall_x {
            self.direction.x = -self.direction.x;
        } else if wall_y {
            self.direction.y = -self.direction.y;
        }

        let before = self.rectangle;
        self.position += self.displacement(delta);
        if wall_x {
            self.position.x = self.position.x.clamp(radius, screen_width - radius);
        } else if wall_y {
            self.position.y = self.position.y.clamp(radius, screen_height - radius);
        }
        self.sync_rectangle();

        if let Some(block) = oracle.check_block(self) {
            // Classify by where the ball came from: if it was entirely above
            // or below the block it struck a horizontal face.
            let vertical = before.bottom() >= block.top() || before.top() <= block.bottom();
            if vertical {
                self.direction.y *= self.block_direction_change;
            } else {
                self.direction.x *= self.block_direction_change;
            }
        }

        if oracle.check_paddle(self) {
            self.direction.y = -self.direction.y;
        }
    }
}
