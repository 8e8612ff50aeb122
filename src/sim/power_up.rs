//! Time-limited ball modifiers
//!
//! Effects are absolute sets, never deltas: applying the same variant twice
//! leaves the ball exactly as applying it once.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ball::{Ball, BallSkin};

/// Identity of one power-up instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PowerUpId(pub u32);

/// Power-up variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Ball passes through blocks instead of bouncing off them
    FireBall,
    /// Ball grows to its large radius
    LargeBall,
}

impl PowerUpKind {
    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::FireBall => "Fireball",
            PowerUpKind::LargeBall => "Largeball",
        }
    }
}

/// One power-up instance with its own timer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    id: PowerUpId,
    kind: PowerUpKind,
    /// Seconds the effect lasts once granted
    lifetime: f32,
    /// Tick time accumulated since the grant. Starts at `lifetime`
    /// (disarmed); `reset_remaining` arms it at grant time.
    elapsed: f32,
}

impl PowerUp {
    pub fn new(id: PowerUpId, kind: PowerUpKind, lifetime: f32) -> Self {
        Self {
            id,
            kind,
            lifetime,
            elapsed: lifetime,
        }
    }

    pub fn id(&self) -> PowerUpId {
        self.id
    }

    pub fn kind(&self) -> PowerUpKind {
        self.kind
    }

    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }

    pub fn time_remaining(&self) -> f32 {
        (self.lifetime - self.elapsed).max(0.0)
    }

    pub fn apply_effect(&self, ball: &mut Ball) {
        match self.kind {
            PowerUpKind::FireBall => {
                ball.set_block_direction_change(1.0);
                ball.set_skin(BallSkin::Fire);
            }
            PowerUpKind::LargeBall => {
                ball.set_radius(ball.large_radius());
                ball.set_skin(BallSkin::Large);
            }
        }
    }

    pub fn remove_effect(&self, ball: &mut Ball) {
        match self.kind {
            PowerUpKind::FireBall => {
                ball.reset_block_direction_change();
                ball.reset_skin();
            }
            PowerUpKind::LargeBall => {
                ball.reset_radius();
                ball.reset_skin();
            }
        }
    }

    /// Age by `delta` seconds
    pub fn tick(&mut self, delta: f32) {
        self.elapsed += delta;
    }

    /// Re-arm the timer to the full lifetime
    pub fn reset_remaining(&mut self) {
        self.elapsed = 0.0;
    }

    /// Once the summed tick time reaches the lifetime
    pub fn has_expired(&self) -> bool {
        self.elapsed >= self.lifetime
    }
}

impl fmt::Display for PowerUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:.1})", self.kind.label(), self.time_remaining())
    }
}
