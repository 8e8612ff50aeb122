//! Demo mode: the game plays itself
//!
//! Steers the paddle with a virtual pointer under the ball, wandering a
//! little off-center so the attract loop doesn't look robotic.

use glam::Vec2;

use super::input::{InputSnapshot, InputSource};
use super::session::GameSession;

/// Pointer-driven paddle AI
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    ticks: u64,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputSource for Autopilot {
    fn snapshot(&mut self, session: &GameSession) -> InputSnapshot {
        self.ticks += 1;

        let ball = session.ball();
        let paddle = session.paddle();

        // Lead the ball by one tick of travel
        let dt = session.config().tick_duration();
        let target = ball.position() + ball.direction() * ball.speed() * dt;

        // Oscillating offset, kept well inside the paddle so it still catches
        let time_factor = self.ticks as f32 * 0.05;
        let wander = (time_factor.sin() * 0.6 + (time_factor * 0.7).sin() * 0.4) * 0.3;
        let offset = wander * paddle.width() / 2.0;

        InputSnapshot::pointer_at(Vec2::new(target.x + offset, paddle.top()))
    }
}
