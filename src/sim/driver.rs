//! Render-rate independent tick driver
//!
//! Frame time is accumulated and drained in fixed ticks, so the simulation
//! runs at the same rate whatever the display refreshes at.

use super::input::InputSource;
use super::session::GameSession;
use crate::config::GameConfig;

/// Fixed-timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedStepDriver {
    tick_duration: f32,
    max_substeps: u32,
    max_frame_time: f32,
    accumulator: f32,
}

impl FixedStepDriver {
    pub fn new(tick_duration: f32, max_substeps: u32, max_frame_time: f32) -> Self {
        assert!(tick_duration > 0.0, "tick duration must be positive");
        Self {
            tick_duration,
            max_substeps,
            max_frame_time,
            accumulator: 0.0,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.tick_duration(), config.max_substeps, config.max_frame_time)
    }

    pub fn tick_duration(&self) -> f32 {
        self.tick_duration
    }

    /// Time banked toward the next tick
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Bank `frame_dt` and call `step(tick_duration)` once per whole tick
    /// that is now due. Returns the number of ticks run.
    pub fn advance(&mut self, frame_dt: f32, mut step: impl FnMut(f32)) -> u32 {
        let frame_dt = frame_dt.clamp(0.0, self.max_frame_time);
        self.accumulator += frame_dt;

        let mut substeps = 0;
        while self.accumulator > self.tick_duration && substeps < self.max_substeps {
            step(self.tick_duration);
            self.accumulator -= self.tick_duration;
            substeps += 1;
        }

        if self.accumulator > self.tick_duration {
            log::warn!(
                "Dropping {:.3}s of simulation backlog after {} ticks",
                self.accumulator,
                substeps
            );
            self.accumulator = 0.0;
        }

        substeps
    }

    /// Drain due ticks into `session`, pulling one snapshot per tick
    pub fn run_frame<S>(&mut self, frame_dt: f32, session: &mut GameSession, input: &mut S) -> u32
    where
        S: InputSource + ?Sized,
    {
        self.advance(frame_dt, |dt| {
            let snapshot = input.snapshot(session);
            session.tick(&snapshot, dt);
        })
    }

    /// Discard banked time (e.g. after a resume)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
