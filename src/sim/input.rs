//! Per-tick input capture
//!
//! Device callbacks land in an [`InputRecorder`] as they happen, so no event
//! is lost to polling at the wrong moment. Once per tick the recorder is
//! frozen into an [`InputSnapshot`]; the tick only ever sees that snapshot,
//! which makes every tick a pure function of (state, snapshot, dt) and lets
//! the whole input history be recorded and replayed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::session::GameSession;

/// Movement keys the simulation cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
}

/// Immutable input state for one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    left: bool,
    right: bool,
    /// Pointer/touch position, already in world space
    pointer: Option<Vec2>,
}

impl InputSnapshot {
    pub fn new(keys: impl IntoIterator<Item = Key>, pointer: Option<Vec2>) -> Self {
        let mut snapshot = Self {
            pointer,
            ..Default::default()
        };
        for key in keys {
            match key {
                Key::Left => snapshot.left = true,
                Key::Right => snapshot.right = true,
            }
        }
        snapshot
    }

    /// No keys held, no pointer
    pub fn idle() -> Self {
        Self::default()
    }

    /// Only a pointer at `position`
    pub fn pointer_at(position: Vec2) -> Self {
        Self {
            pointer: Some(position),
            ..Default::default()
        }
    }

    #[inline]
    pub fn is_left_pressed(&self) -> bool {
        self.left
    }

    #[inline]
    pub fn is_right_pressed(&self) -> bool {
        self.right
    }

    #[inline]
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }
}

/// Anything that can hand the driver one snapshot per tick
pub trait InputSource {
    /// Produce the snapshot for the next tick. `session` is the state the
    /// tick will run against; device-backed sources ignore it.
    fn snapshot(&mut self, session: &GameSession) -> InputSnapshot;
}

/// Live input state fed by device callbacks
#[derive(Debug, Clone, Default)]
pub struct InputRecorder {
    left: bool,
    right: bool,
    /// Last touch position in screen space
    touched: Option<Vec2>,
    is_touching: bool,
}

impl InputRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Left => self.left = true,
            Key::Right => self.right = true,
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.left = false,
            Key::Right => self.right = false,
        }
    }

    pub fn touch_down(&mut self, x: f32, y: f32) {
        self.is_touching = true;
        self.touched = Some(Vec2::new(x, y));
    }

    pub fn touch_dragged(&mut self, x: f32, y: f32) {
        self.touched = Some(Vec2::new(x, y));
    }

    /// The last position stays pending until the next snapshot, so a tap
    /// shorter than a tick is still seen once.
    pub fn touch_up(&mut self) {
        self.is_touching = false;
    }

    pub fn is_touching(&self) -> bool {
        self.is_touching
    }

    /// Freeze the current state, mapping the pointer from screen to world
    /// space with `unproject`
    pub fn snapshot_with(&mut self, unproject: impl FnOnce(Vec2) -> Vec2) -> InputSnapshot {
        let snapshot = InputSnapshot {
            left: self.left,
            right: self.right,
            pointer: self.touched.map(unproject),
        };
        if !self.is_touching {
            self.touched = None;
        }
        snapshot
    }
}

impl InputSource for InputRecorder {
    /// Touch coordinates are taken to be world coordinates already
    fn snapshot(&mut self, _session: &GameSession) -> InputSnapshot {
        self.snapshot_with(|p| p)
    }
}
