//! Recorded input history
//!
//! Because a tick only ever sees its snapshot, replaying the same snapshots
//! into a session built with the same seed reproduces the game exactly.

use serde::{Deserialize, Serialize};

use super::input::{InputSnapshot, InputSource};
use super::session::GameSession;
use crate::error::ReplayError;

/// One snapshot per tick, in tick order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Replay {
    /// Seed the recorded session was built with
    pub seed: u64,
    inputs: Vec<InputSnapshot>,
    #[serde(skip)]
    cursor: usize,
}

impl Replay {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    pub fn from_inputs(seed: u64, inputs: Vec<InputSnapshot>) -> Self {
        Self {
            seed,
            inputs,
            cursor: 0,
        }
    }

    pub fn push(&mut self, snapshot: InputSnapshot) {
        self.inputs.push(snapshot);
    }

    pub fn inputs(&self) -> &[InputSnapshot] {
        &self.inputs
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Whether playback has handed out every recorded snapshot
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.inputs.len()
    }

    /// Restart playback from the first tick
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    pub fn to_json(&self) -> Result<String, ReplayError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl InputSource for Replay {
    /// Past the end of the recording the paddle is left alone
    fn snapshot(&mut self, _session: &GameSession) -> InputSnapshot {
        let snapshot = self.inputs.get(self.cursor).cloned().unwrap_or_default();
        self.cursor += 1;
        snapshot
    }
}

/// Wraps a source and records everything it hands out
#[derive(Debug, Clone)]
pub struct RecordingSource<S> {
    inner: S,
    replay: Replay,
}

impl<S: InputSource> RecordingSource<S> {
    pub fn new(inner: S, seed: u64) -> Self {
        Self {
            inner,
            replay: Replay::new(seed),
        }
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    pub fn replay(&self) -> &Replay {
        &self.replay
    }

    pub fn into_replay(self) -> Replay {
        self.replay
    }
}

impl<S: InputSource> InputSource for RecordingSource<S> {
    fn snapshot(&mut self, session: &GameSession) -> InputSnapshot {
        let snapshot = self.inner.snapshot(session);
        self.replay.push(snapshot.clone());
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{InputRecorder, Key};
    use glam::Vec2;

    #[test]
    fn test_playback_then_idle() {
        let session = GameSession::builder().build().unwrap();
        let mut replay = Replay::from_inputs(
            3,
            vec![
                InputSnapshot::new([Key::Left], None),
                InputSnapshot::pointer_at(Vec2::new(10.0, 0.0)),
            ],
        );
        assert!(replay.snapshot(&session).is_left_pressed());
        assert_eq!(replay.snapshot(&session).pointer(), Some(Vec2::new(10.0, 0.0)));
        assert!(replay.is_finished());
        assert_eq!(replay.snapshot(&session), InputSnapshot::idle());

        replay.rewind();
        assert!(!replay.is_finished());
    }

    #[test]
    fn test_recording_source() {
        let session = GameSession::builder().build().unwrap();
        let mut source = RecordingSource::new(InputRecorder::new(), 9);
        source.inner_mut().key_down(Key::Right);
        source.snapshot(&session);
        source.inner_mut().key_up(Key::Right);
        source.snapshot(&session);

        let replay = source.into_replay();
        assert_eq!(replay.seed, 9);
        assert_eq!(replay.len(), 2);
        assert!(replay.inputs()[0].is_right_pressed());
        assert!(!replay.inputs()[1].is_right_pressed());
    }

    #[test]
    fn test_json_round_trip_resets_cursor() {
        let session = GameSession::builder().build().unwrap();
        let mut replay = Replay::from_inputs(1, vec![InputSnapshot::new([Key::Left], None)]);
        replay.snapshot(&session);
        let restored = Replay::from_json(&replay.to_json().unwrap()).unwrap();
        assert_eq!(restored.inputs(), replay.inputs());
        assert!(!restored.is_finished());
    }

    #[test]
    fn test_malformed_replay() {
        let err = Replay::from_json("{ \"seed\": ").unwrap_err();
        assert!(matches!(err, ReplayError::Json(_)));
        assert!(err.to_string().starts_with("malformed replay"));
    }
}
