//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (row-major for blocks, grant order for power-ups)
//! - No rendering, audio device or input device dependencies

pub mod autopilot;
pub mod ball;
pub mod block;
pub mod driver;
pub mod geometry;
pub mod input;
pub mod paddle;
pub mod power_up;
pub mod replay;
pub mod session;

pub use autopilot::Autopilot;
pub use ball::{Ball, BallSkin, CollisionOracle};
pub use block::{AudioSink, Block, BlockField, SilentAudio};
pub use driver::FixedStepDriver;
pub use geometry::{Circle, Rectangle};
pub use input::{InputRecorder, InputSnapshot, InputSource, Key};
pub use paddle::{Direction, Paddle};
pub use power_up::{PowerUp, PowerUpId, PowerUpKind};
pub use replay::{RecordingSource, Replay};
pub use session::{FrameView, GameSession, GameState, SessionBuilder};
