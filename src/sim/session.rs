//! Game session: owns every entity and runs one fixed tick at a time

use std::fmt;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, BallSkin, CollisionOracle};
use super::block::{AudioSink, BlockField, SilentAudio};
use super::geometry::{Circle, Rectangle};
use super::input::InputSnapshot;
use super::paddle::{Direction, Paddle};
use crate::config::GameConfig;
use crate::error::SessionError;
use crate::level::{BlockTable, Level};

/// Session state. Lost and Won are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Playing,
    /// Ticks are ignored until resumed
    Paused,
    Lost,
    Won,
}

impl GameState {
    pub fn is_over(self) -> bool {
        matches!(self, GameState::Lost | GameState::Won)
    }

    /// Text shown over the playfield, if any
    pub fn banner(self) -> Option<&'static str> {
        match self {
            GameState::Lost => Some("You are lose!"),
            GameState::Won => Some("A winner is you!"),
            GameState::Playing | GameState::Paused => None,
        }
    }
}

/// Staged construction of a [`GameSession`]
pub struct SessionBuilder {
    config: GameConfig,
    level: Level,
    table: BlockTable,
    seed: u64,
    audio: Box<dyn AudioSink>,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionBuilder {
    /// Default config, the bundled level and table, seed 0, no sound
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            level: Level::default(),
            table: BlockTable::default(),
            seed: 0,
            audio: Box::new(SilentAudio),
        }
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn table(mut self, table: BlockTable) -> Self {
        self.table = table;
        self
    }

    /// Seed for the power-up spawn draws
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Played once per broken block
    pub fn audio(mut self, audio: impl AudioSink + 'static) -> Self {
        self.audio = Box::new(audio);
        self
    }

    pub fn build(self) -> Result<GameSession, SessionError> {
        self.config.validate()?;

        let mut rng = Pcg32::seed_from_u64(self.seed);
        let blocks = BlockField::from_level(&self.level, &self.table, &self.config, &mut rng)?;

        log::info!(
            "Session started: {} blocks, seed {}, {} Hz",
            blocks.len(),
            self.seed,
            self.config.tick_rate
        );

        Ok(GameSession {
            paddle: Paddle::new(&self.config),
            ball: Ball::new(&self.config.ball),
            blocks,
            state: GameState::Playing,
            broken_blocks: 0,
            play_time: 0.0,
            ticks: 0,
            audio: self.audio,
            config: self.config,
        })
    }
}

/// One game from first tick to win or loss
pub struct GameSession {
    config: GameConfig,
    state: GameState,
    paddle: Paddle,
    ball: Ball,
    blocks: BlockField,
    broken_blocks: u32,
    /// Seconds of simulated play
    play_time: f32,
    /// Ticks simulated while playing
    ticks: u64,
    audio: Box<dyn AudioSink>,
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("state", &self.state)
            .field("paddle", &self.paddle)
            .field("ball", &self.ball)
            .field("blocks", &self.blocks.len())
            .field("broken_blocks", &self.broken_blocks)
            .field("play_time", &self.play_time)
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

/// Collision protocol wired to this session's blocks, paddle and audio
struct SessionOracle<'a> {
    blocks: &'a mut BlockField,
    paddle: &'a Paddle,
    audio: &'a mut dyn AudioSink,
    broken_blocks: &'a mut u32,
}

impl CollisionOracle for SessionOracle<'_> {
    fn check_block(&mut self, ball: &mut Ball) -> Option<Rectangle> {
        let block = self.blocks.check_hit(ball.rectangle(), &mut *self.audio)?;
        *self.broken_blocks += 1;
        log::debug!(
            "Block broken at ({}, {}), {} left",
            block.rectangle.x,
            block.rectangle.y,
            self.blocks.len()
        );

        if let Some(mut power_up) = block.power_up {
            power_up.reset_remaining();
            log::debug!("Granted {:?} for {}s", power_up.kind(), power_up.lifetime());
            ball.add_power_up(power_up);
        }

        Some(block.rectangle)
    }

    fn check_paddle(&mut self, ball: &Ball) -> bool {
        self.paddle.hits(ball.rectangle())
    }
}

impl GameSession {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Advance by one fixed timestep
    ///
    /// Order: paddle input, loss check, win check, then (still playing)
    /// power-up aging and ball movement. A pointer in the snapshot overrides
    /// the movement keys for that tick.
    pub fn tick(&mut self, input: &InputSnapshot, dt: f32) -> GameState {
        if self.state != GameState::Playing {
            return self.state;
        }

        self.ticks += 1;
        self.play_time += dt;

        if let Some(pointer) = input.pointer() {
            self.paddle.center_on(pointer.x);
        } else {
            if input.is_left_pressed() {
                self.paddle.move_by(dt, Direction::Left);
            }
            if input.is_right_pressed() {
                self.paddle.move_by(dt, Direction::Right);
            }
        }

        let ball_rect = *self.ball.rectangle();
        if ball_rect.bottom() < self.paddle.top() && !self.paddle.hits(&ball_rect) {
            self.transition(GameState::Lost);
            return self.state;
        }

        if self.blocks.is_empty() {
            self.transition(GameState::Won);
            return self.state;
        }

        self.ball.tick(dt);

        let (width, height) = (self.config.screen_width, self.config.screen_height);
        let mut oracle = SessionOracle {
            blocks: &mut self.blocks,
            paddle: &self.paddle,
            audio: self.audio.as_mut(),
            broken_blocks: &mut self.broken_blocks,
        };
        self.ball.update_coordinates(dt, width, height, &mut oracle);

        log::trace!(
            "tick {}: ball ({:.1}, {:.1}) paddle x {:.1}",
            self.ticks,
            self.ball.position().x,
            self.ball.position().y,
            self.paddle.x()
        );

        self.state
    }

    fn transition(&mut self, next: GameState) {
        debug_assert!(!self.state.is_over(), "left terminal state {:?}", self.state);
        log::info!("{:?} -> {:?} after {} ticks: {}", self.state, next, self.ticks, self.score());
        self.state = next;
    }

    /// Pause or resume. Terminal states ignore this.
    pub fn set_paused(&mut self, paused: bool) {
        match (self.state, paused) {
            (GameState::Playing, true) => {
                log::info!("Paused");
                self.state = GameState::Paused;
            }
            (GameState::Paused, false) => {
                log::info!("Resumed");
                self.state = GameState::Playing;
            }
            _ => {}
        }
    }

    pub fn game_state(&self) -> GameState {
        self.state
    }

    /// HUD line: blocks broken, play time and active power-ups
    pub fn score(&self) -> String {
        format!(
            "Blocks {}, Time {:.1}, Rating: {}",
            self.broken_blocks,
            self.play_time,
            self.ball.power_ups_string()
        )
    }

    pub fn banner(&self) -> Option<&'static str> {
        self.state.banner()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    /// Direct access for level scripting and tests
    pub fn ball_mut(&mut self) -> &mut Ball {
        &mut self.ball
    }

    pub fn paddle(&self) -> &Paddle {
        &self.paddle
    }

    pub fn blocks(&self) -> &BlockField {
        &self.blocks
    }

    pub fn broken_blocks(&self) -> u32 {
        self.broken_blocks
    }

    pub fn play_time(&self) -> f32 {
        self.play_time
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Everything a renderer needs for one frame
    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            ball: self.ball.circle(),
            ball_skin: self.ball.skin(),
            paddle: *self.paddle.rectangle(),
            blocks: &self.blocks,
            hud: self.score(),
            banner: self.banner(),
        }
    }
}

/// Read-only per-frame data for the render sink
#[derive(Debug, Clone)]
pub struct FrameView<'a> {
    pub ball: Circle,
    pub ball_skin: BallSkin,
    pub paddle: Rectangle,
    pub blocks: &'a BlockField,
    pub hud: String,
    pub banner: Option<&'static str>,
}

impl FrameView<'_> {
    /// Live blocks as (rectangle, texture) in scan order
    pub fn block_sprites(&self) -> impl Iterator<Item = (&Rectangle, &str)> {
        self.blocks.iter().map(|b| (&b.rectangle, b.texture.as_str()))
    }
}
