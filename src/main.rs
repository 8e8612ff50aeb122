//! Smash entry point
//!
//! Headless attract mode: builds a session from an optional config and level
//! file, lets the autopilot play it at 60 fps frame pacing and reports the
//! result.
//!
//! Usage: `smash [config.json] [level-file]`. `SMASH_SEED` picks the seed.

use std::process::ExitCode;

use smash::sim::{Autopilot, FixedStepDriver, GameSession};
use smash::{GameConfig, Level, SessionError};

/// Simulated frame length
const FRAME_DT: f32 = 1.0 / 60.0;
/// Give up after this many simulated seconds
const MAX_RUN_SECS: f32 = 120.0;

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), SessionError> {
    let mut args = std::env::args().skip(1);

    let config = match args.next() {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let level = match args.next() {
        Some(path) => Level::load(path)?,
        None => Level::default(),
    };
    let seed = std::env::var("SMASH_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);

    log::info!("Smash starting (seed {seed})");

    let mut hits = 0u32;
    let mut session = GameSession::builder()
        .config(config.clone())
        .level(level)
        .seed(seed)
        .audio(move || {
            hits += 1;
            log::trace!("*clack* #{hits}");
        })
        .build()?;

    let mut driver = FixedStepDriver::from_config(&config);
    let mut pilot = Autopilot::new();

    let mut elapsed = 0.0;
    let mut frames = 0u32;
    while !session.game_state().is_over() && elapsed < MAX_RUN_SECS {
        driver.run_frame(FRAME_DT, &mut session, &mut pilot);
        elapsed += FRAME_DT;
        frames += 1;

        // Once a second
        if frames % 60 == 0 {
            log::info!("{}", session.score());
        }
    }

    match session.banner() {
        Some(banner) => log::info!("{banner}"),
        None => log::info!("Stopped after {MAX_RUN_SECS}s"),
    }
    log::info!("{}", session.score());
    Ok(())
}
