//! End-to-end session scenarios

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;

use smash::sim::{
    Autopilot, BallSkin, FixedStepDriver, GameSession, GameState, InputSnapshot, RecordingSource,
    Replay,
};
use smash::{BlockTable, CellSpec, GameConfig, Level, PowerUpSpec, sim::PowerUpKind};

fn dt() -> f32 {
    GameConfig::default().tick_duration()
}

/// 'p' always carries `kind`, 'b' never carries anything
fn table_with(kind: PowerUpKind, lifetime: f32) -> BlockTable {
    BlockTable::new()
        .with(
            'p',
            CellSpec {
                texture: "powered".to_string(),
                power_up: Some(PowerUpSpec { kind, lifetime }),
                spawn_probability: 1.0,
            },
        )
        .with(
            'b',
            CellSpec {
                texture: "plain".to_string(),
                power_up: None,
                spawn_probability: 1.0,
            },
        )
}

/// A power block in the bottom-left cell and a plain one far right, so
/// breaking the first doesn't end the game
fn corner_level(first: char) -> Level {
    Level::parse(&format!("{first}{}b", " ".repeat(18)))
}

/// First tick count whose f32 running sum of `dt` reaches `seconds`
fn ticks_to_reach(seconds: f32, dt: f32) -> u32 {
    let mut sum = 0.0f32;
    let mut ticks = 0;
    while sum < seconds {
        sum += dt;
        ticks += 1;
    }
    ticks
}

/// Keep the paddle under the ball
fn follow(session: &GameSession) -> InputSnapshot {
    InputSnapshot::pointer_at(session.ball().position())
}

#[test]
fn one_block_per_tick_in_scan_order() {
    let hits = Rc::new(Cell::new(0));
    let counter = hits.clone();
    let mut session = GameSession::builder()
        .level(Level::parse("bb"))
        .audio(move || counter.set(counter.get() + 1))
        .build()
        .unwrap();

    // Straddles the gutter between the two blocks (x 70..102 and 103..135)
    session
        .ball_mut()
        .place(Vec2::new(102.5, 415.0), Vec2::new(0.0, 1.0));
    session.tick(&InputSnapshot::idle(), dt());

    assert_eq!(session.broken_blocks(), 1);
    assert_eq!(hits.get(), 1);
    let left: Vec<_> = session.blocks().iter().map(|b| b.rectangle.x).collect();
    assert_eq!(left, vec![103.0]);
    // Bounced off the underside
    assert!(session.ball().direction().y < 0.0);
    assert_eq!(session.score(), "Blocks 1, Time 0.0, Rating: Lame");
}

#[test]
fn large_ball_lasts_its_lifetime() {
    let mut session = GameSession::builder()
        .level(corner_level('p'))
        .table(table_with(PowerUpKind::LargeBall, 2.0))
        .build()
        .unwrap();
    session
        .ball_mut()
        .place(Vec2::new(86.0, 415.0), Vec2::new(0.0, 1.0));

    session.tick(&follow(&session), dt());
    assert_eq!(session.broken_blocks(), 1);
    assert_eq!(session.ball().radius(), 16.0);
    assert_eq!(session.ball().skin(), BallSkin::Large);

    // Ageing starts on the tick after the grant
    let expiry = ticks_to_reach(2.0, dt());
    for tick in 1..expiry {
        session.tick(&follow(&session), dt());
        assert_eq!(session.ball().radius(), 16.0, "shrunk after {tick} ticks");
    }
    session.tick(&follow(&session), dt());
    assert_eq!(session.ball().radius(), 8.0);
    assert_eq!(session.ball().skin(), BallSkin::Normal);
    assert_eq!(session.game_state(), GameState::Playing);
}

#[test]
fn fireball_breaks_through_without_bouncing() {
    let mut session = GameSession::builder()
        .level(corner_level('p'))
        .table(table_with(PowerUpKind::FireBall, 2.0))
        .build()
        .unwrap();
    session
        .ball_mut()
        .place(Vec2::new(86.0, 415.0), Vec2::new(0.0, 1.0));

    session.tick(&InputSnapshot::idle(), dt());
    assert_eq!(session.broken_blocks(), 1);
    assert_eq!(session.ball().direction(), Vec2::new(0.0, 1.0));
    assert_eq!(session.ball().block_direction_change(), 1.0);
    assert!(session.score().ends_with("Rating: Fireball(2.0)"));
}

#[test]
fn replay_reproduces_session() {
    let seed = 1234;
    let frames = 30 * 60;

    let mut original = GameSession::builder().seed(seed).build().unwrap();
    let mut driver = FixedStepDriver::from_config(original.config());
    let mut source = RecordingSource::new(Autopilot::new(), seed);
    for _ in 0..frames {
        driver.run_frame(1.0 / 60.0, &mut original, &mut source);
    }
    let replay = Replay::from_json(&source.into_replay().to_json().unwrap()).unwrap();

    let mut copy = GameSession::builder().seed(replay.seed).build().unwrap();
    let mut driver = FixedStepDriver::from_config(copy.config());
    let mut playback = replay;
    for _ in 0..frames {
        driver.run_frame(1.0 / 60.0, &mut copy, &mut playback);
    }

    assert_eq!(copy.ticks(), original.ticks());
    assert_eq!(copy.ball().position(), original.ball().position());
    assert_eq!(copy.blocks().len(), original.blocks().len());
    assert_eq!(copy.score(), original.score());
    assert_eq!(copy.game_state(), original.game_state());
}

#[test]
fn all_space_grid_wins_immediately() {
    let mut session = GameSession::builder()
        .level(Level::parse("    \n    \n"))
        .build()
        .unwrap();
    assert_eq!(session.tick(&InputSnapshot::idle(), dt()), GameState::Won);
    assert_eq!(session.tick(&InputSnapshot::idle(), dt()), GameState::Won);
    assert_eq!(session.ticks(), 1);
}

#[test]
fn oversized_blank_grids_still_win() {
    for text in [" ".repeat(25), " \n".repeat(10)] {
        let mut session = GameSession::builder()
            .level(Level::parse(&text))
            .build()
            .unwrap();
        assert!(session.blocks().is_empty());
        assert_eq!(session.tick(&InputSnapshot::idle(), dt()), GameState::Won);
    }
}
