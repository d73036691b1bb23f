//! Whole-session behaviour through the public API

use std::time::Duration;

use trex_runner::Settings;
use trex_runner::audio::{AudioSink, SoundEffect};
use trex_runner::sim::{Atlas, GameEvent, GamePhase, GameState, TickInput, tick};

const DT: Duration = Duration::from_millis(100);

#[derive(Default)]
struct Recorder(Vec<SoundEffect>);

impl AudioSink for Recorder {
    fn play(&mut self, effect: SoundEffect) {
        self.0.push(effect);
    }
}

fn fresh(high_score: u64) -> GameState {
    let settings = Settings::default();
    let atlas = Atlas::builtin(&settings);
    GameState::new(settings, atlas, high_score, 2024).without_hazards()
}

#[test]
fn hundred_deciseconds_reads_one_hundred_with_one_milestone() {
    let mut state = fresh(0);
    let mut audio = Recorder::default();
    let start = TickInput {
        any_key: true,
        ..Default::default()
    };
    tick(&mut state, &start, DT);
    audio.play_events(&state.drain_events());

    while state.deciseconds() < 100 {
        tick(&mut state, &TickInput::default(), DT);
        audio.play_events(&state.drain_events());
    }

    assert_eq!(state.phase, GamePhase::Playing);
    assert!(state.cacti.is_empty() && state.birds.is_empty());
    assert_eq!(state.score.text(), "HI 00000 00100");
    let milestones = audio
        .0
        .iter()
        .filter(|e| **e == SoundEffect::Milestone)
        .count();
    assert_eq!(milestones, 1);
    assert_eq!(audio.0[0], SoundEffect::StartOrJump);
}

#[test]
fn high_score_shows_on_the_next_run() {
    let mut state = fresh(40);
    let start = TickInput {
        any_key: true,
        ..Default::default()
    };
    tick(&mut state, &start, DT);
    while state.deciseconds() < 50 {
        tick(&mut state, &TickInput::default(), DT);
    }
    // Still showing the high score the run began with
    assert_eq!(state.score.text(), "HI 00040 00050");

    // Drop a cactus on the runner
    let id = state.next_entity_id();
    let pos = state.runner.position();
    state.cacti.push(trex_runner::sim::Obstacle::new(
        id,
        trex_runner::sim::ObstacleKind::Cactus { variant: 3 },
        pos,
    ));
    tick(&mut state, &TickInput::default(), DT);
    assert_eq!(state.phase, GamePhase::GameOver);
    assert!(state.events.contains(&GameEvent::NewHighScore(51)));

    let retry = TickInput {
        click: Some(state.retry_button().center()),
        ..Default::default()
    };
    tick(&mut state, &retry, DT);
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.score.text(), "HI 00051 00000");
}

#[test]
fn demo_player_keeps_playing() {
    let settings = Settings::default();
    let atlas = Atlas::builtin(&settings);
    let mut state = GameState::new(settings, atlas, 0, 7);
    let idle = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut crashes = 0;
    for _ in 0..120 {
        tick(&mut state, &idle, DT);
        crashes += state
            .events
            .iter()
            .filter(|e| **e == GameEvent::Crashed)
            .count();
    }
    // Each crash costs one frozen tick before the autopilot clicks retry,
    // unless the loop ended on the crash itself
    let frozen = crashes - usize::from(state.phase == GamePhase::GameOver);
    assert_eq!(state.time_ticks, 120 - frozen as u64);
    assert_ne!(state.phase, GamePhase::Attract);
}
