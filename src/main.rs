//! T-Rex Runner entry point
//!
//! Runs the simulation headlessly at the configured frame rate, with the
//! autopilot at the controls. Configuration comes from the environment:
//! - `TREX_SETTINGS`: JSON settings file (partial files are fine; a missing
//!   file is created with the defaults)
//! - `TREX_COLLISION`: `mask` or `circle`, overriding the settings file
//! - `TREX_HIGHSCORE`: high score file (default `highscore.txt`)
//! - `TREX_SEED`: fixed RNG seed
//! - `TREX_MAX_TICKS`: run this many ticks, restarting after each crash

use std::path::{Path, PathBuf};

use rand::Rng;
use trex_runner::audio::{AudioSink, LogAudio};
use trex_runner::highscores::DEFAULT_HIGH_SCORE_FILE;
use trex_runner::platform::{FrameLimiter, InputState};
use trex_runner::renderer::build_frame;
use trex_runner::sim::{Atlas, GameEvent, GamePhase, GameState, tick};
use trex_runner::{CollisionPolicy, HighScore, Settings, finish_session};

fn main() {
    env_logger::init();
    log::info!("T-Rex Runner (native) starting...");

    let mut settings = load_settings();
    if let Ok(name) = std::env::var("TREX_COLLISION") {
        match CollisionPolicy::from_str(&name) {
            Some(policy) => settings.collision = policy,
            None => log::warn!("Ignoring TREX_COLLISION={:?}", name),
        }
    }
    log::info!("Collision policy: {}", settings.collision.as_str());

    let high_score_path = std::env::var_os("TREX_HIGHSCORE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_HIGH_SCORE_FILE));
    let mut high_score = HighScore::load_from(&high_score_path);

    let seed = env_number("TREX_SEED").unwrap_or_else(|| rand::rng().random());
    let max_ticks = env_number("TREX_MAX_TICKS");

    let atlas = Atlas::builtin(&settings);
    let mut limiter = FrameLimiter::new(settings.fps);
    let mut state = GameState::new(settings, atlas, high_score.best(), seed);
    log::info!("Game initialized with seed: {}", seed);

    // A windowed or terminal host feeds key and click events through
    // `InputState::handle`; headless, the autopilot supplies every tick.
    let mut input = InputState::new();
    input.set_idle(true);
    let mut audio = LogAudio::new();
    let mut ticks = 0u64;

    while !input.quit_requested() {
        let dt = limiter.wait();
        tick(&mut state, input.current(), dt);
        input.end_tick();
        ticks += 1;

        let events = state.drain_events();
        audio.play_events(&events);
        for event in &events {
            if let GameEvent::NewHighScore(score) = *event {
                if let Err(e) = high_score.record_and_save(score) {
                    log::warn!("Failed to save high score: {}", e);
                }
            }
        }

        let frame = build_frame(&state);
        log::trace!("tick {}: {} draw commands", ticks, frame.commands.len());

        match max_ticks {
            Some(max) if ticks >= max => break,
            None if state.phase == GamePhase::GameOver => break,
            _ => {}
        }
    }

    // The loop may stop mid-run; that score still counts
    if let Err(e) = finish_session(&mut state, &mut high_score) {
        log::warn!("Failed to save high score: {}", e);
    }

    log::info!(
        "Stopped after {} ticks: score {}, high score {}, {} cues",
        ticks,
        state.score.current,
        high_score.best(),
        audio.played()
    );
}

/// Settings from `TREX_SETTINGS`, writing the defaults there if it is missing
fn load_settings() -> Settings {
    let Some(path) = std::env::var_os("TREX_SETTINGS") else {
        return Settings::default();
    };
    let path = Path::new(&path);
    if path.exists() {
        return Settings::load_from(path);
    }

    let settings = Settings::default();
    if let Err(e) = settings.save_to(path) {
        log::warn!("Could not write default settings to {}: {}", path.display(), e);
    }
    settings
}

/// Parse an unsigned integer from an environment variable, warning on junk
fn env_number(var: &str) -> Option<u64> {
    let raw = std::env::var(var).ok()?;
    match raw.trim().parse() {
        Ok(n) => Some(n),
        Err(e) => {
            log::warn!("Ignoring {}={:?}: {}", var, raw, e);
            None
        }
    }
}
