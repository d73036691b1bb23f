//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically: input,
//! physics, spawning, collisions, then scoring.

use std::time::Duration;

use glam::Vec2;

use super::collision::{resolve_lethal, resolve_projectiles};
use super::runner::RunnerState;
use super::spawn::spawn_tick;
use super::state::{Bullet, GameEvent, GamePhase, GameState};

/// How many ticks ahead of contact the autopilot leaves the ground
const AUTOPILOT_LEAD_TICKS: f32 = 4.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Up / jump pressed this tick
    pub jump: bool,
    /// Down / crouch currently held
    pub crouch: bool,
    /// Fire pressed this tick
    pub fire: bool,
    /// Any other key pressed this tick (starts the game)
    pub any_key: bool,
    /// Pointer click position, if any
    pub click: Option<Vec2>,
    /// Idle/demo mode - the autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    fn wants_start(&self) -> bool {
        self.any_key || self.jump || self.crouch || self.fire
    }
}

/// Advance the game state by one fixed timestep of length `dt`
pub fn tick(state: &mut GameState, input: &TickInput, dt: Duration) {
    state.events.clear();

    let input = if input.idle_mode {
        autopilot(state)
    } else {
        input.clone()
    };

    match state.phase {
        GamePhase::Attract => {
            if !input.wants_start() {
                return;
            }
            start(state);
        }
        GamePhase::GameOver => {
            if input
                .click
                .is_some_and(|point| state.retry_button().contains(point))
            {
                restart(state);
            }
            return;
        }
        GamePhase::Playing => {}
    }

    step(state, &input, dt);
}

/// Leave the title screen with the clock at zero
fn start(state: &mut GameState) {
    state.phase = GamePhase::Playing;
    state.elapsed = Duration::ZERO;
    state.events.push(GameEvent::Started);
    log::info!("run started (seed {})", state.seed);
}

/// New play-through after a crash
///
/// Scenery (ground and clouds) carries over; everything that belongs to the
/// previous run is dropped.
fn restart(state: &mut GameState) {
    state.phase = GamePhase::Playing;
    state.elapsed = Duration::ZERO;
    state.bonus = 0;
    state.cacti.clear();
    state.birds.clear();
    state.bullets.clear();
    state.stars.clear();
    state.moons.clear();
    state.runner.reset();
    state.settings.reset_difficulty();
    state.score.reset();
    state.events.push(GameEvent::Restarted);
    log::info!("run restarted, high score {}", state.score.high_score);
}

fn step(state: &mut GameState, input: &TickInput, dt: Duration) {
    state.elapsed += dt;
    state.time_ticks += 1;
    let deci = state.deciseconds();

    // Input
    state.runner.crouch(input.crouch);
    if input.jump && state.runner.jump() {
        state.events.push(GameEvent::Jumped);
    }
    if input.fire && state.bullets_available() > 0 {
        let id = state.next_entity_id();
        state.bullets.push(Bullet {
            id,
            pos: state.runner.muzzle(),
            alive: true,
        });
        state.events.push(GameEvent::Fired);
    }

    // Physics
    state.runner.update(&state.settings);
    let (settings, atlas) = (&state.settings, &state.atlas);
    for group in [
        &mut state.ground,
        &mut state.clouds,
        &mut state.cacti,
        &mut state.birds,
        &mut state.stars,
        &mut state.moons,
    ] {
        for obstacle in group.iter_mut() {
            obstacle.update(settings, atlas);
        }
    }
    for bullet in state.bullets.iter_mut() {
        bullet.update(settings);
    }
    state.sweep();

    spawn_tick(state, deci);

    // Collisions
    let bonus = resolve_projectiles(state);
    state.bonus += bonus;
    let crashed = resolve_lethal(state);

    // Scoring
    if state.score.update(deci, state.bonus) {
        let milestone = state.score.milestone;
        state.settings.increase_difficulty();
        state.events.push(GameEvent::Milestone(milestone));
        log::debug!("milestone {}", milestone);
    }

    if crashed {
        game_over(state);
    }
}

fn game_over(state: &mut GameState) {
    state.runner.collide();
    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::Crashed);
    log::info!("game over at {}", state.score.current);
    if let Some(best) = state.score.finish_run() {
        state.events.push(GameEvent::NewHighScore(best));
        log::info!("new high score {}", best);
    }
}

/// Input the demo player would give this tick
///
/// Starts the game, clicks retry, jumps ground hazards, crouches under
/// high birds and shoots anything ahead.
pub fn autopilot(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    match state.phase {
        GamePhase::Attract => {
            input.any_key = true;
            return input;
        }
        GamePhase::GameOver => {
            input.click = Some(state.retry_button().center());
            return input;
        }
        GamePhase::Playing => {}
    }

    let runner = state.runner.bounds(&state.atlas);
    let duck_line = state.runner.crouching_top();

    // Nearest hazard that hasn't passed the runner yet
    let next = state
        .cacti
        .iter()
        .chain(state.birds.iter())
        .filter(|o| o.bounds(&state.atlas).right() > runner.left())
        .min_by(|a, b| {
            a.pos
                .x
                .partial_cmp(&b.pos.x)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(hazard) = next {
        let bounds = hazard.bounds(&state.atlas);
        let gap = bounds.left() - runner.right();
        let lead = hazard.kind.velocity(&state.settings) * AUTOPILOT_LEAD_TICKS;

        if bounds.bottom() <= duck_line {
            input.crouch = gap < lead;
        } else if gap < lead && state.runner.state == RunnerState::Walking {
            input.jump = true;
        }
        input.fire = gap > 0.0 && state.bullets_available() > 0;
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Settings, Speeds};
    use crate::sim::spawn::{BirdBand, spawn_bird, spawn_cactus_cluster};
    use crate::sim::sprite::Atlas;
    use crate::sim::state::{Obstacle, ObstacleKind};

    const DT: Duration = Duration::from_millis(100);

    fn state(high_score: u64) -> GameState {
        let settings = Settings::default();
        let atlas = Atlas::builtin(&settings);
        GameState::new(settings, atlas, high_score, 42).without_hazards()
    }

    fn started(high_score: u64) -> GameState {
        let mut s = state(high_score);
        let input = TickInput {
            any_key: true,
            ..Default::default()
        };
        tick(&mut s, &input, DT);
        s
    }

    fn cactus_on_runner(s: &mut GameState) {
        let id = s.next_entity_id();
        let pos = s.runner.position() + Vec2::new(30.0, 30.0);
        s.cacti
            .push(Obstacle::new(id, ObstacleKind::Cactus { variant: 0 }, pos));
    }

    #[test]
    fn test_attract_waits_for_a_key() {
        let mut s = state(0);
        let clouds: Vec<f32> = s.clouds.iter().map(|c| c.pos.x).collect();
        for _ in 0..10 {
            tick(&mut s, &TickInput::default(), DT);
        }
        assert_eq!(s.phase, GamePhase::Attract);
        assert_eq!(s.elapsed, Duration::ZERO);
        assert!(s.events.is_empty());
        let after: Vec<f32> = s.clouds.iter().map(|c| c.pos.x).collect();
        assert_eq!(clouds, after);
    }

    #[test]
    fn test_any_key_starts_the_clock() {
        let s = started(0);
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.events, vec![GameEvent::Started]);
        assert_eq!(s.elapsed, DT);
        assert_eq!(s.deciseconds(), 1);
    }

    #[test]
    fn test_starting_key_is_also_processed() {
        let mut s = state(0);
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut s, &input, DT);
        assert_eq!(s.events, vec![GameEvent::Started, GameEvent::Jumped]);
        assert!(s.runner.is_airborne());
        assert!(s.runner.top < s.runner.standing_top());
    }

    #[test]
    fn test_fire_respects_capacity() {
        let mut s = started(0);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut s, &fire, DT);
        assert_eq!(s.events, vec![GameEvent::Fired]);
        let muzzle = s.runner.muzzle();
        assert_eq!(s.bullets[0].pos.y, muzzle.y);
        assert_eq!(s.bullets[0].pos.x, muzzle.x + s.settings.bullet_speed);

        tick(&mut s, &fire, DT);
        assert_eq!(s.bullets.len(), 2);
        assert_eq!(s.bullets_available(), 0);
        assert!(s.reload_progress().is_some());

        tick(&mut s, &fire, DT);
        assert_eq!(s.bullets.len(), 2);
        assert!(s.events.is_empty());
    }

    #[test]
    fn test_crash_ends_run_and_records_high_score() {
        let mut s = started(0);
        cactus_on_runner(&mut s);
        tick(&mut s, &TickInput::default(), DT);

        assert_eq!(s.phase, GamePhase::GameOver);
        assert!(s.runner.is_collided());
        assert!(s.cacti.is_empty());
        assert_eq!(
            s.events,
            vec![GameEvent::Crashed, GameEvent::NewHighScore(2)]
        );

        // Frozen until retry
        let elapsed = s.elapsed;
        tick(&mut s, &TickInput::default(), DT);
        assert_eq!(s.elapsed, elapsed);
        assert!(s.events.is_empty());
    }

    #[test]
    fn test_crash_below_high_score_is_not_recorded() {
        let mut s = started(500);
        cactus_on_runner(&mut s);
        tick(&mut s, &TickInput::default(), DT);
        assert_eq!(s.events, vec![GameEvent::Crashed]);
        assert_eq!(s.score.high_score, 500);
    }

    #[test]
    fn test_retry_button_restarts() {
        let mut s = started(0);
        for _ in 0..5 {
            tick(&mut s, &TickInput::default(), DT);
        }
        s.settings.increase_difficulty();
        s.bonus = 8;
        cactus_on_runner(&mut s);
        spawn_bird(&mut s, BirdBand::Low);
        tick(&mut s, &TickInput::default(), DT);
        assert_eq!(s.phase, GamePhase::GameOver);

        let miss = TickInput {
            click: Some(Vec2::ZERO),
            ..Default::default()
        };
        tick(&mut s, &miss, DT);
        assert_eq!(s.phase, GamePhase::GameOver);

        let hit = TickInput {
            click: Some(s.retry_button().center()),
            ..Default::default()
        };
        tick(&mut s, &hit, DT);
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.events, vec![GameEvent::Restarted]);
        assert_eq!(s.elapsed, Duration::ZERO);
        assert_eq!(s.bonus, 0);
        assert!(s.cacti.is_empty() && s.birds.is_empty() && s.bullets.is_empty());
        assert_eq!(s.clouds.len(), 3);
        assert!(!s.ground.is_empty());
        assert_eq!(s.runner.state, RunnerState::Walking);
        assert_eq!(s.settings.speeds, Speeds::BASELINE);
        assert_eq!(s.score.current, 0);
        // 7 deciseconds plus the 8 point bonus
        assert_eq!(s.score.text(), "HI 00015 00000");
    }

    #[test]
    fn test_milestone_raises_difficulty_once() {
        let mut s = started(0);
        let mut milestones = Vec::new();
        while s.deciseconds() < 100 {
            tick(&mut s, &TickInput::default(), DT);
            milestones.extend(
                s.events
                    .iter()
                    .copied()
                    .filter(|e| matches!(e, GameEvent::Milestone(_))),
            );
        }
        assert_eq!(milestones, vec![GameEvent::Milestone(100)]);
        assert!(s.settings.speeds.ground > Speeds::BASELINE.ground);
        assert!(s.score.highlighted());
    }

    #[test]
    fn test_idle_mode_starts_and_retries() {
        let mut s = state(0);
        assert!(autopilot(&s).any_key);
        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        tick(&mut s, &idle, DT);
        assert_eq!(s.phase, GamePhase::Playing);

        cactus_on_runner(&mut s);
        tick(&mut s, &TickInput::default(), DT);
        assert_eq!(s.phase, GamePhase::GameOver);
        tick(&mut s, &idle, DT);
        assert_eq!(s.phase, GamePhase::Playing);
    }

    #[test]
    fn test_autopilot_jumps_cactus_and_ducks_high_bird() {
        let mut s = started(0);
        spawn_cactus_cluster(&mut s);
        let runner_right = s.runner.bounds(&s.atlas).right();

        s.cacti[0].pos.x = runner_right + 500.0;
        let far = autopilot(&s);
        assert!(!far.jump);
        assert!(far.fire);

        let dx = runner_right + 20.0 - s.cacti[0].pos.x;
        for c in s.cacti.iter_mut() {
            c.pos.x += dx;
        }
        let near = autopilot(&s);
        assert!(near.jump);
        assert!(!near.crouch);

        s.cacti.clear();
        spawn_bird(&mut s, BirdBand::High);
        s.birds[0].pos.x = runner_right + 10.0;
        let duck = autopilot(&s);
        assert!(duck.crouch);
        assert!(!duck.jump);
    }

    #[test]
    fn test_demo_run_is_deterministic() {
        let run = |seed| {
            let settings = Settings::default();
            let atlas = Atlas::builtin(&settings);
            let mut s = GameState::new(settings, atlas, 0, seed);
            let idle = TickInput {
                idle_mode: true,
                ..Default::default()
            };
            let mut events = Vec::new();
            for _ in 0..2000 {
                tick(&mut s, &idle, Duration::from_millis(16));
                events.extend(s.events.iter().copied());
            }
            (events, s.score.current, s.entity_count())
        };
        assert_eq!(run(9), run(9));
    }
}
