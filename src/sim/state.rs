//! Game state and core simulation types
//!
//! The orchestrator owns one of everything here and mutates it only from
//! `tick`.

use std::time::Duration;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::motion::{Animation, scroll_left, scroll_right};
use super::runner::Runner;
use super::score::Score;
use super::sprite::{Atlas, BIRD_FRAMES, SpriteId};
use crate::Rect;
use crate::consts::GROUND_LEVEL;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for any key
    Attract,
    /// Active gameplay
    Playing,
    /// Runner crashed, waiting for a click on retry
    GameOver,
}

/// Targets bullets can damage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Cactus,
    Bird,
}

impl TargetKind {
    /// Points for destroying one
    pub fn kill_bonus(&self) -> u64 {
        match self {
            TargetKind::Cactus => crate::consts::CACTUS_KILL_BONUS,
            TargetKind::Bird => crate::consts::BIRD_KILL_BONUS,
        }
    }
}

/// Things that happened during a tick, for audio and bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// First key press on the title screen
    Started,
    /// Retry clicked after a crash
    Restarted,
    Jumped,
    Crashed,
    /// Score crossed this multiple of 100
    Milestone(u64),
    Fired,
    TargetDamaged(TargetKind),
    TargetDestroyed(TargetKind),
    /// Finished run beat the stored high score
    NewHighScore(u64),
}

/// What a scrolling entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Ground,
    Cloud,
    /// Visual variant, unique within its cluster
    Cactus { variant: u8 },
    Bird,
    Star { variant: u8 },
    Moon { phase: u8 },
}

impl ObstacleKind {
    /// Current leftward velocity
    pub fn velocity(&self, settings: &Settings) -> f32 {
        let s = &settings.speeds;
        match self {
            ObstacleKind::Ground | ObstacleKind::Cactus { .. } => s.ground,
            ObstacleKind::Cloud => s.cloud,
            ObstacleKind::Bird => s.bird,
            ObstacleKind::Star { .. } => s.star,
            ObstacleKind::Moon { .. } => s.moon,
        }
    }

    pub fn target(&self) -> Option<TargetKind> {
        match self {
            ObstacleKind::Cactus { .. } => Some(TargetKind::Cactus),
            ObstacleKind::Bird => Some(TargetKind::Bird),
            _ => None,
        }
    }
}

/// A scrolling entity
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    /// Flap cycle (birds only)
    pub animation: Option<Animation>,
    /// Hit once by a bullet
    pub damaged: bool,
    pub alive: bool,
}

impl Obstacle {
    pub fn new(id: u32, kind: ObstacleKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            animation: None,
            damaged: false,
            alive: true,
        }
    }

    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.animation = Some(animation);
        self
    }

    /// Image for the current state
    pub fn sprite(&self) -> SpriteId {
        match self.kind {
            ObstacleKind::Ground => SpriteId::Ground,
            ObstacleKind::Cloud => SpriteId::Cloud,
            ObstacleKind::Cactus { variant } => SpriteId::Cactus {
                variant,
                damaged: self.damaged,
            },
            ObstacleKind::Bird => {
                let frame = self.animation.map_or(0, |a| a.frame()).min(BIRD_FRAMES - 1);
                SpriteId::Bird {
                    frame: frame as u8,
                    damaged: self.damaged,
                }
            }
            ObstacleKind::Star { variant } => SpriteId::Star(variant),
            ObstacleKind::Moon { phase } => SpriteId::Moon(phase),
        }
    }

    pub fn bounds(&self, atlas: &Atlas) -> Rect {
        Rect::new(self.pos, atlas.size(self.sprite()))
    }

    /// Animate, scroll left, and die once fully off screen
    pub fn update(&mut self, settings: &Settings, atlas: &Atlas) {
        if let Some(anim) = self.animation.as_mut() {
            anim.advance();
        }
        let width = atlas.size(self.sprite()).x;
        if !scroll_left(&mut self.pos, self.kind.velocity(settings), width) {
            self.alive = false;
        }
    }
}

/// A projectile flying right
#[derive(Debug, Clone)]
pub struct Bullet {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub alive: bool,
}

impl Bullet {
    pub fn update(&mut self, settings: &Settings) {
        if !scroll_right(&mut self.pos, settings.bullet_speed, settings.screen_width) {
            self.alive = false;
        }
    }

    pub fn bounds(&self, atlas: &Atlas) -> Rect {
        Rect::new(self.pos, atlas.size(SpriteId::Bullet))
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub settings: Settings,
    pub atlas: Atlas,
    pub phase: GamePhase,
    /// Play time in the current run
    pub elapsed: Duration,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Points earned by kills this run
    pub bonus: u64,
    pub score: Score,
    pub runner: Runner,
    pub ground: Vec<Obstacle>,
    pub clouds: Vec<Obstacle>,
    pub cacti: Vec<Obstacle>,
    pub birds: Vec<Obstacle>,
    pub stars: Vec<Obstacle>,
    pub moons: Vec<Obstacle>,
    pub bullets: Vec<Bullet>,
    /// When false no cacti or birds ever spawn
    pub hazards_enabled: bool,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(settings: Settings, atlas: Atlas, high_score: u64, seed: u64) -> Self {
        let ground_top = settings.screen_height * GROUND_LEVEL;
        let ground_height = atlas.size(SpriteId::Ground).y;
        let runner = Runner::new(ground_top - ground_height, &settings, &atlas);

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            settings,
            atlas,
            phase: GamePhase::Attract,
            elapsed: Duration::ZERO,
            time_ticks: 0,
            bonus: 0,
            score: Score::new(high_score),
            runner,
            ground: Vec::new(),
            clouds: Vec::new(),
            cacti: Vec::new(),
            birds: Vec::new(),
            stars: Vec::new(),
            moons: Vec::new(),
            bullets: Vec::new(),
            hazards_enabled: true,
            events: Vec::new(),
            next_id: 1,
        };

        let id = state.next_entity_id();
        state.ground.push(Obstacle::new(
            id,
            ObstacleKind::Ground,
            Vec2::new(0.0, ground_top),
        ));
        super::spawn::init_clouds(&mut state);

        state
    }

    /// Disable cactus and bird spawning
    pub fn without_hazards(mut self) -> Self {
        self.hazards_enabled = false;
        self
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Current ground tile. The strip is never empty.
    pub fn ground_tile(&self) -> &Obstacle {
        self.ground
            .first()
            .expect("ground strip must always hold at least one tile")
    }

    /// Top edge of the ground
    pub fn ground_top(&self) -> f32 {
        self.ground_tile().pos.y
    }

    pub fn ground_height(&self) -> f32 {
        self.atlas.size(SpriteId::Ground).y
    }

    /// Play time in whole deciseconds
    pub fn deciseconds(&self) -> u64 {
        crate::deciseconds(self.elapsed)
    }

    /// Shots available right now
    pub fn bullets_available(&self) -> usize {
        self.settings
            .bullet_capacity()
            .saturating_sub(self.bullets.len())
    }

    /// Reload progress in [0, 1] while the magazine is empty
    pub fn reload_progress(&self) -> Option<f32> {
        if self.bullets_available() > 0 {
            return None;
        }
        let last = self.bullets.last()?;
        Some((last.pos.x / self.settings.screen_width.max(1.0)).clamp(0.0, 1.0))
    }

    /// Retry button on the game-over screen
    pub fn retry_button(&self) -> Rect {
        let center = Vec2::new(
            self.settings.screen_width / 2.0,
            self.settings.screen_height * 2.0 / 3.0,
        );
        Rect::from_center(center, self.atlas.size(SpriteId::RetryButton))
    }

    /// Remove everything dead
    pub fn sweep(&mut self) {
        for group in [
            &mut self.ground,
            &mut self.clouds,
            &mut self.cacti,
            &mut self.birds,
            &mut self.stars,
            &mut self.moons,
        ] {
            group.retain(|o| o.alive);
        }
        self.bullets.retain(|b| b.alive);
    }

    /// Number of live entities across every collection
    pub fn entity_count(&self) -> usize {
        self.ground.len()
            + self.clouds.len()
            + self.cacti.len()
            + self.birds.len()
            + self.stars.len()
            + self.moons.len()
            + self.bullets.len()
    }

    /// Hand out this tick's events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
