//! Procedural spawning of scenery and hazards
//!
//! Everything is paced by play time in deciseconds. Cacti and birds are
//! mutually exclusive: a new hazard only appears once the other kind is gone.

use glam::Vec2;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use super::motion::Animation;
use super::sprite::{BIRD_FRAMES, CACTUS_VARIANTS, MOON_PHASES, STAR_VARIANTS, SpriteId};
use super::state::{GameState, Obstacle, ObstacleKind};
use crate::consts::GROUND_SEAM_OVERLAP;

/// No cacti before this
pub const CACTUS_AFTER_DECI: u64 = 40;
/// Birds join the hazard roll after this
pub const BIRD_AFTER_DECI: u64 = 450;
/// No stars before this
pub const STAR_AFTER_DECI: u64 = 600;
/// Stars only spawn in hundred-decisecond windows divisible by this
pub const STAR_WINDOW: u64 = 3;
/// No moon before this
pub const MOON_AFTER_DECI: u64 = 850;
/// Moon only rises on multiples of this
pub const MOON_PERIOD_DECI: u64 = 300;

pub const CLOUD_COUNT: usize = 3;
/// Horizontal spacing for staggered clouds and stars
pub const STAGGER_X: f32 = 250.0;
/// Space between cacti in a cluster
pub const CACTUS_GAP: f32 = 2.0;

/// Cluster sizes and their relative weights
pub const CLUSTER_SIZES: [usize; 4] = [1, 2, 3, 4];
pub const CLUSTER_WEIGHTS: [f32; 4] = [0.4, 0.2, 0.1, 0.1];

/// Which ground hazard this tick's roll favours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hazard {
    Cactus,
    Bird,
}

/// The three altitudes a bird can fly at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirdBand {
    /// Just clear of a standing runner's head: crouch under it
    High,
    /// Skimming the ground: jump it
    Low,
    /// Level with the runner's current head: jump it
    Head,
}

impl BirdBand {
    pub const ALL: [BirdBand; 3] = [BirdBand::High, BirdBand::Low, BirdBand::Head];
}

/// Seed the sky with staggered clouds
pub fn init_clouds(state: &mut GameState) {
    for i in 1..=CLOUD_COUNT {
        spawn_cloud(state, i as f32 * STAGGER_X);
    }
}

/// Run every spawn rule for one tick
pub fn spawn_tick(state: &mut GameState, deci: u64) {
    extend_ground(state);

    if state.clouds.len() < CLOUD_COUNT {
        spawn_cloud(state, 0.0);
    }

    if deci > STAR_AFTER_DECI && (deci / 100).is_multiple_of(STAR_WINDOW) && state.stars.is_empty() {
        spawn_stars(state);
    }

    if state.hazards_enabled {
        let hazard = if deci > BIRD_AFTER_DECI && state.rng.random_bool(0.5) {
            Hazard::Bird
        } else {
            Hazard::Cactus
        };
        match hazard {
            Hazard::Cactus => {
                if state.birds.is_empty() && deci > CACTUS_AFTER_DECI && state.cacti.is_empty() {
                    spawn_cactus_cluster(state);
                }
            }
            Hazard::Bird => {
                if state.cacti.is_empty() && state.birds.is_empty() {
                    let band = BirdBand::ALL[state.rng.random_range(0..BirdBand::ALL.len())];
                    spawn_bird(state, band);
                }
            }
        }
    }

    if deci > MOON_AFTER_DECI && deci.is_multiple_of(MOON_PERIOD_DECI) && state.moons.is_empty() {
        spawn_moon(state);
    }
}

/// Append a tile once the last one's right edge is on screen
fn extend_ground(state: &mut GameState) {
    let width = state.atlas.size(SpriteId::Ground).x;
    let screen_right = state.settings.screen_width;
    let last = state
        .ground
        .last()
        .expect("ground strip must always hold at least one tile");
    let (right, top) = (last.pos.x + width, last.pos.y);

    if state.ground.len() < 2 && right <= screen_right {
        let id = state.next_entity_id();
        state.ground.push(Obstacle::new(
            id,
            ObstacleKind::Ground,
            Vec2::new(right - GROUND_SEAM_OVERLAP, top),
        ));
    }
}

/// New cloud just past the right edge, plus `extra_x`
pub fn spawn_cloud(state: &mut GameState, extra_x: f32) {
    let size = state.atlas.size(SpriteId::Cloud);
    let h = state.settings.screen_height;
    let center = Vec2::new(
        state.settings.screen_width + size.x + extra_x,
        state.rng.random_range(h * 0.40..h * 0.65),
    );
    let id = state.next_entity_id();
    state
        .clouds
        .push(Obstacle::new(id, ObstacleKind::Cloud, center - size * 0.5));
}

/// One to three stars, staggered horizontally
fn spawn_stars(state: &mut GameState) {
    let count = state.rng.random_range(1..=3);
    let h = state.settings.screen_height;
    for i in 0..count {
        let variant = state.rng.random_range(0..STAR_VARIANTS);
        let size = state.atlas.size(SpriteId::Star(variant));
        let center = Vec2::new(
            state.settings.screen_width + size.x + i as f32 * STAGGER_X,
            state.rng.random_range(h * 0.45..h * 0.60),
        );
        let id = state.next_entity_id();
        state.stars.push(Obstacle::new(
            id,
            ObstacleKind::Star { variant },
            center - size * 0.5,
        ));
    }
    log::debug!("spawned {} stars", count);
}

/// Moon in a random phase at the right edge
fn spawn_moon(state: &mut GameState) {
    let phase = state.rng.random_range(0..MOON_PHASES);
    let size = state.atlas.size(SpriteId::Moon(phase));
    let center = Vec2::new(
        state.settings.screen_width,
        state.settings.screen_height * 0.45,
    );
    let id = state.next_entity_id();
    state.moons.push(Obstacle::new(
        id,
        ObstacleKind::Moon { phase },
        center - size * 0.5,
    ));
    log::debug!("moon rises (phase {})", phase);
}

/// Draw a cluster size, weights taken relative to their sum
pub fn cluster_size<R: Rng + ?Sized>(rng: &mut R) -> usize {
    match WeightedIndex::new(CLUSTER_WEIGHTS) {
        Ok(dist) => CLUSTER_SIZES[dist.sample(rng)],
        Err(_) => CLUSTER_SIZES[0],
    }
}

/// `n` distinct cactus variants, resampling on repeats
pub fn unique_variants<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<u8> {
    let n = n.min(CACTUS_VARIANTS as usize);
    let mut picked = Vec::with_capacity(n);
    while picked.len() < n {
        let variant = rng.random_range(0..CACTUS_VARIANTS);
        if !picked.contains(&variant) {
            picked.push(variant);
        }
    }
    picked
}

/// A left-to-right row of distinct cacti starting at the right edge.
/// Returns the cluster size.
pub fn spawn_cactus_cluster(state: &mut GameState) -> usize {
    let size = cluster_size(&mut state.rng);
    let variants = unique_variants(&mut state.rng, size);
    let rest_y = state.ground_top() + state.ground_height() / 2.0;

    let mut next_left: Option<f32> = None;
    for variant in variants {
        let dims = state.atlas.size(SpriteId::Cactus { variant, damaged: false });
        let left = next_left.unwrap_or(state.settings.screen_width - dims.x / 2.0);
        let top = rest_y - dims.y / 3.0 - dims.y / 2.0;
        let id = state.next_entity_id();
        state.cacti.push(Obstacle::new(
            id,
            ObstacleKind::Cactus { variant },
            Vec2::new(left, top),
        ));
        next_left = Some(left + dims.x + CACTUS_GAP);
    }
    log::debug!("spawned cactus cluster of {}", size);
    size
}

/// Top edge for a bird of `height` flying in `band`
pub fn bird_top(state: &GameState, band: BirdBand, height: f32) -> f32 {
    let ground_top = state.ground_top();
    let ground_h = state.ground_height();
    match band {
        BirdBand::High => ground_top - state.runner.size.y - ground_h * 0.75,
        BirdBand::Low => ground_top + ground_h - height,
        BirdBand::Head => state.runner.top,
    }
}

/// A bird entering from the right edge at `band`
pub fn spawn_bird(state: &mut GameState, band: BirdBand) {
    let height = state.atlas.size(SpriteId::Bird { frame: 0, damaged: false }).y;
    let top = bird_top(state, band, height);
    let id = state.next_entity_id();
    let bird = Obstacle::new(
        id,
        ObstacleKind::Bird,
        Vec2::new(state.settings.screen_width, top),
    )
    .with_animation(Animation::new(
        BIRD_FRAMES,
        state.settings.bird_animation_velocity,
    ));
    state.birds.push(bird);
    log::debug!("spawned bird ({:?})", band);
}
