//! Sprite identifiers and the atlas of their sizes and masks
//!
//! The simulation only needs to know how big each image is and which of its
//! pixels are solid. Loading the actual images is the asset layer's job; it
//! may replace any built-in mask with one derived from the image's alpha.

use std::collections::HashMap;

use glam::Vec2;

use super::mask::Mask;
use crate::settings::Settings;

/// Number of distinct cactus images
pub const CACTUS_VARIANTS: u8 = 13;
/// Number of star images
pub const STAR_VARIANTS: u8 = 3;
/// Number of moon phases
pub const MOON_PHASES: u8 = 7;
/// Frames in the walk, crouch and flap cycles
pub const RUNNER_WALK_FRAMES: usize = 2;
pub const RUNNER_CROUCH_FRAMES: usize = 2;
pub const BIRD_FRAMES: usize = 2;

/// Every image the game can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    RunnerWalk(u8),
    RunnerCrouch(u8),
    /// Mid-air pose; also the standing reference size
    RunnerJump,
    RunnerHit,
    Ground,
    Cloud,
    Cactus { variant: u8, damaged: bool },
    Bird { frame: u8, damaged: bool },
    Star(u8),
    Moon(u8),
    Bullet,
    RetryButton,
}

impl SpriteId {
    /// Asset path relative to the assets directory (bullets are drawn as
    /// plain rectangles and have none)
    pub fn asset_path(&self) -> Option<String> {
        let path = match *self {
            SpriteId::RunnerWalk(i) => format!("t-rex/t-rex-{}.png", 1 + i),
            SpriteId::RunnerCrouch(i) => format!("t-rex/t-rex-{}.png", 5 + i),
            SpriteId::RunnerJump => "t-rex/t-rex-0.png".to_string(),
            SpriteId::RunnerHit => "t-rex/t-rex-4.png".to_string(),
            SpriteId::Ground => "ground/ground.png".to_string(),
            SpriteId::Cloud => "cloud/cloud.png".to_string(),
            SpriteId::Cactus { variant, damaged } => {
                if damaged {
                    format!("cactus/cactus-{variant}-shot.png")
                } else {
                    format!("cactus/cactus-{variant}.png")
                }
            }
            SpriteId::Bird { frame, damaged } => {
                if damaged {
                    format!("bird/bird-{}-shot.png", 1 + frame)
                } else {
                    format!("bird/bird-{}.png", 1 + frame)
                }
            }
            SpriteId::Star(i) => format!("star/star-{}.png", 1 + i),
            SpriteId::Moon(i) => format!("moon/moon-{i}.png"),
            SpriteId::Bullet => return None,
            SpriteId::RetryButton => "button/button.png".to_string(),
        };
        Some(path)
    }

    /// Every sprite the game may ask for
    pub fn all() -> Vec<SpriteId> {
        let mut ids = vec![
            SpriteId::RunnerJump,
            SpriteId::RunnerHit,
            SpriteId::Ground,
            SpriteId::Cloud,
            SpriteId::Bullet,
            SpriteId::RetryButton,
        ];
        ids.extend((0..RUNNER_WALK_FRAMES as u8).map(SpriteId::RunnerWalk));
        ids.extend((0..RUNNER_CROUCH_FRAMES as u8).map(SpriteId::RunnerCrouch));
        for damaged in [false, true] {
            ids.extend((0..CACTUS_VARIANTS).map(|variant| SpriteId::Cactus { variant, damaged }));
            ids.extend((0..BIRD_FRAMES as u8).map(|frame| SpriteId::Bird { frame, damaged }));
        }
        ids.extend((0..STAR_VARIANTS).map(SpriteId::Star));
        ids.extend((0..MOON_PHASES).map(SpriteId::Moon));
        ids
    }
}

/// Built-in (width, height) per cactus variant: small, large and wide clumps
const CACTUS_SIZES: [(u32, u32); CACTUS_VARIANTS as usize] = [
    (34, 70),
    (68, 70),
    (102, 70),
    (50, 100),
    (100, 100),
    (150, 100),
    (30, 62),
    (46, 92),
    (64, 70),
    (96, 100),
    (40, 80),
    (80, 80),
    (75, 96),
];

fn builtin_size(id: SpriteId, settings: &Settings) -> (u32, u32) {
    match id {
        SpriteId::RunnerWalk(_) | SpriteId::RunnerJump | SpriteId::RunnerHit => (88, 94),
        SpriteId::RunnerCrouch(_) => (118, 60),
        SpriteId::Ground => (1200, 24),
        SpriteId::Cloud => (92, 27),
        SpriteId::Cactus { variant, .. } => {
            CACTUS_SIZES[(variant % CACTUS_VARIANTS) as usize]
        }
        SpriteId::Bird { .. } => (92, 68),
        SpriteId::Star(_) => (18, 17),
        SpriteId::Moon(_) => (40, 80),
        SpriteId::Bullet => (
            settings.bullet_width.max(1.0) as u32,
            settings.bullet_height.max(1.0) as u32,
        ),
        SpriteId::RetryButton => (72, 64),
    }
}

/// Sizes and collision masks for every sprite
#[derive(Debug, Clone)]
pub struct Atlas {
    masks: HashMap<SpriteId, Mask>,
}

impl Atlas {
    /// Built-in sizes with solid rectangular masks
    pub fn builtin(settings: &Settings) -> Self {
        let masks = SpriteId::all()
            .into_iter()
            .map(|id| {
                let (w, h) = builtin_size(id, settings);
                (id, Mask::full(w, h))
            })
            .collect();
        Self { masks }
    }

    /// Replace a sprite's mask (and with it, its size)
    pub fn insert(&mut self, id: SpriteId, mask: Mask) {
        self.masks.insert(id, mask);
    }

    /// Collision mask for a sprite
    pub fn mask(&self, id: SpriteId) -> &Mask {
        self.masks
            .get(&id)
            .unwrap_or_else(|| panic!("sprite {id:?} missing from atlas"))
    }

    /// Sprite size in pixels
    pub fn size(&self, id: SpriteId) -> Vec2 {
        let mask = self.mask(id);
        Vec2::new(mask.width() as f32, mask.height() as f32)
    }
}
