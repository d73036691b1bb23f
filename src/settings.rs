//! Game settings and difficulty
//!
//! Static tunables are loaded from an optional JSON file. Scroll speeds and
//! bullet capacity are runtime state: they start at baseline, grow on every
//! score milestone and snap back on restart.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// How the runner is tested against hazards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Per-pixel opacity masks
    #[default]
    Mask,
    /// Centre distance against summed radii
    Circle,
}

impl CollisionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionPolicy::Mask => "mask",
            CollisionPolicy::Circle => "circle",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mask" | "pixel" => Some(CollisionPolicy::Mask),
            "circle" | "radius" => Some(CollisionPolicy::Circle),
            _ => None,
        }
    }
}

/// Scroll velocities (pixels per tick) and bullet capacity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speeds {
    pub cloud: f32,
    pub ground: f32,
    pub star: f32,
    pub moon: f32,
    pub bird: f32,
    /// Fractional so that growth accumulates between milestones
    pub bullet_capacity: f32,
}

impl Speeds {
    pub const BASELINE: Speeds = Speeds {
        cloud: 1.0,
        ground: 13.0,
        star: 0.9,
        moon: 0.8,
        bird: 8.0,
        bullet_capacity: 2.0,
    };
}

impl Default for Speeds {
    fn default() -> Self {
        Self::BASELINE
    }
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub background_color: [u8; 3],
    /// Text, bullets and HUD
    pub items_color: [u8; 3],
    /// Score text right after a milestone
    pub highlight_color: [u8; 3],
    pub text_size: u32,

    // === Animation (frames advanced per tick) ===
    pub character_animation_velocity: f32,
    pub bird_animation_velocity: f32,

    // === Bullets ===
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,

    // === Physics ===
    /// Ticks from take-off to apex
    pub jump_count: i32,
    /// Gravity-equivalent factor in the jump step
    pub jump_curve: f32,
    pub fps: u32,

    // === Difficulty ===
    /// Growth applied per milestone
    pub difficulty_scale: f32,
    pub collision: CollisionPolicy,

    /// Current speeds (never persisted)
    #[serde(skip)]
    pub speeds: Speeds,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            background_color: [5, 11, 7],
            items_color: [141, 203, 159],
            highlight_color: [255, 255, 255],
            text_size: 20,

            character_animation_velocity: 0.2,
            bird_animation_velocity: 0.08,

            bullet_width: 15.0,
            bullet_height: 3.0,
            bullet_speed: 7.0,

            jump_count: 14,
            jump_curve: 0.5,
            fps: 60,

            difficulty_scale: 0.01,
            collision: CollisionPolicy::Mask,

            speeds: Speeds::BASELINE,
        }
    }
}

impl Settings {
    /// Speed everything up by `difficulty_scale`
    pub fn increase_difficulty(&mut self) {
        let factor = 1.0 + self.difficulty_scale.max(0.0);
        let s = &mut self.speeds;
        s.cloud *= factor;
        s.ground *= factor;
        s.star *= factor;
        s.moon *= factor;
        s.bird *= factor;
        s.bullet_capacity *= factor;
    }

    /// Restore baseline speeds and capacity
    pub fn reset_difficulty(&mut self) {
        self.speeds = Speeds::BASELINE;
    }

    /// Whole bullets that may be in flight at once
    pub fn bullet_capacity(&self) -> usize {
        self.speeds.bullet_capacity.floor() as usize
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Could not read settings {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
