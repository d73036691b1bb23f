//! T-Rex Runner - a side-scrolling arcade runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (runner physics, spawning, collisions, score)
//! - `renderer`: Draw list handed to an external graphics layer
//! - `platform`: Input folding and frame pacing
//! - `audio`: Named sound cues for an external audio layer
//! - `settings`: Tunables and difficulty scaling

pub mod audio;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::{HighScore, finish_session};
pub use settings::{CollisionPolicy, Settings};

use std::time::Duration;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Length of one decisecond, the game's pacing unit
    pub const DECISECOND_MS: u128 = 100;

    /// Screen defaults
    pub const SCREEN_WIDTH: f32 = 1000.0;
    pub const SCREEN_HEIGHT: f32 = 500.0;

    /// Ground top as a fraction of screen height
    pub const GROUND_LEVEL: f32 = 0.75;
    /// Each new ground tile tucks this far under the previous one
    pub const GROUND_SEAM_OVERLAP: f32 = 15.0;

    /// Standing top = baseline - height * this
    pub const RUNNER_STAND_OFFSET: f32 = 0.5;
    /// Crouching top = baseline - height * this
    pub const RUNNER_CROUCH_OFFSET: f32 = 0.12;
    /// Muzzle height as a fraction of the runner's standing height
    pub const RUNNER_MUZZLE: f32 = 0.4361;

    /// Points for destroying a cactus / bird
    pub const CACTUS_KILL_BONUS: u64 = 4;
    pub const BIRD_KILL_BONUS: u64 = 8;
}

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Build a rect of `size` centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size * 0.5,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap (touching edges do not count)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

/// Whole deciseconds in an elapsed duration
#[inline]
pub fn deciseconds(elapsed: Duration) -> u64 {
    (elapsed.as_millis() / consts::DECISECOND_MS) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deciseconds_truncates() {
        assert_eq!(deciseconds(Duration::from_millis(0)), 0);
        assert_eq!(deciseconds(Duration::from_millis(99)), 0);
        assert_eq!(deciseconds(Duration::from_millis(100)), 1);
        assert_eq!(deciseconds(Duration::from_millis(10_050)), 100);
    }

    #[test]
    fn test_rect_edges_and_overlap() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(5.0, 5.0));
        assert_eq!(a.right(), 10.0);
        assert!(!a.intersects(&b)); // touching only
        let c = Rect::from_center(Vec2::new(9.0, 9.0), Vec2::new(4.0, 4.0));
        assert!(a.intersects(&c));
        assert!(a.contains(Vec2::new(0.0, 0.0)));
        assert!(!a.contains(Vec2::new(10.0, 5.0)));
    }
}
