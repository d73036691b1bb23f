//! The player character: walk, crouch, jump, crash
//!
//! Jump physics use a signed counter running from `J` down to `-J`. Each tick
//! moves the runner by a quadratic step of the counter, upward while the
//! counter is non-negative and downward after, so the arc is symmetric and
//! lands exactly on the baseline after `2J + 1` ticks.

use glam::Vec2;

use super::motion::Animation;
use super::sprite::{Atlas, RUNNER_CROUCH_FRAMES, RUNNER_WALK_FRAMES, SpriteId};
use crate::Rect;
use crate::consts::{RUNNER_CROUCH_OFFSET, RUNNER_MUZZLE, RUNNER_STAND_OFFSET};
use crate::settings::Settings;

/// Runner state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Walking,
    Crouching,
    Jumping,
    /// Hit a hazard; frozen until reset
    Collided,
}

/// Vertical displacement (screen space, negative is up) for one jump tick
#[inline]
pub fn jump_step(counter: i32, curve: f32) -> f32 {
    let sign = if counter >= 0 { 1.0 } else { -1.0 };
    let c = counter as f32;
    -(c * c * curve * sign) / 2.0
}

/// The player's character
#[derive(Debug, Clone)]
pub struct Runner {
    /// Fixed left edge
    pub x: f32,
    /// Current top edge
    pub top: f32,
    /// Reference line the standing and crouching poses hang from
    pub baseline: f32,
    /// Standing sprite size
    pub size: Vec2,
    pub state: RunnerState,
    pub jump_counter: i32,
    jump_max: i32,
    animation: Animation,
}

impl Runner {
    pub fn new(baseline: f32, settings: &Settings, atlas: &Atlas) -> Self {
        let size = atlas.size(SpriteId::RunnerJump);
        let mut runner = Self {
            x: size.x * 0.5,
            top: 0.0,
            baseline,
            size,
            state: RunnerState::Walking,
            jump_counter: settings.jump_count,
            jump_max: settings.jump_count,
            animation: Animation::new(RUNNER_WALK_FRAMES, settings.character_animation_velocity),
        };
        runner.top = runner.standing_top();
        runner
    }

    #[inline]
    pub fn standing_top(&self) -> f32 {
        self.baseline - self.size.y * RUNNER_STAND_OFFSET
    }

    #[inline]
    pub fn crouching_top(&self) -> f32 {
        self.baseline - self.size.y * RUNNER_CROUCH_OFFSET
    }

    pub fn is_airborne(&self) -> bool {
        self.state == RunnerState::Jumping
    }

    pub fn is_collided(&self) -> bool {
        self.state == RunnerState::Collided
    }

    /// Start a jump. Returns true if the runner actually took off.
    pub fn jump(&mut self) -> bool {
        if self.state != RunnerState::Walking {
            return false;
        }
        self.state = RunnerState::Jumping;
        self.jump_counter = self.jump_max;
        true
    }

    /// Apply the held state of the crouch input
    pub fn crouch(&mut self, held: bool) {
        match (self.state, held) {
            (RunnerState::Walking | RunnerState::Jumping, true) => {
                self.state = RunnerState::Crouching;
                self.jump_counter = self.jump_max;
            }
            (RunnerState::Crouching, false) => self.state = RunnerState::Walking,
            _ => {}
        }
    }

    /// Advance one tick of animation and physics
    pub fn update(&mut self, settings: &Settings) {
        match self.state {
            RunnerState::Walking => {
                self.top = self.standing_top();
                self.animation.advance();
            }
            RunnerState::Crouching => {
                self.top = self.crouching_top();
                self.jump_counter = self.jump_max;
                self.animation.advance();
            }
            RunnerState::Jumping => {
                self.top += jump_step(self.jump_counter, settings.jump_curve);
                self.jump_counter -= 1;
                if self.jump_counter < -self.jump_max {
                    self.state = RunnerState::Walking;
                    self.jump_counter = self.jump_max;
                    self.top = self.standing_top();
                }
            }
            RunnerState::Collided => {}
        }
    }

    /// Freeze on the hit pose
    pub fn collide(&mut self) {
        if self.state == RunnerState::Crouching {
            // The hit pose is full height; don't sink it into the ground
            self.top = self.standing_top();
        }
        self.state = RunnerState::Collided;
    }

    /// Back to walking on the baseline
    pub fn reset(&mut self) {
        self.state = RunnerState::Walking;
        self.jump_counter = self.jump_max;
        self.top = self.standing_top();
    }

    /// Image for the current state
    pub fn sprite(&self) -> SpriteId {
        match self.state {
            RunnerState::Walking => SpriteId::RunnerWalk(self.animation.frame() as u8),
            RunnerState::Crouching => {
                let frame = self.animation.frame().min(RUNNER_CROUCH_FRAMES - 1);
                SpriteId::RunnerCrouch(frame as u8)
            }
            RunnerState::Jumping => SpriteId::RunnerJump,
            RunnerState::Collided => SpriteId::RunnerHit,
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.top)
    }

    /// Bounds of the current image
    pub fn bounds(&self, atlas: &Atlas) -> Rect {
        Rect::new(self.position(), atlas.size(self.sprite()))
    }

    /// Where a fired bullet's top-left corner starts
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.x + self.size.x, self.top + self.size.y * RUNNER_MUZZLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn runner() -> (Runner, Settings) {
        let settings = Settings::default();
        let atlas = Atlas::builtin(&settings);
        (Runner::new(351.0, &settings, &atlas), settings)
    }

    #[test]
    fn test_starts_walking_on_baseline() {
        let (r, _) = runner();
        assert_eq!(r.state, RunnerState::Walking);
        assert_eq!(r.top, 351.0 - 47.0);
        assert_eq!(r.x, 44.0);
    }

    #[test]
    fn test_jump_lands_after_2j_plus_1_ticks() {
        let (mut r, settings) = runner();
        let j = settings.jump_count;
        let ground = r.top;
        assert!(r.jump());

        for t in 1..=(2 * j + 1) {
            r.update(&settings);
            if t < 2 * j + 1 {
                assert_eq!(r.state, RunnerState::Jumping, "landed early at tick {t}");
                assert!(r.top < ground);
            }
        }
        assert_eq!(r.state, RunnerState::Walking);
        assert_eq!(r.top, ground);
        assert_eq!(r.jump_counter, j);
    }

    #[test]
    fn test_apex_height() {
        let (mut r, settings) = runner();
        let ground = r.top;
        r.jump();
        // counters 14..=0 are all upward steps
        for _ in 0..=settings.jump_count {
            r.update(&settings);
        }
        // sum of c^2 / 4 for c in 0..=14
        assert_eq!(ground - r.top, 1015.0 / 4.0);
    }

    #[test]
    fn test_no_restacking_mid_air() {
        let (mut r, settings) = runner();
        assert!(r.jump());
        r.update(&settings);
        let counter = r.jump_counter;
        assert!(!r.jump());
        assert_eq!(r.jump_counter, counter);
    }

    #[test]
    fn test_crouch_suppresses_jump_and_release_walks() {
        let (mut r, settings) = runner();
        r.crouch(true);
        r.update(&settings);
        assert_eq!(r.state, RunnerState::Crouching);
        assert_eq!(r.top, r.crouching_top());
        assert!(!r.jump());
        r.crouch(false);
        r.update(&settings);
        assert_eq!(r.state, RunnerState::Walking);
        assert_eq!(r.top, r.standing_top());
    }

    #[test]
    fn test_crouch_cancels_jump() {
        let (mut r, settings) = runner();
        r.jump();
        r.update(&settings);
        r.update(&settings);
        r.crouch(true);
        r.update(&settings);
        assert_eq!(r.state, RunnerState::Crouching);
        assert_eq!(r.jump_counter, settings.jump_count);
        assert_eq!(r.top, r.crouching_top());
    }

    #[test]
    fn test_collide_from_crouch_restores_standing_top() {
        let (mut r, settings) = runner();
        r.crouch(true);
        r.update(&settings);
        r.collide();
        assert_eq!(r.state, RunnerState::Collided);
        assert_eq!(r.top, r.standing_top());
        assert_eq!(r.sprite(), SpriteId::RunnerHit);

        // Frozen
        let top = r.top;
        r.crouch(false);
        assert!(!r.jump());
        r.update(&settings);
        assert_eq!(r.top, top);
        assert_eq!(r.state, RunnerState::Collided);

        r.reset();
        assert_eq!(r.state, RunnerState::Walking);
    }

    #[test]
    fn test_sprite_per_state() {
        let (mut r, _) = runner();
        assert!(matches!(r.sprite(), SpriteId::RunnerWalk(_)));
        r.jump();
        assert_eq!(r.sprite(), SpriteId::RunnerJump);
        r.crouch(true);
        assert!(matches!(r.sprite(), SpriteId::RunnerCrouch(_)));
    }

    proptest! {
        #[test]
        fn prop_jump_steps_mirror(k in 1i32..64, curve in 0.1f32..2.0) {
            prop_assert_eq!(jump_step(k, curve), -jump_step(-k, curve));
            prop_assert!(jump_step(k, curve) < 0.0);
        }

        #[test]
        fn prop_every_arc_returns_to_ground(j in 1i32..40) {
            let mut settings = Settings::default();
            settings.jump_count = j;
            let atlas = Atlas::builtin(&settings);
            let mut r = Runner::new(351.0, &settings, &atlas);
            let ground = r.top;
            r.jump();
            for _ in 0..(2 * j + 1) {
                r.update(&settings);
            }
            prop_assert_eq!(r.state, RunnerState::Walking);
            prop_assert_eq!(r.top, ground);
        }
    }
}
