//! Movement and animation primitives shared by every scrolling entity

use glam::Vec2;

/// Move `pos` left by `velocity`. Returns false once the entity's right edge
/// (`pos.x + width`) has left the screen.
#[inline]
pub fn scroll_left(pos: &mut Vec2, velocity: f32, width: f32) -> bool {
    pos.x -= velocity;
    pos.x + width > 0.0
}

/// Move `pos` right by `velocity`. Returns false once the left edge is past
/// `screen_width`.
#[inline]
pub fn scroll_right(pos: &mut Vec2, velocity: f32, screen_width: f32) -> bool {
    pos.x += velocity;
    pos.x < screen_width
}

/// Cycles through `len` frames at `rate` frames per tick
///
/// The rate may be fractional, so a frame can stay on screen for several
/// ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    cursor: f32,
    rate: f32,
    len: usize,
}

impl Animation {
    pub fn new(len: usize, rate: f32) -> Self {
        Self {
            cursor: 0.0,
            rate,
            len: len.max(1),
        }
    }

    /// Advance one tick, wrapping to the first frame
    pub fn advance(&mut self) {
        self.cursor += self.rate;
        if self.cursor >= self.len as f32 {
            self.cursor = 0.0;
        }
    }

    /// Index of the frame to display
    #[inline]
    pub fn frame(&self) -> usize {
        (self.cursor as usize).min(self.len - 1)
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }
}
