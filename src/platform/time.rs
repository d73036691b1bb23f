//! Fixed-rate frame limiter

use std::time::{Duration, Instant};

/// Paces the loop at a fixed tick rate
///
/// Sleeps until the next tick boundary instead of busy-polling. A loop that
/// falls behind by more than `MAX_LAG_TICKS` drops the backlog rather than
/// trying to catch up.
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    tick: Duration,
    next: Instant,
}

const MAX_LAG_TICKS: u32 = 5;

impl FrameLimiter {
    pub fn new(fps: u32) -> Self {
        let tick = tick_length(fps);
        Self {
            tick,
            next: Instant::now() + tick,
        }
    }

    /// Length of one tick
    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Block until the next tick boundary. Returns the fixed tick length.
    pub fn wait(&mut self) -> Duration {
        let now = Instant::now();
        if let Some(remaining) = self.next.checked_duration_since(now) {
            std::thread::sleep(remaining);
        } else if now - self.next > self.tick * MAX_LAG_TICKS {
            log::debug!("frame limiter dropped {:?} of lag", now - self.next);
            self.next = now;
        }
        self.next += self.tick;
        self.tick
    }
}

/// Duration of one tick at `fps` (clamped to at least 1 fps)
pub fn tick_length(fps: u32) -> Duration {
    Duration::from_secs(1) / fps.max(1)
}
