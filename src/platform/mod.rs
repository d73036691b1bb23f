//! Platform abstraction layer
//!
//! Handles the device side of the loop for:
//! - Time/ticks (fixed-rate frame limiter)
//! - Input events (folded into one `TickInput` per tick)

pub mod input;
pub mod time;

pub use input::{InputEvent, InputState};
pub use time::FrameLimiter;
