//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Events queued per tick, never played directly
//! - No rendering or platform dependencies

pub mod collision;
pub mod mask;
pub mod motion;
pub mod runner;
pub mod score;
pub mod spawn;
pub mod sprite;
pub mod state;
pub mod tick;

pub use collision::{Placed, resolve_lethal, resolve_projectiles, sprites_collide};
pub use mask::Mask;
pub use motion::{Animation, scroll_left, scroll_right};
pub use runner::{Runner, RunnerState, jump_step};
pub use score::{Score, format_score};
pub use sprite::{Atlas, SpriteId};
pub use state::{
    Bullet, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, TargetKind,
};
pub use tick::{TickInput, autopilot, tick};
