//! Collision detection and combat resolution
//!
//! Hazards kill the runner on contact. Bullets take two hits to destroy a
//! target: the first marks it damaged, the second removes it and awards a
//! bonus.

use glam::Vec2;

use super::sprite::{Atlas, SpriteId};
use super::state::{GameEvent, GameState, Obstacle};
use crate::settings::CollisionPolicy;

/// A sprite placed on screen
#[derive(Debug, Clone, Copy)]
pub struct Placed {
    pub sprite: SpriteId,
    /// Top-left corner
    pub pos: Vec2,
}

impl Placed {
    pub fn new(sprite: SpriteId, pos: Vec2) -> Self {
        Self { sprite, pos }
    }
}

/// Radius used by circle collision
///
/// Birds get a tight radius relative to their wing span; everything else
/// uses half its bounding-box diagonal.
pub fn circle_radius(sprite: SpriteId, size: Vec2) -> f32 {
    match sprite {
        SpriteId::Bird { .. } => size.x * 0.3,
        _ => size.length() * 0.5,
    }
}

/// Do two placed sprites touch under `policy`?
pub fn sprites_collide(atlas: &Atlas, policy: CollisionPolicy, a: Placed, b: Placed) -> bool {
    match policy {
        CollisionPolicy::Mask => {
            let a_pos = a.pos.floor();
            let b_pos = b.pos.floor();
            let offset = b_pos - a_pos;
            atlas
                .mask(a.sprite)
                .overlaps(atlas.mask(b.sprite), (offset.x as i32, offset.y as i32))
        }
        CollisionPolicy::Circle => {
            let a_size = atlas.size(a.sprite);
            let b_size = atlas.size(b.sprite);
            let a_center = a.pos + a_size * 0.5;
            let b_center = b.pos + b_size * 0.5;
            let reach = circle_radius(a.sprite, a_size) + circle_radius(b.sprite, b_size);
            a_center.distance_squared(b_center) <= reach * reach
        }
    }
}

fn placed(obstacle: &Obstacle) -> Placed {
    Placed::new(obstacle.sprite(), obstacle.pos)
}

/// Runner against every live cactus and bird. Struck hazards are removed.
/// Returns true if the runner was hit.
pub fn resolve_lethal(state: &mut GameState) -> bool {
    let policy = state.settings.collision;
    let runner = Placed::new(state.runner.sprite(), state.runner.position());
    let atlas = &state.atlas;

    let mut hit = false;
    for group in [&mut state.cacti, &mut state.birds] {
        for obstacle in group.iter_mut().filter(|o| o.alive) {
            if sprites_collide(atlas, policy, runner, placed(obstacle)) {
                obstacle.alive = false;
                hit = true;
            }
        }
        group.retain(|o| o.alive);
    }
    hit
}

/// Bullets against birds, then cacti
///
/// Every bullet that touches a target is consumed. Resolution stops for the
/// tick at the first kill; bullets not yet examined fly on and are checked
/// next tick. Returns the bonus earned.
pub fn resolve_projectiles(state: &mut GameState) -> u64 {
    let policy = state.settings.collision;
    let atlas = &state.atlas;
    let mut bonus = 0;
    let mut events = Vec::new();

    'bullets: for bullet in state.bullets.iter_mut().filter(|b| b.alive) {
        let shot = Placed::new(SpriteId::Bullet, bullet.pos);
        for group in [&mut state.birds, &mut state.cacti] {
            for target in group.iter_mut().filter(|o| o.alive) {
                let Some(kind) = target.kind.target() else {
                    continue;
                };
                if !sprites_collide(atlas, policy, shot, placed(target)) {
                    continue;
                }
                bullet.alive = false;
                if target.damaged {
                    target.alive = false;
                    bonus += kind.kill_bonus();
                    events.push(GameEvent::TargetDestroyed(kind));
                    break 'bullets;
                }
                target.damaged = true;
                events.push(GameEvent::TargetDamaged(kind));
                continue 'bullets;
            }
        }
    }

    state.birds.retain(|o| o.alive);
    state.cacti.retain(|o| o.alive);
    state.bullets.retain(|b| b.alive);
    state.events.extend(events);
    bonus
}
