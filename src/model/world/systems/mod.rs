pub mod bombers;
pub mod bullets;
pub mod cannons;
pub mod explosions;
pub mod mines;
pub mod queen;
pub mod spawning;
pub mod walkers;
pub mod workers;
pub mod zombies;

use crate::model::arena::EntityId;
use crate::model::entity::EntityState;
use crate::model::world::World;

/// Chip `amount` off a wall. Strength never goes below zero; a zero-strength
/// wall shows `@` until the wall prune sweep removes it.
pub(crate) fn damage_wall(world: &mut World, id: EntityId, amount: i16) {
    if let Some(EntityState::Wall { strength }) = world.entity_mut(id).map(|e| &mut e.state) {
        *strength = (*strength - amount).max(0);
    }
}

/// Light a mine's fuse. Arming records the current tick so the detonation
/// sweep explodes it on a later tick, never the one it was triggered on.
/// A lit fuse is never re-armed.
pub(crate) fn arm_mine(world: &mut World, id: EntityId) {
    let tick = world.tick;
    if let Some(EntityState::Mine { armed_at }) = world.entity_mut(id).map(|e| &mut e.state) {
        if armed_at.is_none() {
            *armed_at = Some(tick);
        }
    }
}

/// Flag a projectile (either allegiance) for the next collided-prune pass.
pub(crate) fn mark_collided(world: &mut World, id: EntityId) {
    match world.entity_mut(id).map(|e| &mut e.state) {
        Some(EntityState::Bullet { collided, .. })
        | Some(EntityState::EnemyBullet { collided, .. }) => *collided = true,
        _ => {}
    }
}
