use crate::model::arena::EntityId;
use crate::model::entity::{EntityKind, EntityState};
use crate::model::geometry::{Cell, Direction};
use crate::model::world::systems::{arm_mine, cannons, damage_wall, mark_collided, queen};
use crate::model::world::{Outcome, World};

/// Remove friendly bullets flagged by a head-on pass. Runs before and after
/// the movement sweep so a flagged pair never survives into the next tick.
pub(crate) fn prune_friendly(world: &mut World) {
    let flagged: Vec<_> = world
        .registries
        .bullets
        .iter()
        .copied()
        .filter(|&id| {
            matches!(
                world.entity(id).map(|e| &e.state),
                Some(EntityState::Bullet { collided: true, .. })
            )
        })
        .collect();
    for id in flagged {
        world.despawn(id);
    }
}

pub(crate) fn prune_enemy(world: &mut World) {
    let flagged: Vec<_> = world
        .registries
        .enemy_bullets
        .iter()
        .copied()
        .filter(|&id| {
            matches!(
                world.entity(id).map(|e| &e.state),
                Some(EntityState::EnemyBullet { collided: true, .. })
            )
        })
        .collect();
    for id in flagged {
        world.despawn(id);
    }
}

pub(crate) fn sweep_friendly(world: &mut World) {
    for id in world.registries.bullets.clone() {
        let Some(entity) = world.entity(id) else {
            continue;
        };
        let EntityState::Bullet {
            dir,
            speed,
            collided,
        } = entity.state
        else {
            continue;
        };
        if collided {
            continue;
        }
        let mut pos = entity.pos;
        for _ in 0..speed {
            match step_friendly(world, id, pos, dir) {
                Some(next) => pos = next,
                None => break,
            }
        }
    }
}

/// Advance a friendly bullet one cell. Returns the new position while the
/// bullet is still in flight, `None` once it has hit something or left the
/// board.
fn step_friendly(world: &mut World, id: EntityId, pos: Cell, dir: Direction) -> Option<Cell> {
    let target = pos.step(dir);
    if world.field.out_of_bounds(target) {
        world.despawn(id);
        return None;
    }
    let Some((other, kind)) = world.kind_at(target) else {
        let _ = world.move_entity(id, target);
        return Some(target);
    };
    match kind {
        EntityKind::Wall => damage_wall(world, other, 1),
        EntityKind::Zombie | EntityKind::Walker => world.despawn(other),
        // Head-on: both projectiles are flagged and fall to the prune pass,
        // so a pair passing through each other cannot survive.
        EntityKind::Bullet | EntityKind::EnemyBullet => {
            mark_collided(world, other);
            mark_collided(world, id);
            return None;
        }
        EntityKind::Mine => arm_mine(world, other),
        EntityKind::Cannon => cannons::fire(world, other),
        EntityKind::Queen => queen::wound(world),
        // Friendly fire passes cost the shot but harms nothing.
        EntityKind::Player
        | EntityKind::Worker
        | EntityKind::ArmedWorker
        | EntityKind::Bomber => {}
    }
    world.despawn(id);
    None
}

pub(crate) fn sweep_enemy(world: &mut World) {
    for id in world.registries.enemy_bullets.clone() {
        let Some(entity) = world.entity(id) else {
            continue;
        };
        let EntityState::EnemyBullet {
            dir,
            speed,
            collided,
        } = entity.state
        else {
            continue;
        };
        if collided {
            continue;
        }
        let mut pos = entity.pos;
        for _ in 0..speed {
            match step_enemy(world, id, pos, dir) {
                Some(next) => pos = next,
                None => break,
            }
        }
    }
}

fn step_enemy(world: &mut World, id: EntityId, pos: Cell, dir: Direction) -> Option<Cell> {
    let target = pos.step(dir);
    if world.field.out_of_bounds(target) {
        world.despawn(id);
        return None;
    }
    let Some((other, kind)) = world.kind_at(target) else {
        let _ = world.move_entity(id, target);
        return Some(target);
    };
    match kind {
        EntityKind::Player => world.end(Outcome::Defeat),
        EntityKind::Wall => damage_wall(world, other, 1),
        EntityKind::Bullet | EntityKind::EnemyBullet => {
            mark_collided(world, other);
            mark_collided(world, id);
            return None;
        }
        EntityKind::Mine => arm_mine(world, other),
        EntityKind::Cannon | EntityKind::Worker | EntityKind::ArmedWorker | EntityKind::Bomber => {
            world.despawn(other)
        }
        // No friendly fire among the horde; the bullet still burns up.
        EntityKind::Zombie | EntityKind::Walker | EntityKind::Queen => {}
    }
    world.despawn(id);
    None
}
