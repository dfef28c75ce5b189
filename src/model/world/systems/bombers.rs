use crate::model::arena::EntityId;
use crate::model::entity::{EntityKind, EntityState};
use crate::model::geometry::Direction;
use crate::model::world::systems::{arm_mine, explosions, mark_collided, queen};
use crate::model::world::World;

pub(crate) fn prune_exploded(world: &mut World) {
    let spent: Vec<_> = world
        .registries
        .bombers
        .iter()
        .copied()
        .filter(|&id| {
            matches!(
                world.entity(id).map(|e| &e.state),
                Some(EntityState::Bomber { exploded: true })
            )
        })
        .collect();
    for id in spent {
        world.despawn(id);
    }
}

/// Bombers trundle right every tick, no odds roll. First contact ends the
/// trip: most things set off the payload, a few merely absorb the bomber.
pub(crate) fn sweep(world: &mut World) {
    for id in world.registries.bombers.clone() {
        let Some(entity) = world.entity(id) else {
            continue;
        };
        if matches!(entity.state, EntityState::Bomber { exploded: true }) {
            continue;
        }
        step(world, id);
    }
}

fn step(world: &mut World, id: EntityId) {
    let Some(entity) = world.entity(id) else {
        return;
    };
    let pos = entity.pos;
    let target = pos.step(Direction::Right);

    if world.field.out_of_bounds(target) {
        // Detonate against the right border rather than roll off it.
        explosions::blast(world, pos, 2, EntityKind::Bomber);
        retire(world, id);
        return;
    }

    let Some((other, kind)) = world.kind_at(target) else {
        let _ = world.move_entity(id, target);
        return;
    };
    match kind {
        // Held in place; the payload keeps until the way is clear.
        EntityKind::Player | EntityKind::Bomber => return,
        EntityKind::Wall => {
            // The wall is flattened outright, then caught in the blast.
            if let Some(EntityState::Wall { strength }) =
                world.entity_mut(other).map(|e| &mut e.state)
            {
                *strength = 0;
            }
            explosions::blast(world, pos, 2, EntityKind::Bomber);
        }
        EntityKind::Zombie | EntityKind::Walker => {
            explosions::blast(world, pos, 2, EntityKind::Bomber);
        }
        EntityKind::Queen => queen::wound(world),
        EntityKind::Mine => arm_mine(world, other),
        EntityKind::Bullet | EntityKind::EnemyBullet => mark_collided(world, other),
        // Friendly units soak up the bomber without a detonation.
        EntityKind::Cannon | EntityKind::Worker | EntityKind::ArmedWorker => {}
    }
    retire(world, id);
}

fn retire(world: &mut World, id: EntityId) {
    if let Some(entity) = world.entity_mut(id) {
        entity.state = EntityState::Bomber { exploded: true };
    }
}
