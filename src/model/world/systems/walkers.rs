use crate::model::arena::EntityId;
use crate::model::entity::{EntityKind, EntityState};
use crate::model::events::GameEvent;
use crate::model::geometry::Direction;
use crate::model::world::systems::{arm_mine, damage_wall, explosions};
use crate::model::world::{Outcome, World};
use rand::Rng;

/// Remove walkers that blew up during the sweep. Runs before and after the
/// movement pass, mirroring the bullet prune bracketing.
pub(crate) fn prune_exploded(world: &mut World) {
    let spent: Vec<_> = world
        .registries
        .walkers
        .iter()
        .copied()
        .filter(|&id| {
            matches!(
                world.entity(id).map(|e| &e.state),
                Some(EntityState::Walker { exploded: true })
            )
        })
        .collect();
    for id in spent {
        world.despawn(id);
    }
}

/// Walkers march left toward the player's border, occasionally drifting a
/// row down. Reaching the left border is a touchdown: the walker empties
/// the ammo stock and goes up in a blast.
pub(crate) fn sweep(world: &mut World) {
    let odds = world.config.odds.walker_move;
    for id in world.registries.walkers.clone() {
        let Some(entity) = world.entity(id) else {
            continue;
        };
        if matches!(entity.state, EntityState::Walker { exploded: true }) {
            continue;
        }
        if !world.rng.gen_bool(odds) {
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

    let drift = world.config.odds.walker_drift_one_in;
    let dir = if drift > 0 && world.rng.gen_range(0..drift) == 0 {
        Direction::Down
    } else {
        Direction::Left
    };

    let target = pos.step(dir);
    if world.field.out_of_bounds(target) {
        if pos.col == 0 {
            touchdown(world, id);
        } else if let Ok(to) = world.field.wrap_relocate(pos, dir) {
            // Bottom edge wraps to the top row. A blocked landing cell
            // swallows the step.
            if let Some(entity) = world.entity_mut(id) {
                entity.pos = to;
            }
        }
        return;
    }

    match world.kind_at(target) {
        None => {
            let _ = world.move_entity(id, target);
        }
        Some((other, kind)) => match kind {
            EntityKind::Player => world.end(Outcome::Defeat),
            EntityKind::Wall => damage_wall(world, other, 1),
            EntityKind::Mine => arm_mine(world, other),
            EntityKind::Bullet => {
                world.despawn(other);
                world.despawn(id);
            }
            EntityKind::Cannon | EntityKind::Worker | EntityKind::ArmedWorker => {
                world.despawn(other)
            }
            EntityKind::Zombie
            | EntityKind::Walker
            | EntityKind::EnemyBullet
            | EntityKind::Bomber
            | EntityKind::Queen => {}
        },
    }
}

fn touchdown(world: &mut World, id: EntityId) {
    let Some(entity) = world.entity(id) else {
        return;
    };
    let pos = entity.pos;
    tracing::debug!(row = pos.row, "walker touchdown");
    world.set_ammo(0);
    world.push_event(GameEvent::Touchdown);
    explosions::blast(world, pos, 1, EntityKind::Walker);
    if let Some(entity) = world.entity_mut(id) {
        entity.state = EntityState::Walker { exploded: true };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::GameConfig;
    use crate::model::geometry::Cell;

    fn deterministic_world() -> World {
        let mut config = GameConfig::default();
        config.seed = Some(5);
        config.odds.walker_move = 1.0;
        config.odds.walker_drift_one_in = 0;
        World::bare(config)
    }

    fn walker() -> EntityState {
        EntityState::Walker { exploded: false }
    }

    #[test]
    fn test_walker_marches_left() {
        let mut world = deterministic_world();
        let id = world.spawn(walker(), Cell::new(2, 40)).unwrap();
        sweep(&mut world);
        assert_eq!(world.entity(id).unwrap().pos, Cell::new(2, 39));
    }

    #[test]
    fn test_touchdown_drains_ammo_and_blasts() {
        let mut world = deterministic_world();
        world.set_ammo(25);
        let worker = world.spawn(EntityState::Worker, Cell::new(2, 1)).unwrap();
        let id = world.spawn(walker(), Cell::new(2, 0)).unwrap();

        sweep(&mut world);
        prune_exploded(&mut world);

        assert_eq!(world.ammo(), 0);
        assert!(world.entity(worker).is_none());
        assert!(world.entity(id).is_none());
        assert!(world
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::Touchdown)));
    }

    #[test]
    fn test_walker_wraps_off_bottom_edge() {
        let mut world = deterministic_world();
        world.config.odds.walker_drift_one_in = 1;
        let id = world.spawn(walker(), Cell::new(19, 40)).unwrap();
        sweep(&mut world);
        assert_eq!(world.entity(id).unwrap().pos, Cell::new(0, 40));
        assert!(world.check_consistency().is_ok());
    }

    #[test]
    fn test_walker_tramples_worker() {
        let mut world = deterministic_world();
        let worker = world.spawn(EntityState::Worker, Cell::new(2, 4)).unwrap();
        let id = world.spawn(walker(), Cell::new(2, 5)).unwrap();
        sweep(&mut world);
        assert!(world.entity(worker).is_none());
        // The walker holds position after the kill.
        assert_eq!(world.entity(id).unwrap().pos, Cell::new(2, 5));
    }
}
