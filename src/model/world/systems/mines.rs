use crate::model::entity::{EntityKind, EntityState};
use crate::model::geometry::{Cell, Delta};
use crate::model::world::systems::{arm_mine, explosions};
use crate::model::world::World;

/// Arm every idle mine with a hostile in its eight neighbor cells.
pub(crate) fn sweep_triggers(world: &mut World) {
    for id in world.registries.mines.clone() {
        let Some(entity) = world.entity(id) else {
            continue;
        };
        let EntityState::Mine { armed_at: None } = entity.state else {
            continue;
        };
        if hostile_adjacent(world, entity.pos) {
            arm_mine(world, id);
        }
    }
}

fn hostile_adjacent(world: &World, pos: Cell) -> bool {
    for dr in -1..=1i16 {
        for dc in -1..=1i16 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let neighbor = pos + Delta { row: dr, col: dc };
            if let Some((_, kind)) = world.kind_at(neighbor) {
                if matches!(kind, EntityKind::Zombie | EntityKind::Walker) {
                    return true;
                }
            }
        }
    }
    false
}

/// Explode mines whose fuse was lit on an earlier tick. Arming and
/// detonation never share a tick, so the armed glyph is visible for at
/// least one frame and chains spread one tick per hop.
pub(crate) fn sweep_detonations(world: &mut World) {
    let now = world.tick;
    for id in world.registries.mines.clone() {
        let Some(entity) = world.entity(id) else {
            continue;
        };
        let EntityState::Mine {
            armed_at: Some(at), ..
        } = entity.state
        else {
            continue;
        };
        if at >= now {
            continue;
        }
        let pos = entity.pos;
        world.despawn(id);
        explosions::blast(world, pos, 2, EntityKind::Mine);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::GameConfig;

    fn seeded_world() -> World {
        let mut config = GameConfig::default();
        config.seed = Some(13);
        World::bare(config)
    }

    fn idle_mine() -> EntityState {
        EntityState::Mine { armed_at: None }
    }

    #[test]
    fn test_diagonal_neighbor_arms_mine() {
        let mut world = seeded_world();
        let mine = world.spawn(idle_mine(), Cell::new(5, 5)).unwrap();
        world.spawn(EntityState::Zombie, Cell::new(4, 4)).unwrap();

        sweep_triggers(&mut world);

        match world.entity(mine).map(|e| &e.state) {
            Some(EntityState::Mine { armed_at }) => assert_eq!(*armed_at, Some(0)),
            other => panic!("expected mine, got {other:?}"),
        }
    }

    #[test]
    fn test_armed_mine_explodes_on_a_later_tick() {
        let mut world = seeded_world();
        let mine = world.spawn(idle_mine(), Cell::new(5, 5)).unwrap();
        let zombie = world.spawn(EntityState::Zombie, Cell::new(5, 6)).unwrap();

        sweep_triggers(&mut world);
        // Same tick: fuse is lit but nothing blows.
        sweep_detonations(&mut world);
        assert!(world.entity(mine).is_some());
        assert!(world.entity(zombie).is_some());

        world.tick += 1;
        sweep_detonations(&mut world);
        assert!(world.entity(mine).is_none());
        assert!(world.entity(zombie).is_none());
    }

    #[test]
    fn test_chain_spreads_one_tick_per_hop() {
        let mut world = seeded_world();
        let near = world.spawn(idle_mine(), Cell::new(5, 5)).unwrap();
        let far = world.spawn(idle_mine(), Cell::new(5, 7)).unwrap();
        world.spawn(EntityState::Zombie, Cell::new(5, 4)).unwrap();

        sweep_triggers(&mut world);
        world.tick += 1;
        sweep_detonations(&mut world);
        // The first blast arms the second mine instead of detonating it.
        assert!(world.entity(near).is_none());
        match world.entity(far).map(|e| &e.state) {
            Some(EntityState::Mine { armed_at }) => assert_eq!(*armed_at, Some(1)),
            other => panic!("expected mine, got {other:?}"),
        }

        world.tick += 1;
        sweep_detonations(&mut world);
        assert!(world.entity(far).is_none());
    }

    #[test]
    fn test_workers_do_not_trigger_mines() {
        let mut world = seeded_world();
        let mine = world.spawn(idle_mine(), Cell::new(5, 5)).unwrap();
        world.spawn(EntityState::Worker, Cell::new(5, 4)).unwrap();

        sweep_triggers(&mut world);

        assert_eq!(
            world.entity(mine).map(|e| e.state.clone()),
            Some(EntityState::Mine { armed_at: None })
        );
    }
}
