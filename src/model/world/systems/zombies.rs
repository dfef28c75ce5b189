use crate::model::arena::EntityId;
use crate::model::entity::EntityState;
use crate::model::geometry::Direction;
use crate::model::world::World;
use rand::Rng;

/// Each zombie rolls its move odds independently. The zombies are the
/// queen's garrison, not hunters: on the player's row one falls back
/// toward her side of the partition, anywhere else it wanders one row on
/// a coin flip. They threaten the player with bullets, never by contact.
pub(crate) fn sweep_moves(world: &mut World) {
    let odds = world.config.odds.zombie_move;
    for id in world.registries.zombies.clone() {
        if world.entity(id).is_none() {
            continue;
        }
        if !world.rng.gen_bool(odds) {
            continue;
        }
        step(world, id);
    }
}

fn step(world: &mut World, id: EntityId) {
    let Some(pos) = world.entity(id).map(|e| e.pos) else {
        return;
    };

    let dir = if pos.row == world.player_pos().row {
        if pos.col < world.config.field.partition_col {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if world.rng.gen_bool(0.5) {
        Direction::Down
    } else {
        Direction::Up
    };

    // Blocked cells just hold the zombie in place.
    let target = pos.step(dir);
    if world.field.is_free(target) {
        let _ = world.move_entity(id, target);
    }
}

/// Zombies occasionally snipe a bullet toward the player's side.
pub(crate) fn sweep_shots(world: &mut World) {
    let odds = world.config.odds.zombie_shoot;
    for id in world.registries.zombies.clone() {
        let Some(pos) = world.entity(id).map(|e| e.pos) else {
            continue;
        };
        if !world.rng.gen_bool(odds) {
            continue;
        }
        let muzzle = pos.step(Direction::Left);
        if !world.field.is_free(muzzle) {
            continue;
        }
        let _ = world.spawn(
            EntityState::EnemyBullet {
                dir: Direction::Left,
                speed: 1,
                collided: false,
            },
            muzzle,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::GameConfig;
    use crate::model::entity::EntityKind;
    use crate::model::geometry::Cell;

    fn deterministic_world() -> World {
        let mut config = GameConfig::default();
        config.seed = Some(11);
        config.odds.zombie_move = 1.0;
        config.odds.zombie_shoot = 1.0;
        World::bare(config)
    }

    #[test]
    fn test_zombie_on_player_row_falls_back_left() {
        let mut world = deterministic_world();
        let row = world.player_pos().row;
        let id = world.spawn(EntityState::Zombie, Cell::new(row, 40)).unwrap();
        sweep_moves(&mut world);
        assert_eq!(world.entity(id).unwrap().pos, Cell::new(row, 39));
    }

    #[test]
    fn test_zombie_past_the_partition_retreats_right() {
        let mut world = deterministic_world();
        let player_pos = world.player_pos();
        let id = world
            .spawn(
                EntityState::Zombie,
                Cell::new(player_pos.row, player_pos.col + 1),
            )
            .unwrap();
        sweep_moves(&mut world);
        // Contact never ends the run; the zombie withdraws instead.
        assert_eq!(world.outcome, None);
        assert_eq!(
            world.entity(id).unwrap().pos,
            Cell::new(player_pos.row, player_pos.col + 2)
        );
    }

    #[test]
    fn test_zombie_off_row_moves_vertically() {
        let mut world = deterministic_world();
        let id = world.spawn(EntityState::Zombie, Cell::new(3, 40)).unwrap();
        sweep_moves(&mut world);
        let pos = world.entity(id).unwrap().pos;
        assert_eq!(pos.col, 40);
        assert!(pos.row == 2 || pos.row == 4);
    }

    #[test]
    fn test_zombie_blocked_by_wall_holds_and_leaves_it_unharmed() {
        let mut world = deterministic_world();
        let row = world.player_pos().row;
        let wall = world
            .spawn(EntityState::Wall { strength: 2 }, Cell::new(row, 39))
            .unwrap();
        let id = world.spawn(EntityState::Zombie, Cell::new(row, 40)).unwrap();
        sweep_moves(&mut world);
        assert_eq!(world.entity(id).unwrap().pos, Cell::new(row, 40));
        assert_eq!(
            world.entity(wall).map(|e| e.state.clone()),
            Some(EntityState::Wall { strength: 2 })
        );
    }

    #[test]
    fn test_zombie_fires_leftward() {
        let mut world = deterministic_world();
        world
            .spawn(EntityState::Zombie, Cell::new(2, 40))
            .unwrap();
        sweep_shots(&mut world);
        assert_eq!(
            world.kind_at(Cell::new(2, 39)).map(|(_, k)| k),
            Some(EntityKind::EnemyBullet)
        );
    }
}
