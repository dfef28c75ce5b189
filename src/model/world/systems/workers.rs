use crate::model::arena::EntityId;
use crate::model::entity::{EntityKind, EntityState};
use crate::model::geometry::{Cell, Direction};
use crate::model::world::World;
use rand::Rng;

/// Columns occupied by workers, indexed by row. Cannons read this to price
/// their supply-chain bonus.
pub(crate) fn worker_columns(world: &World) -> Vec<Vec<i16>> {
    let mut columns = vec![Vec::new(); world.field.rows() as usize];
    for &id in &world.registries.workers {
        if let Some(entity) = world.entity(id) {
            columns[entity.pos.row as usize].push(entity.pos.col);
        }
    }
    for &id in &world.registries.armed_workers {
        if let Some(entity) = world.entity(id) {
            columns[entity.pos.row as usize].push(entity.pos.col);
        }
    }
    columns
}

/// Every worker has an independent shot at producing one round of ammo.
pub(crate) fn sweep_production(world: &mut World) {
    let odds = 1.0 / world.config.odds.worker_production_period;
    for id in world.registries.workers.clone() {
        if world.entity(id).is_none() {
            continue;
        }
        if world.rng.gen_bool(odds) {
            world.add_ammo(1);
        }
    }
}

/// Armed workers produce like plain workers but also watch their row: an
/// incoming enemy bullet three cells out makes them throw up a flimsy wall,
/// duck a row and snap off a free return shot. Off-duty they drift back to
/// their home row one step per tick.
pub(crate) fn sweep_armed(world: &mut World) {
    let odds = 1.0 / world.config.odds.worker_production_period;
    for id in world.registries.armed_workers.clone() {
        if world.entity(id).is_none() {
            continue;
        }
        if world.rng.gen_bool(odds) {
            world.add_ammo(1);
        }
        react(world, id);
    }
}

fn react(world: &mut World, id: EntityId) {
    let Some(entity) = world.entity(id) else {
        return;
    };
    let EntityState::ArmedWorker { home_row } = entity.state else {
        return;
    };
    let pos = entity.pos;

    let lookout = Cell::new(pos.row, pos.col + 3);
    let incoming = matches!(
        world.kind_at(lookout),
        Some((_, EntityKind::EnemyBullet))
    );

    if incoming {
        dodge(world, id, pos);
    } else if pos.row != home_row {
        let dir = if pos.row > home_row {
            Direction::Up
        } else {
            Direction::Down
        };
        let target = pos.step(dir);
        if world.field.is_free(target) {
            let _ = world.move_entity(id, target);
        }
    }
}

fn dodge(world: &mut World, id: EntityId, pos: Cell) {
    // Cover first, then duck whichever neighboring row is open.
    let cover = pos.step(Direction::Right);
    if world.field.is_free(cover) {
        let _ = world.spawn(EntityState::Wall { strength: 1 }, cover);
    }

    let up = pos.step(Direction::Up);
    let down = pos.step(Direction::Down);
    let refuge = if world.field.is_free(up) {
        Some(up)
    } else if world.field.is_free(down) {
        Some(down)
    } else {
        None
    };
    let Some(refuge) = refuge else {
        return;
    };
    if world.move_entity(id, refuge).is_err() {
        return;
    }

    // The reflex shot comes out of the new row and costs no ammo.
    let muzzle = refuge.step(Direction::Right);
    if world.field.is_free(muzzle) {
        let _ = world.spawn(
            EntityState::Bullet {
                dir: Direction::Right,
                speed: 1,
                collided: false,
            },
            muzzle,
        );
    }
}
