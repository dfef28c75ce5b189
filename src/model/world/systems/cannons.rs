use crate::model::arena::EntityId;
use crate::model::entity::EntityState;
use crate::model::geometry::Direction;
use crate::model::world::World;
use rand::Rng;

/// Reprice every cannon from the worker chain directly behind it, then let
/// it roll for a shot. A lone cannon fires once per `cannon_fire_period`
/// ticks on average; each worker parked in the contiguous run of cells to
/// its left shaves `cannon_chain_gain` ticks off that period.
///
/// `columns` is the per-row worker census taken before the armed workers
/// moved, so a dodge does not change this tick's pricing.
pub(crate) fn sweep(world: &mut World, columns: &[Vec<i16>]) {
    let period = world.config.odds.cannon_fire_period;
    let gain = world.config.odds.cannon_chain_gain;

    for id in world.registries.cannons.clone() {
        let Some(entity) = world.entity(id) else {
            continue;
        };
        let pos = entity.pos;
        let row = &columns[pos.row as usize];

        let mut chain = 0u32;
        let mut col = pos.col - 1;
        while col >= 0 && row.contains(&col) {
            chain += 1;
            col -= 1;
        }

        let bonus = (f64::from(chain) * gain).min(period - 1.0);
        let odds = 1.0 / (period - bonus);
        if let Some(EntityState::Cannon { fire_odds }) = world.entity_mut(id).map(|e| &mut e.state)
        {
            *fire_odds = odds;
        }

        if world.rng.gen_bool(odds) {
            fire(world, id);
        }
    }
}

/// Fire one bullet rightward out of the cannon's muzzle. Costs one round;
/// a dry stock or a blocked muzzle wastes the trigger pull.
pub(crate) fn fire(world: &mut World, id: EntityId) {
    let Some(entity) = world.entity(id) else {
        return;
    };
    let muzzle = entity.pos.step(Direction::Right);
    if !world.field.is_free(muzzle) {
        return;
    }
    if world.ammo() < 1 {
        return;
    }
    world.add_ammo(-1);
    let _ = world.spawn(
        EntityState::Bullet {
            dir: Direction::Right,
            speed: 1,
            collided: false,
        },
        muzzle,
    );
}
