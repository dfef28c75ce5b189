use crate::model::entity::EntityState;
use crate::model::events::GameEvent;
use crate::model::geometry::Cell;
use crate::model::world::World;
use rand::Rng;

/// Reinforcements trickle in from the right border on fixed schedules.
pub(crate) fn periodic(world: &mut World) {
    let walker_period = world.config.spawning.walker_period;
    let zombie_period = world.config.spawning.zombie_period;
    if walker_period > 0 && world.tick % walker_period == 0 {
        spawn_at_border(world, EntityState::Walker { exploded: false });
    }
    if zombie_period > 0 && world.tick % zombie_period == 0 {
        spawn_at_border(world, EntityState::Zombie);
    }
}

/// Hardcore mode: every `horde_period` ticks a horde pours in, one walker
/// and one zombie per head, growing by a head per `horde_growth_ticks` of
/// elapsed game.
pub(crate) fn hardcore_hordes(world: &mut World) {
    let period = world.config.spawning.horde_period;
    if period == 0 || world.tick == 0 || world.tick % period != 0 {
        return;
    }
    let growth = world.config.spawning.horde_growth_ticks.max(1);
    let count = 1 + (world.tick / growth) as u32;

    for _ in 0..count {
        spawn_at_border(world, EntityState::Walker { exploded: false });
        spawn_at_border(world, EntityState::Zombie);
    }
    tracing::debug!(tick = world.tick, count, "horde inbound");
    world.push_event(GameEvent::HordeInbound { count });
}

/// Drop a fresh enemy in the last column at a random row. The queen's row
/// is off limits, and a row whose border cell is already taken loses the
/// reinforcement.
fn spawn_at_border(world: &mut World, state: EntityState) {
    let rows = world.field.rows();
    let row = world.rng.gen_range(0..rows);
    let queen_row = world.entity(world.queen).map(|e| e.pos.row);
    if Some(row) == queen_row {
        return;
    }
    let cell = Cell::new(row, world.field.cols() - 1);
    if world.field.is_free(cell) {
        let _ = world.spawn(state, cell);
    }
}
