use crate::model::entity::EntityState;
use crate::model::geometry::Cell;
use crate::model::world::World;

impl World {
    /// The standard opening layout: a barrier wall down the partition
    /// column, a first wave of zombies and walkers on the queen's side and
    /// a starting crew of workers on the player's side.
    pub(crate) fn populate(&mut self) {
        let rows = self.config.field.rows;
        let barrier_col = self.config.field.partition_col;
        let barrier_strength = self.config.field.barrier_strength;

        for row in 0..rows {
            let _ = self.spawn(
                EntityState::Wall {
                    strength: barrier_strength,
                },
                Cell::new(row, barrier_col),
            );
            if row % 5 == 1 {
                let _ = self.spawn(EntityState::Zombie, Cell::new(row, 47));
            }
            if row % 5 == 3 {
                let _ = self.spawn(EntityState::Walker { exploded: false }, Cell::new(row, 45));
            }
            if row % 5 == 2 {
                let _ = self.spawn(EntityState::Worker, Cell::new(row, 1));
            }
        }

        tracing::info!(
            walls = self.registries.walls.len(),
            zombies = self.registries.zombies.len(),
            walkers = self.registries.walkers.len(),
            workers = self.registries.workers.len(),
            "board populated"
        );
    }
}
