use anyhow::Result;

use crate::model::entity::EntityState;
use crate::model::events::GameEvent;
use crate::model::world::systems::{
    bombers, bullets, cannons, mines, queen, spawning, walkers, workers, zombies,
};
use crate::model::world::World;

impl World {
    /// Run one simulation tick and hand back the events it produced.
    ///
    /// The pass order is load-bearing. Projectiles sweep first so a shot
    /// fired last tick resolves before its target moves, prune passes
    /// bracket each movement sweep so flagged carcasses never act, and the
    /// mine detonation pass runs dead last so a fuse lit anywhere in this
    /// tick burns for a full frame before the blast.
    pub fn advance(&mut self) -> Result<Vec<GameEvent>> {
        if self.outcome.is_some() {
            return Ok(self.drain_events());
        }

        // Both bullet lists are pruned around each sweep: either sweep can
        // flag bullets of the other kind in a head-on pass.
        bullets::prune_friendly(self);
        bullets::prune_enemy(self);
        bullets::sweep_friendly(self);
        bullets::prune_friendly(self);
        bullets::prune_enemy(self);
        bullets::sweep_enemy(self);
        bullets::prune_friendly(self);
        bullets::prune_enemy(self);

        zombies::sweep_moves(self);
        zombies::sweep_shots(self);

        walkers::prune_exploded(self);
        walkers::sweep(self);
        walkers::prune_exploded(self);

        mines::sweep_triggers(self);

        let worker_columns = workers::worker_columns(self);
        workers::sweep_production(self);
        workers::sweep_armed(self);

        cannons::sweep(self, &worker_columns);

        bombers::prune_exploded(self);
        bombers::sweep(self);
        bombers::prune_exploded(self);

        queen::step(self);

        self.prune_rubble();

        mines::sweep_detonations(self);

        spawning::periodic(self);
        if self.config.modes.hardcore {
            spawning::hardcore_hordes(self);
        }

        if self.config.modes.endless {
            self.heal_queen();
        }

        self.tick += 1;
        debug_assert_eq!(self.check_consistency(), Ok(()));
        Ok(self.drain_events())
    }

    /// Walls ground down to zero strength linger as rubble for the rest of
    /// the tick, then come off the board here.
    fn prune_rubble(&mut self) {
        let rubble: Vec<_> = self
            .registries
            .walls
            .iter()
            .copied()
            .filter(|&id| {
                matches!(
                    self.entity(id).map(|e| &e.state),
                    Some(EntityState::Wall { strength: 0 })
                )
            })
            .collect();
        for id in rubble {
            self.despawn(id);
        }
    }

    /// Endless mode: the queen shakes off every wound before it can stick,
    /// so the run only ends in defeat.
    fn heal_queen(&mut self) {
        let full = self.config.queen.life;
        if let Some(EntityState::Queen { life }) = self.entity_mut(self.queen).map(|e| &mut e.state)
        {
            if *life < full {
                *life = full;
            }
        }
    }
}
