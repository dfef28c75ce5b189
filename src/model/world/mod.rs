pub mod init;
pub mod systems;
pub mod update;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::model::arena::{Arena, EntityId};
use crate::model::config::GameConfig;
use crate::model::entity::{Entity, EntityKind, EntityState, Weapon};
use crate::model::error::FieldError;
use crate::model::events::GameEvent;
use crate::model::field::Field;
use crate::model::geometry::{Cell, Direction};

/// Terminal state of a run. Victory when the queen's life is exhausted,
/// defeat when anything hostile reaches the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Victory,
    Defeat,
}

/// Per-kind live-instance collections, in spawn order. Spawn order is the
/// processing order within a tick, which the interaction rules depend on.
#[derive(Debug, Default)]
pub struct Registries {
    pub bullets: Vec<EntityId>,
    pub enemy_bullets: Vec<EntityId>,
    pub zombies: Vec<EntityId>,
    pub walkers: Vec<EntityId>,
    pub walls: Vec<EntityId>,
    pub mines: Vec<EntityId>,
    pub cannons: Vec<EntityId>,
    pub workers: Vec<EntityId>,
    pub armed_workers: Vec<EntityId>,
    pub bombers: Vec<EntityId>,
}

impl Registries {
    /// The registry owning this kind; the player and queen are singletons
    /// held directly by the world.
    fn of_kind_mut(&mut self, kind: EntityKind) -> Option<&mut Vec<EntityId>> {
        match kind {
            EntityKind::Bullet => Some(&mut self.bullets),
            EntityKind::EnemyBullet => Some(&mut self.enemy_bullets),
            EntityKind::Zombie => Some(&mut self.zombies),
            EntityKind::Walker => Some(&mut self.walkers),
            EntityKind::Wall => Some(&mut self.walls),
            EntityKind::Mine => Some(&mut self.mines),
            EntityKind::Cannon => Some(&mut self.cannons),
            EntityKind::Worker => Some(&mut self.workers),
            EntityKind::ArmedWorker => Some(&mut self.armed_workers),
            EntityKind::Bomber => Some(&mut self.bombers),
            EntityKind::Player | EntityKind::Queen => None,
        }
    }

    fn of_kind(&self, kind: EntityKind) -> Option<&Vec<EntityId>> {
        match kind {
            EntityKind::Bullet => Some(&self.bullets),
            EntityKind::EnemyBullet => Some(&self.enemy_bullets),
            EntityKind::Zombie => Some(&self.zombies),
            EntityKind::Walker => Some(&self.walkers),
            EntityKind::Wall => Some(&self.walls),
            EntityKind::Mine => Some(&self.mines),
            EntityKind::Cannon => Some(&self.cannons),
            EntityKind::Worker => Some(&self.workers),
            EntityKind::ArmedWorker => Some(&self.armed_workers),
            EntityKind::Bomber => Some(&self.bombers),
            EntityKind::Player | EntityKind::Queen => None,
        }
    }

    pub fn total(&self) -> usize {
        self.bullets.len()
            + self.enemy_bullets.len()
            + self.zombies.len()
            + self.walkers.len()
            + self.walls.len()
            + self.mines.len()
            + self.cannons.len()
            + self.workers.len()
            + self.armed_workers.len()
            + self.bombers.len()
    }
}

/// The whole simulation context: arena, occupancy grid, registries, RNG and
/// the two singletons. Everything `advance` touches lives here, so a tick
/// is testable without any process-wide state.
pub struct World {
    pub config: GameConfig,
    pub arena: Arena,
    pub field: Field,
    pub registries: Registries,
    pub player: EntityId,
    pub queen: EntityId,
    pub(crate) rng: ChaCha8Rng,
    pub tick: u64,
    pub outcome: Option<Outcome>,
    pending_events: Vec<GameEvent>,
}

impl World {
    /// A board holding only the two singletons. Tests build scenarios on
    /// top of this; `new` adds the standard opening layout.
    pub fn bare(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let mut arena = Arena::new();
        let mut field = Field::new(config.field.rows, config.field.cols);

        let player_pos = Cell::new(config.player.spawn_row, config.player.spawn_col);
        let player = arena.insert(Entity::new(
            player_pos,
            EntityState::Player {
                weapon: Weapon::Bullet,
                ammo: config.player.start_ammo,
            },
        ));
        // The bare board is empty; these two placements cannot collide.
        let _ = field.place(player, player_pos);

        let queen_pos = Cell::new(config.queen.spawn_row, config.queen.spawn_col);
        let queen = arena.insert(Entity::new(
            queen_pos,
            EntityState::Queen {
                life: config.queen.life,
            },
        ));
        let _ = field.place(queen, queen_pos);

        Self {
            config,
            arena,
            field,
            registries: Registries::default(),
            player,
            queen,
            rng,
            tick: 0,
            outcome: None,
            pending_events: Vec::new(),
        }
    }

    pub fn new(config: GameConfig) -> Self {
        let mut world = Self::bare(config);
        world.populate();
        world
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.arena.get(id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.arena.get_mut(id)
    }

    pub fn kind_at(&self, cell: Cell) -> Option<(EntityId, EntityKind)> {
        let id = self.field.occupant(cell)?;
        let entity = self.arena.get(id)?;
        Some((id, entity.kind()))
    }

    /// Registers a new entity in the arena, the field and its registry in
    /// one step; the three can never disagree.
    pub fn spawn(&mut self, state: EntityState, pos: Cell) -> Result<EntityId, FieldError> {
        let entity = Entity::new(pos, state);
        let kind = entity.kind();
        let id = self.arena.insert(entity);
        if let Err(e) = self.field.place(id, pos) {
            self.arena.remove(id);
            return Err(e);
        }
        if let Some(registry) = self.registries.of_kind_mut(kind) {
            registry.push(id);
        }
        Ok(id)
    }

    /// Deregisters from field, registry and arena together. Safe to call
    /// with a stale handle; it just does nothing.
    pub fn despawn(&mut self, id: EntityId) {
        let Some(entity) = self.arena.remove(id) else {
            return;
        };
        if self.field.occupant(entity.pos) == Some(id) {
            self.field.clear(entity.pos);
        }
        if let Some(registry) = self.registries.of_kind_mut(entity.kind()) {
            registry.retain(|&other| other != id);
        }
    }

    pub(crate) fn move_entity(&mut self, id: EntityId, to: Cell) -> Result<(), FieldError> {
        let from = match self.arena.get(id) {
            Some(entity) => entity.pos,
            None => return Ok(()),
        };
        self.field.relocate(from, to)?;
        if let Some(entity) = self.arena.get_mut(id) {
            entity.pos = to;
        }
        Ok(())
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub(crate) fn end(&mut self, outcome: Outcome) {
        if self.outcome.is_some() {
            return;
        }
        self.outcome = Some(outcome);
        match outcome {
            Outcome::Victory => {
                tracing::info!(tick = self.tick, "queen slain, game won");
                self.push_event(GameEvent::Victory);
            }
            Outcome::Defeat => {
                tracing::info!(tick = self.tick, "player overrun, game lost");
                self.push_event(GameEvent::Defeat);
            }
        }
    }

    // --- player state accessors -----------------------------------------

    pub fn ammo(&self) -> i32 {
        match self.arena.get(self.player).map(|e| &e.state) {
            Some(EntityState::Player { ammo, .. }) => *ammo,
            _ => 0,
        }
    }

    pub fn set_ammo(&mut self, value: i32) {
        if let Some(EntityState::Player { ammo, .. }) =
            self.arena.get_mut(self.player).map(|e| &mut e.state)
        {
            *ammo = value.max(0);
        }
    }

    pub(crate) fn add_ammo(&mut self, delta: i32) {
        let current = self.ammo();
        self.set_ammo(current + delta);
    }

    pub fn weapon(&self) -> Weapon {
        match self.arena.get(self.player).map(|e| &e.state) {
            Some(EntityState::Player { weapon, .. }) => *weapon,
            _ => Weapon::Bullet,
        }
    }

    pub fn select_weapon(&mut self, selected: Weapon) {
        if let Some(EntityState::Player { weapon, .. }) =
            self.arena.get_mut(self.player).map(|e| &mut e.state)
        {
            *weapon = selected;
        }
    }

    pub fn player_pos(&self) -> Cell {
        self.arena
            .get(self.player)
            .map(|e| e.pos)
            .unwrap_or(Cell::new(0, 0))
    }

    pub fn queen_life(&self) -> i16 {
        match self.arena.get(self.queen).map(|e| &e.state) {
            Some(EntityState::Queen { life }) => *life,
            _ => 0,
        }
    }

    // --- player actions (invoked from the input path) -------------------

    /// Move one cell; silently refused when blocked, out of bounds or past
    /// the partition column.
    pub fn move_player(&mut self, dir: Direction) {
        if self.outcome.is_some() {
            return;
        }
        let target = self.player_pos().step(dir);
        if !self.field.is_free(target) || target.col >= self.config.field.partition_col {
            return;
        }
        let _ = self.move_entity(self.player, target);
    }

    /// Deploy the selected weapon in the adjacent cell. A blocked cell is
    /// silently refused; missing ammunition raises the alert cue.
    pub fn fire(&mut self, dir: Direction) {
        if self.outcome.is_some() {
            return;
        }
        let spawn_cell = self.player_pos().step(dir);
        if !self.field.is_free(spawn_cell) {
            return;
        }
        let weapon = self.weapon();
        let cost = self.config.costs.of(weapon);
        if self.ammo() < cost {
            self.push_event(GameEvent::Alert);
            return;
        }
        let state = match weapon {
            Weapon::Bullet => EntityState::Bullet {
                dir,
                speed: self.config.player.shot_speed,
                collided: false,
            },
            Weapon::Mine => EntityState::Mine { armed_at: None },
            Weapon::Cannon => EntityState::Cannon {
                fire_odds: 1.0 / self.config.odds.cannon_fire_period,
            },
            Weapon::Bomber => EntityState::Bomber { exploded: false },
            Weapon::Worker => EntityState::Worker,
            Weapon::ArmedWorker => EntityState::ArmedWorker {
                home_row: spawn_cell.row,
            },
            Weapon::Wall => EntityState::Wall {
                strength: self.config.player.wall_strength,
            },
        };
        if self.spawn(state, spawn_cell).is_ok() {
            self.add_ammo(-cost);
        }
    }

    // --- invariants -----------------------------------------------------

    /// Field, arena and registries must describe the same population. This
    /// holds by construction (spawn/despawn are the only mutation paths);
    /// the check exists for debug builds and the test suite.
    pub fn check_consistency(&self) -> Result<(), String> {
        for row in 0..self.field.rows() {
            for col in 0..self.field.cols() {
                let cell = Cell::new(row, col);
                if let Some(id) = self.field.occupant(cell) {
                    match self.arena.get(id) {
                        None => return Err(format!("dead handle on cell ({row},{col})")),
                        Some(entity) if entity.pos != cell => {
                            return Err(format!(
                                "entity at ({},{}) mirrored on cell ({row},{col})",
                                entity.pos.row, entity.pos.col
                            ));
                        }
                        Some(_) => {}
                    }
                }
            }
        }
        for (id, entity) in self.arena.iter() {
            if self.field.occupant(entity.pos) != Some(id) {
                return Err(format!(
                    "entity {:?} not mirrored at its cell ({},{})",
                    entity.kind(),
                    entity.pos.row,
                    entity.pos.col
                ));
            }
            let kind = entity.kind();
            match kind {
                EntityKind::Player | EntityKind::Queen => {}
                _ => {
                    let registered = self
                        .registries
                        .of_kind(kind)
                        .is_some_and(|registry| registry.iter().filter(|&&r| r == id).count() == 1);
                    if !registered {
                        return Err(format!("{kind:?} not registered exactly once"));
                    }
                }
            }
        }
        if self.registries.total() + 2 != self.arena.len() {
            return Err(format!(
                "registry total {} + 2 != arena population {}",
                self.registries.total(),
                self.arena.len()
            ));
        }
        Ok(())
    }
}
