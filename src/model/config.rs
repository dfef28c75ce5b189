use serde::{Deserialize, Serialize};
use std::fs;

use crate::model::entity::Weapon;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FieldConfig {
    pub rows: i16,
    pub cols: i16,
    /// The player may not cross into columns >= this; the initial barrier
    /// wall also stands here.
    pub partition_col: i16,
    pub barrier_strength: i16,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PlayerConfig {
    pub spawn_row: i16,
    pub spawn_col: i16,
    pub start_ammo: i32,
    /// Cells per tick for player-fired bullets.
    pub shot_speed: i16,
    pub wall_strength: i16,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct QueenConfig {
    pub spawn_row: i16,
    pub spawn_col: i16,
    pub life: i16,
    /// The queen wanders vertically inside [band_top, band_bottom].
    pub band_top: i16,
    pub band_bottom: i16,
    pub wall_min_len: i16,
    pub wall_max_len: i16,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OddsConfig {
    pub zombie_move: f64,
    pub zombie_shoot: f64,
    pub walker_move: f64,
    /// Walkers drift one row down with odds 1-in-N instead of stepping
    /// left; 0 disables the drift entirely.
    pub walker_drift_one_in: u32,
    /// Queen takes a vertical step with odds 1-in-N, rolled independently
    /// for up and for down; 0 pins her in place.
    pub queen_shift_one_in: u32,
    /// A lone cannon fires once every N ticks on average.
    pub cannon_fire_period: f64,
    /// Each consecutive worker behind a cannon shaves this many ticks off
    /// its period, capped so the period never drops below one tick.
    pub cannon_chain_gain: f64,
    pub worker_production_period: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CostsConfig {
    pub bullet: i32,
    pub mine: i32,
    pub cannon: i32,
    pub bomber: i32,
    pub worker: i32,
    pub armed_worker: i32,
    pub wall: i32,
}

impl CostsConfig {
    pub fn of(&self, weapon: Weapon) -> i32 {
        match weapon {
            Weapon::Bullet => self.bullet,
            Weapon::Mine => self.mine,
            Weapon::Cannon => self.cannon,
            Weapon::Bomber => self.bomber,
            Weapon::Worker => self.worker,
            Weapon::ArmedWorker => self.armed_worker,
            Weapon::Wall => self.wall,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SpawnConfig {
    pub walker_period: u64,
    pub zombie_period: u64,
    /// Hardcore mode: horde every N ticks.
    pub horde_period: u64,
    /// Hardcore mode: horde grows by one per this many elapsed ticks.
    pub horde_growth_ticks: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ModesConfig {
    pub unofficial: bool,
    pub endless: bool,
    pub hardcore: bool,
    pub music: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GameConfig {
    pub field: FieldConfig,
    pub player: PlayerConfig,
    pub queen: QueenConfig,
    pub odds: OddsConfig,
    pub costs: CostsConfig,
    pub spawning: SpawnConfig,
    pub modes: ModesConfig,
    /// Fixed RNG seed for reproducible runs; entropy-seeded when absent.
    pub seed: Option<u64>,
    pub tick_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig {
                rows: 20,
                cols: 50,
                partition_col: 30,
                barrier_strength: 3,
            },
            player: PlayerConfig {
                spawn_row: 10,
                spawn_col: 18,
                start_ammo: 10,
                shot_speed: 1,
                wall_strength: 2,
            },
            queen: QueenConfig {
                spawn_row: 10,
                spawn_col: 49,
                life: 9,
                band_top: 6,
                band_bottom: 14,
                wall_min_len: 3,
                wall_max_len: 5,
            },
            odds: OddsConfig {
                zombie_move: 0.2,
                zombie_shoot: 0.01,
                walker_move: 0.1,
                walker_drift_one_in: 30,
                queen_shift_one_in: 10,
                cannon_fire_period: 40.0,
                cannon_chain_gain: 1.4,
                worker_production_period: 150.0,
            },
            costs: CostsConfig {
                bullet: 1,
                mine: 3,
                cannon: 5,
                bomber: 7,
                worker: 5,
                armed_worker: 6,
                wall: 1,
            },
            spawning: SpawnConfig {
                walker_period: 100,
                zombie_period: 200,
                horde_period: 300,
                horde_growth_ticks: 1000,
            },
            modes: ModesConfig {
                unofficial: false,
                endless: false,
                hardcore: false,
                music: true,
            },
            seed: None,
            tick_ms: 100,
        }
    }
}

impl GameConfig {
    pub fn load(path: &str) -> Self {
        if let Ok(content) = fs::read_to_string(path) {
            match toml::from_str(&content) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("ignoring malformed config {path}: {e}"),
            }
        }
        let default = Self::default();
        // Create a default config file if missing so players can tweak it.
        if let Ok(rendered) = toml::to_string(&default) {
            let _ = fs::write(path, rendered);
        }
        default
    }
}
