use anyhow::Result;
use ratatui::style::Color;
use std::collections::VecDeque;

use crate::app::audio::AudioCues;
use crate::model::config::GameConfig;
use crate::model::world::World;

pub struct App {
    pub running: bool,
    pub paused: bool,
    /// Display frame counter. Official runs freeze it while paused so the
    /// number on screen is an honest measure of play time; unofficial runs
    /// let it keep counting.
    pub frames: u64,
    pub world: World,
    pub config_path: String,
    pub show_help: bool,
    pub event_log: VecDeque<(String, Color)>,
    pub audio: AudioCues,
}

impl App {
    pub fn new(config: GameConfig, config_path: String) -> Result<Self> {
        let audio = AudioCues::new(config.modes.music)?;
        let world = World::new(config);
        Ok(Self {
            running: true,
            paused: false,
            frames: 0,
            world,
            config_path,
            show_help: false,
            event_log: VecDeque::new(),
            audio,
        })
    }
}
