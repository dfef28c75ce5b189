pub mod audio;
pub mod input;
pub mod render;
pub mod state;

pub use state::App;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::style::Color;
use std::time::{Duration, Instant};

use crate::model::events::GameEvent;
use crate::ui::Tui;

impl App {
    /// The frame driver: draw, drain input, tick on the deadline. Input is
    /// polled with a 1ms budget so held keys stay responsive without
    /// busy-waiting, and the simulation only advances on the fixed cadence.
    pub fn run(&mut self, tui: &mut Tui) -> Result<()> {
        let tick_rate = Duration::from_millis(self.world.config.tick_ms);
        let mut last_tick = Instant::now();

        while self.running {
            tui.terminal.draw(|f| {
                self.draw(f);
            })?;

            while event::poll(Duration::from_millis(1))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if last_tick.elapsed() >= tick_rate {
                if !self.paused {
                    self.tick_world()?;
                } else if self.world.config.modes.unofficial {
                    // Unofficial runs keep the frame counter moving while
                    // paused; official ones freeze it with the board.
                    self.frames += 1;
                }
                last_tick = Instant::now();
            }
        }
        Ok(())
    }

    fn tick_world(&mut self) -> Result<()> {
        if self.world.outcome.is_none() {
            self.frames += 1;
        }
        let events = self.world.advance()?;
        for event in events {
            if matches!(event, GameEvent::Alert | GameEvent::Touchdown) {
                self.audio.alert();
            }
            let (msg, color) = event.to_ui_message();
            self.push_log(msg, color);
        }
        Ok(())
    }

    pub(crate) fn push_log(&mut self, msg: String, color: Color) {
        self.event_log.push_back((msg, color));
        if self.event_log.len() > 15 {
            self.event_log.pop_front();
        }
    }
}

pub(crate) trait GameEventExt {
    fn to_ui_message(&self) -> (String, Color);
}

impl GameEventExt for GameEvent {
    fn to_ui_message(&self) -> (String, Color) {
        match self {
            GameEvent::Alert => ("Out of ammo!".to_string(), Color::Yellow),
            GameEvent::QueenWounded { life } => {
                (format!("The queen is hit! {life} left"), Color::Magenta)
            }
            GameEvent::Touchdown => (
                "A walker reached the border - ammo stores lost!".to_string(),
                Color::Red,
            ),
            GameEvent::HordeInbound { count } => {
                (format!("Horde inbound: {count} of each"), Color::LightRed)
            }
            GameEvent::Victory => ("The queen is slain. Victory!".to_string(), Color::Green),
            GameEvent::Defeat => ("Overrun. The line is lost.".to_string(), Color::Red),
        }
    }
}
