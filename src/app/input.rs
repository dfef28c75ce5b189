use crossterm::event::{KeyCode, KeyEvent};

use crate::app::state::App;
use crate::app::GameEventExt;
use crate::model::entity::Weapon;
use crate::model::events::GameEvent;
use crate::model::geometry::Direction;

impl App {
    /// wasd moves, ijkl shoots, the letter row picks weapons. Weapon picks
    /// and pause work while paused; movement and shooting do not.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('w') => self.player_move(Direction::Up),
            KeyCode::Char('d') | KeyCode::Char('D') => self.player_move(Direction::Right),
            KeyCode::Char('s') | KeyCode::Char('S') => self.player_move(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => self.player_move(Direction::Left),

            KeyCode::Char('i') | KeyCode::Char('I') => self.player_fire(Direction::Up),
            KeyCode::Char('l') | KeyCode::Char('L') => self.player_fire(Direction::Right),
            KeyCode::Char('k') | KeyCode::Char('K') => self.player_fire(Direction::Down),
            KeyCode::Char('j') | KeyCode::Char('J') => self.player_fire(Direction::Left),

            KeyCode::Char('p') | KeyCode::Char('P') => self.world.select_weapon(Weapon::Bullet),
            KeyCode::Char('m') | KeyCode::Char('M') => self.world.select_weapon(Weapon::Mine),
            KeyCode::Char('c') | KeyCode::Char('C') => self.world.select_weapon(Weapon::Cannon),
            KeyCode::Char('b') | KeyCode::Char('B') => self.world.select_weapon(Weapon::Bomber),
            KeyCode::Char('W') => self.world.select_weapon(Weapon::Worker),
            KeyCode::Char('x') | KeyCode::Char('X') => {
                self.world.select_weapon(Weapon::ArmedWorker)
            }
            KeyCode::Char('=') | KeyCode::Char('0') => self.world.select_weapon(Weapon::Wall),

            KeyCode::Char('.') => self.paused = !self.paused,
            KeyCode::Char('h') | KeyCode::Char('H') => self.show_help = !self.show_help,
            KeyCode::Char('Q') | KeyCode::Esc => self.running = false,
            _ => {}
        }
    }

    fn player_move(&mut self, dir: Direction) {
        if self.paused {
            return;
        }
        self.world.move_player(dir);
    }

    fn player_fire(&mut self, dir: Direction) {
        if self.paused {
            return;
        }
        self.world.fire(dir);
        // Fire can only raise the ammo alert; surface it right away rather
        // than waiting for the next tick.
        for event in self.world.drain_events() {
            if matches!(event, GameEvent::Alert) {
                self.audio.alert();
            }
            let (msg, color) = event.to_ui_message();
            self.push_log(msg, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::GameConfig;
    use crate::model::geometry::Cell;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn key(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn app() -> App {
        let mut config = GameConfig::default();
        config.seed = Some(67);
        config.modes.music = false;
        App::new(config, "test-config.toml".into()).unwrap()
    }

    #[test]
    fn test_movement_keys_shift_the_player() {
        let mut app = app();
        let start = app.world.player_pos();
        app.handle_key(key('w'));
        assert_eq!(app.world.player_pos(), Cell::new(start.row - 1, start.col));
        app.handle_key(key('s'));
        app.handle_key(key('s'));
        assert_eq!(app.world.player_pos(), Cell::new(start.row + 1, start.col));
    }

    #[test]
    fn test_weapon_row_selects() {
        let mut app = app();
        app.handle_key(key('m'));
        assert_eq!(app.world.weapon(), Weapon::Mine);
        app.handle_key(key('x'));
        assert_eq!(app.world.weapon(), Weapon::ArmedWorker);
        app.handle_key(key('='));
        assert_eq!(app.world.weapon(), Weapon::Wall);
    }

    #[test]
    fn test_pause_blocks_moves_but_not_weapon_picks() {
        let mut app = app();
        let start = app.world.player_pos();
        app.handle_key(key('.'));
        assert!(app.paused);
        app.handle_key(key('w'));
        assert_eq!(app.world.player_pos(), start);
        app.handle_key(key('c'));
        assert_eq!(app.world.weapon(), Weapon::Cannon);
        app.handle_key(key('.'));
        assert!(!app.paused);
    }

    #[test]
    fn test_dry_fire_logs_the_alert() {
        let mut app = app();
        app.world.set_ammo(0);
        app.handle_key(key('l'));
        assert_eq!(app.event_log.len(), 1);
    }

    #[test]
    fn test_quit_key_stops_the_app() {
        let mut app = app();
        app.handle_key(key('Q'));
        assert!(!app.running);
    }

    #[test]
    fn test_lowercase_q_is_not_quit() {
        // It sits next to the movement cluster; a typo must not end a run.
        let mut app = app();
        app.handle_key(key('q'));
        assert!(app.running);
    }
}
