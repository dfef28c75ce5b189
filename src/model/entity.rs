use ratatui::style::{Color, Modifier, Style};

use crate::model::geometry::{Cell, Direction};

/// The closed set of simulated kinds. Interaction rules dispatch on
/// `(mover kind, occupant kind)` pairs, so adding a kind here forces every
/// match over it to be revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Worker,
    ArmedWorker,
    Cannon,
    Bomber,
    Bullet,
    Mine,
    Wall,
    Zombie,
    Walker,
    EnemyBullet,
    Queen,
}

/// What the player deploys when shooting. A subset of the entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weapon {
    Bullet,
    Mine,
    Cannon,
    Bomber,
    Worker,
    ArmedWorker,
    Wall,
}

impl Weapon {
    pub fn label(self) -> &'static str {
        match self {
            Weapon::Bullet => "Bullet",
            Weapon::Mine => "Mine",
            Weapon::Cannon => "Cannon",
            Weapon::Bomber => "Bomber",
            Weapon::Worker => "Worker",
            Weapon::ArmedWorker => "Armed worker",
            Weapon::Wall => "Wall",
        }
    }
}

/// Per-kind mutable state. One variant per entity kind; the kind tag is
/// derived, never stored separately, so state and tag cannot drift apart.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityState {
    Player {
        weapon: Weapon,
        ammo: i32,
    },
    Bullet {
        dir: Direction,
        speed: i16,
        collided: bool,
    },
    EnemyBullet {
        dir: Direction,
        speed: i16,
        collided: bool,
    },
    Zombie,
    Walker {
        exploded: bool,
    },
    Wall {
        strength: i16,
    },
    /// `armed_at` is the tick the mine was triggered on; it detonates on a
    /// later tick and is never re-armed.
    Mine {
        armed_at: Option<u64>,
    },
    Cannon {
        fire_odds: f64,
    },
    Worker,
    ArmedWorker {
        home_row: i16,
    },
    Bomber {
        exploded: bool,
    },
    Queen {
        life: i16,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub pos: Cell,
    pub state: EntityState,
}

impl Entity {
    pub fn new(pos: Cell, state: EntityState) -> Self {
        Self { pos, state }
    }

    pub fn kind(&self) -> EntityKind {
        match self.state {
            EntityState::Player { .. } => EntityKind::Player,
            EntityState::Bullet { .. } => EntityKind::Bullet,
            EntityState::EnemyBullet { .. } => EntityKind::EnemyBullet,
            EntityState::Zombie => EntityKind::Zombie,
            EntityState::Walker { .. } => EntityKind::Walker,
            EntityState::Wall { .. } => EntityKind::Wall,
            EntityState::Mine { .. } => EntityKind::Mine,
            EntityState::Cannon { .. } => EntityKind::Cannon,
            EntityState::Worker => EntityKind::Worker,
            EntityState::ArmedWorker { .. } => EntityKind::ArmedWorker,
            EntityState::Bomber { .. } => EntityKind::Bomber,
            EntityState::Queen { .. } => EntityKind::Queen,
        }
    }

    /// Display glyph. Derived from live state, e.g. a destroyed wall shows
    /// `@` until the prune sweep and the queen shows her remaining life.
    pub fn glyph(&self) -> char {
        match &self.state {
            EntityState::Player { .. } => '$',
            EntityState::Bullet { dir, .. } => dir.glyph(),
            EntityState::EnemyBullet { dir, .. } => dir.glyph(),
            EntityState::Zombie => 'Z',
            EntityState::Walker { .. } => 'Z',
            EntityState::Wall { strength } => {
                if *strength > 0 {
                    '='
                } else {
                    '@'
                }
            }
            EntityState::Mine { armed_at } => {
                if armed_at.is_some() {
                    '%'
                } else {
                    '*'
                }
            }
            EntityState::Cannon { .. } => 'C',
            EntityState::Worker => 'W',
            EntityState::ArmedWorker { .. } => 'A',
            EntityState::Bomber { .. } => 'B',
            EntityState::Queen { life } => {
                char::from_digit((*life).clamp(0, 9) as u32, 10).unwrap_or('0')
            }
        }
    }

    pub fn style(&self) -> Style {
        match &self.state {
            EntityState::Player { .. } => Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            EntityState::Bullet { .. } => Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            EntityState::EnemyBullet { .. } => Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            EntityState::Zombie => Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::DIM),
            EntityState::Walker { .. } => Style::default()
                .fg(Color::Black)
                .bg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
            EntityState::Wall { .. } => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            EntityState::Mine { armed_at } => {
                if armed_at.is_some() {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::SLOW_BLINK)
                }
            }
            EntityState::Cannon { .. } => Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            EntityState::Worker => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::UNDERLINED),
            EntityState::ArmedWorker { .. } => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::UNDERLINED | Modifier::BOLD),
            EntityState::Bomber { .. } => Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            EntityState::Queen { .. } => Style::default()
                .fg(Color::Black)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_is_derived_from_state() {
        let e = Entity::new(Cell::new(0, 0), EntityState::Zombie);
        assert_eq!(e.kind(), EntityKind::Zombie);

        let e = Entity::new(
            Cell::new(0, 0),
            EntityState::Bullet {
                dir: Direction::Right,
                speed: 1,
                collided: false,
            },
        );
        assert_eq!(e.kind(), EntityKind::Bullet);
        assert_eq!(e.glyph(), '>');
    }

    #[test]
    fn test_wall_glyph_tracks_destruction() {
        let mut e = Entity::new(Cell::new(0, 0), EntityState::Wall { strength: 2 });
        assert_eq!(e.glyph(), '=');
        e.state = EntityState::Wall { strength: 0 };
        assert_eq!(e.glyph(), '@');
    }

    #[test]
    fn test_queen_glyph_shows_life() {
        let e = Entity::new(Cell::new(0, 0), EntityState::Queen { life: 7 });
        assert_eq!(e.glyph(), '7');
        let e = Entity::new(Cell::new(0, 0), EntityState::Queen { life: 0 });
        assert_eq!(e.glyph(), '0');
    }
}
