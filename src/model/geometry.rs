use std::ops::{Add, Mul};

/// A grid position, (row, column). Signed so that candidate cells one step
/// past the border are representable and can be bounds-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: i16,
    pub col: i16,
}

impl Cell {
    pub fn new(row: i16, col: i16) -> Self {
        Self { row, col }
    }

    /// The cell one step away in `dir`.
    pub fn step(self, dir: Direction) -> Cell {
        self + dir.delta()
    }
}

/// A displacement between cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delta {
    pub row: i16,
    pub col: i16,
}

impl Add<Delta> for Cell {
    type Output = Cell;

    fn add(self, rhs: Delta) -> Cell {
        Cell::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Mul<i16> for Delta {
    type Output = Delta;

    fn mul(self, rhs: i16) -> Delta {
        Delta {
            row: self.row * rhs,
            col: self.col * rhs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub fn delta(self) -> Delta {
        match self {
            Direction::Up => Delta { row: -1, col: 0 },
            Direction::Right => Delta { row: 0, col: 1 },
            Direction::Down => Delta { row: 1, col: 0 },
            Direction::Left => Delta { row: 0, col: -1 },
        }
    }

    /// Glyph used by projectiles flying in this direction.
    pub fn glyph(self) -> char {
        match self {
            Direction::Up => '^',
            Direction::Right => '>',
            Direction::Down => 'v',
            Direction::Left => '<',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_and_scaled_delta() {
        let c = Cell::new(5, 10);
        assert_eq!(c.step(Direction::Left), Cell::new(5, 9));
        assert_eq!(c.step(Direction::Down), Cell::new(6, 10));
        assert_eq!(c + Direction::Right.delta() * 3, Cell::new(5, 13));
    }

    #[test]
    fn test_projectile_glyphs() {
        assert_eq!(Direction::Up.glyph(), '^');
        assert_eq!(Direction::Left.glyph(), '<');
    }
}
