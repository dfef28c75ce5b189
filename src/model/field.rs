use crate::model::arena::EntityId;
use crate::model::error::FieldError;
use crate::model::geometry::{Cell, Direction};

/// The shared occupancy grid. Each cell holds at most one entity handle;
/// ownership stays with the arena, the field only mirrors positions.
#[derive(Debug)]
pub struct Field {
    rows: i16,
    cols: i16,
    cells: Vec<Option<EntityId>>,
}

impl Field {
    pub fn new(rows: i16, cols: i16) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows as usize * cols as usize],
        }
    }

    pub fn rows(&self) -> i16 {
        self.rows
    }

    pub fn cols(&self) -> i16 {
        self.cols
    }

    fn index(&self, cell: Cell) -> usize {
        cell.row as usize * self.cols as usize + cell.col as usize
    }

    /// Pure bounds predicate; never mutates.
    pub fn out_of_bounds(&self, cell: Cell) -> bool {
        cell.row < 0 || cell.row >= self.rows || cell.col < 0 || cell.col >= self.cols
    }

    pub fn occupant(&self, cell: Cell) -> Option<EntityId> {
        if self.out_of_bounds(cell) {
            return None;
        }
        self.cells[self.index(cell)]
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.occupant(cell).is_some()
    }

    /// False if out of bounds or occupied.
    pub fn is_free(&self, cell: Cell) -> bool {
        !self.out_of_bounds(cell) && !self.is_occupied(cell)
    }

    pub fn place(&mut self, id: EntityId, cell: Cell) -> Result<(), FieldError> {
        if self.out_of_bounds(cell) {
            return Err(FieldError::OutOfBounds(cell));
        }
        let index = self.index(cell);
        if self.cells[index].is_some() {
            return Err(FieldError::Occupied(cell));
        }
        self.cells[index] = Some(id);
        Ok(())
    }

    pub fn relocate(&mut self, from: Cell, to: Cell) -> Result<(), FieldError> {
        if self.out_of_bounds(from) {
            return Err(FieldError::OutOfBounds(from));
        }
        if self.out_of_bounds(to) {
            return Err(FieldError::OutOfBounds(to));
        }
        if self.cells[self.index(to)].is_some() {
            return Err(FieldError::Occupied(to));
        }
        let from_index = self.index(from);
        let id = self.cells[from_index].ok_or(FieldError::Vacant(from))?;
        self.cells[from_index] = None;
        let to_index = self.index(to);
        self.cells[to_index] = Some(id);
        Ok(())
    }

    pub fn clear(&mut self, cell: Cell) -> Option<EntityId> {
        if self.out_of_bounds(cell) {
            return None;
        }
        let index = self.index(cell);
        self.cells[index].take()
    }

    /// One step in `dir`, wrapping to the opposite edge when the step would
    /// exit the grid. Fails with `Occupied` if the landing cell is taken;
    /// the caller decides whether that matters (the walker swallows it).
    pub fn wrap_relocate(&mut self, from: Cell, dir: Direction) -> Result<Cell, FieldError> {
        if self.out_of_bounds(from) {
            return Err(FieldError::OutOfBounds(from));
        }
        let stepped = from.step(dir);
        let to = Cell::new(
            stepped.row.rem_euclid(self.rows),
            stepped.col.rem_euclid(self.cols),
        );
        self.relocate(from, to)?;
        Ok(to)
    }
}
