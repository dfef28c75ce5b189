use crate::model::geometry::Cell;
use thiserror::Error;

/// Violations of the occupancy-grid contract. Callers pre-check with
/// `Field::is_free`, so in normal play these never surface; they exist so
/// that a bad move is an explicit `Result` instead of a silent corruption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("cell ({},{}) is out of bounds", .0.row, .0.col)]
    OutOfBounds(Cell),
    #[error("cell ({},{}) is already occupied", .0.row, .0.col)]
    Occupied(Cell),
    #[error("cell ({},{}) is vacant", .0.row, .0.col)]
    Vacant(Cell),
}
