//! Precondition failures reported by grid mutators and configuration checks.

use std::fmt;

use crate::config::CostTable;
use crate::geom::Point;

/// A rejected grid mutation or configuration.
///
/// Every variant is recoverable: the grid is left exactly as it was before
/// the rejected call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Tried to place a wall on the current start or end cell.
    WallOnMarker(Point),
    /// Tried to place the start or end on a wall.
    MarkerOnWall(Point),
    /// A configured wall index lies outside the grid.
    WallIndexOutOfRange { index: usize, len: usize },
    /// Grid dimension must be positive.
    InvalidSize(i32),
    /// Cost table violates `0 < cardinal <= diagonal <= 2 * cardinal`, or
    /// its costs are too large for the grid.
    InvalidCosts(CostTable),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WallOnMarker(p) => write!(f, "cannot place a wall on the start/end cell at {p}"),
            Self::MarkerOnWall(p) => write!(f, "cannot place start/end on the wall at {p}"),
            Self::WallIndexOutOfRange { index, len } => {
                write!(f, "wall index {index} is outside a grid of {len} cells")
            }
            Self::InvalidSize(n) => write!(f, "grid size must be positive, got {n}"),
            Self::InvalidCosts(c) => write!(
                f,
                "invalid cost table: cardinal {}, diagonal {}",
                c.cardinal, c.diagonal
            ),
        }
    }
}

impl std::error::Error for GridError {}
