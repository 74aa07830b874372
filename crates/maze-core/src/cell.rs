//! The [`Cell`] type: one square of the maze plus its search bookkeeping.

use crate::geom::Point;

/// Cost value meaning "not reached yet" (`g = +∞`).
pub const UNREACHABLE: i32 = i32::MAX;

/// A single grid cell.
///
/// The marker fields (`is_wall`, `is_start`, `is_end`) are owned by the
/// [`Grid`](crate::Grid) mutators. The remaining fields are scratch state
/// written by a search run and reset before every run.
///
/// `Cell` is `Copy` so a renderer can receive a full snapshot of a cell
/// without holding a borrow of the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub pos: Point,
    pub is_wall: bool,
    pub is_start: bool,
    pub is_end: bool,
    /// Known shortest cost from the start.
    pub g: i32,
    /// Heuristic estimate of the remaining cost.
    pub h: i32,
    /// `g + h`.
    pub f: i32,
    /// Flat index of the predecessor on the best known path.
    pub parent: Option<usize>,
    /// Popped from the open set and expanded.
    pub visited: bool,
    /// Relaxed at least once during the current run.
    pub frontier: bool,
}

impl Cell {
    /// A free cell at `pos` with pristine search state.
    pub const fn new(pos: Point) -> Self {
        Self {
            pos,
            is_wall: false,
            is_start: false,
            is_end: false,
            g: UNREACHABLE,
            h: 0,
            f: UNREACHABLE,
            parent: None,
            visited: false,
            frontier: false,
        }
    }

    /// Restore the search-derived fields to their initial values.
    #[inline]
    pub fn reset_search(&mut self) {
        self.g = UNREACHABLE;
        self.h = 0;
        self.f = UNREACHABLE;
        self.parent = None;
        self.visited = false;
        self.frontier = false;
    }

    /// Whether a search has assigned a finite cost to this cell.
    #[inline]
    pub fn is_reached(&self) -> bool {
        self.g != UNREACHABLE
    }

    /// Whether the cell is free of walls and markers.
    #[inline]
    pub fn is_free(&self) -> bool {
        !self.is_wall && !self.is_start && !self.is_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_restores_defaults() {
        let mut c = Cell::new(Point::new(1, 2));
        c.is_wall = true;
        c.g = 30;
        c.h = 14;
        c.f = 44;
        c.parent = Some(3);
        c.visited = true;
        c.frontier = true;
        c.reset_search();
        assert_eq!(c.g, UNREACHABLE);
        assert_eq!(c.f, UNREACHABLE);
        assert_eq!(c.h, 0);
        assert_eq!(c.parent, None);
        assert!(!c.visited && !c.frontier);
        // Markers survive.
        assert!(c.is_wall);
        assert!(!c.is_reached());
    }
}
