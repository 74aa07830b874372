//! The [`Grid`] type: an N×N arena of [`Cell`]s with start/end markers.
//!
//! Cells live in a single row-major `Vec`; search back-references are flat
//! indices into it, so the grid is the only owner of cell state.

use std::fmt;

use crate::cell::Cell;
use crate::config::{CostTable, GridConfig, Heuristic};
use crate::error::GridError;
use crate::geom::Point;

/// A square maze grid.
#[derive(Debug, Clone)]
pub struct Grid {
    size: i32,
    cells: Vec<Cell>,
    start: Option<Point>,
    end: Option<Point>,
    costs: CostTable,
    heuristic: Heuristic,
}

impl Grid {
    /// Create an `size`×`size` grid with every cell free and default costs.
    ///
    /// # Panics
    ///
    /// Panics if `size` is not positive.
    pub fn new(size: i32) -> Self {
        assert!(size > 0, "grid size must be positive, got {size}");
        let n = size as usize;
        let cells = (0..n * n)
            .map(|i| Cell::new(Point::new((i % n) as i32, (i / n) as i32)))
            .collect();
        Self {
            size,
            cells,
            start: None,
            end: None,
            costs: CostTable::default(),
            heuristic: Heuristic::default(),
        }
    }

    /// Build a grid from a validated configuration, applying its wall layout.
    pub fn from_config(cfg: &GridConfig) -> Result<Self, GridError> {
        cfg.validate()?;
        let mut grid = Self::new(cfg.size);
        grid.costs = cfg.costs;
        grid.heuristic = cfg.heuristic;
        grid.apply_walls(&cfg.walls)?;
        log::debug!(
            "built {}x{} grid with {} walls",
            cfg.size,
            cfg.size,
            cfg.walls.len()
        );
        Ok(grid)
    }

    /// Side length N.
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Movement cost table used by searches on this grid.
    #[inline]
    pub fn costs(&self) -> CostTable {
        self.costs
    }

    /// Heuristic used by searches on this grid.
    #[inline]
    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    /// Change the heuristic for subsequent searches.
    pub fn set_heuristic(&mut self, heuristic: Heuristic) {
        self.heuristic = heuristic;
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.size && p.y < self.size
    }

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub fn idx(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.y as usize * self.size as usize + p.x as usize)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let n = self.size as usize;
        Point::new((idx % n) as i32, (idx / n) as i32)
    }

    /// One-based cell number, `row * N + col + 1`, as printed on the board.
    pub fn label(&self, p: Point) -> usize {
        self.index(p) + 1
    }

    /// Flat index of `p`.
    ///
    /// # Panics
    ///
    /// Panics if `p` is outside the grid.
    #[inline]
    pub fn index(&self, p: Point) -> usize {
        match self.idx(p) {
            Some(i) => i,
            None => panic!("{p} is outside a {}x{} grid", self.size, self.size),
        }
    }

    /// The cell at `p`.
    ///
    /// # Panics
    ///
    /// Panics if `p` is outside the grid.
    #[inline]
    pub fn cell(&self, p: Point) -> &Cell {
        &self.cells[self.index(p)]
    }

    /// Mutable access to the cell at `p`. Marker fields should be changed
    /// through [`set_wall`](Self::set_wall) and friends instead.
    ///
    /// # Panics
    ///
    /// Panics if `p` is outside the grid.
    #[inline]
    pub fn cell_mut(&mut self, p: Point) -> &mut Cell {
        let i = self.index(p);
        &mut self.cells[i]
    }

    /// The cell at flat index `idx`.
    #[inline]
    pub fn at_index(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    /// Mutable access to the cell at flat index `idx`.
    #[inline]
    pub fn at_index_mut(&mut self, idx: usize) -> &mut Cell {
        &mut self.cells[idx]
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Whether `p` is a wall. Points outside the grid count as walls.
    #[inline]
    pub fn is_wall(&self, p: Point) -> bool {
        self.idx(p).is_none_or(|i| self.cells[i].is_wall)
    }

    /// Current start marker.
    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// Current end marker.
    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    // -----------------------------------------------------------------------
    // Mutators
    // -----------------------------------------------------------------------

    /// Turn `p` into a wall (or clear it). Walls cannot cover start or end.
    pub fn set_wall(&mut self, p: Point, wall: bool) -> Result<(), GridError> {
        let cell = self.cell_mut(p);
        if wall && (cell.is_start || cell.is_end) {
            log::warn!("rejected wall at {p}: cell holds a start/end marker");
            return Err(GridError::WallOnMarker(p));
        }
        cell.is_wall = wall;
        Ok(())
    }

    /// Move the start marker to `p`.
    pub fn set_start(&mut self, p: Point) -> Result<(), GridError> {
        if self.cell(p).is_wall {
            log::warn!("rejected start at {p}: cell is a wall");
            return Err(GridError::MarkerOnWall(p));
        }
        self.clear_start();
        self.cell_mut(p).is_start = true;
        self.start = Some(p);
        Ok(())
    }

    /// Move the end marker to `p`.
    pub fn set_end(&mut self, p: Point) -> Result<(), GridError> {
        if self.cell(p).is_wall {
            log::warn!("rejected end at {p}: cell is a wall");
            return Err(GridError::MarkerOnWall(p));
        }
        self.clear_end();
        self.cell_mut(p).is_end = true;
        self.end = Some(p);
        Ok(())
    }

    /// Remove the start marker, if any.
    pub fn clear_start(&mut self) {
        if let Some(old) = self.start.take() {
            self.cell_mut(old).is_start = false;
        }
    }

    /// Remove the end marker, if any.
    pub fn clear_end(&mut self) {
        if let Some(old) = self.end.take() {
            self.cell_mut(old).is_end = false;
        }
    }

    /// Apply a batch of walls given as linear indices `row * N + col`.
    ///
    /// The batch is checked first; on error no wall is placed.
    pub fn apply_walls(&mut self, walls: &[usize]) -> Result<(), GridError> {
        let len = self.len();
        for &index in walls {
            if index >= len {
                return Err(GridError::WallIndexOutOfRange { index, len });
            }
            let cell = &self.cells[index];
            if cell.is_start || cell.is_end {
                return Err(GridError::WallOnMarker(cell.pos));
            }
        }
        for &index in walls {
            self.cells[index].is_wall = true;
        }
        Ok(())
    }

    /// Remove every wall.
    pub fn clear_walls(&mut self) {
        for c in self.cells.iter_mut() {
            c.is_wall = false;
        }
    }

    /// Reset the search-derived fields of every cell.
    pub fn reset_search(&mut self) {
        for c in self.cells.iter_mut() {
            c.reset_search();
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size as usize) {
            for c in row {
                let ch = if c.is_start {
                    'S'
                } else if c.is_end {
                    'E'
                } else if c.is_wall {
                    '#'
                } else {
                    '.'
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
