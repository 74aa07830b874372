//! Grid configuration: dimension, movement costs, heuristic and wall layout.

use crate::error::GridError;

/// Default grid dimension.
pub const DEFAULT_SIZE: i32 = 21;

/// The illustrative 21×21 maze, as zero-based linear indices `row * 21 + col`.
#[rustfmt::skip]
pub const DEFAULT_MAZE: [usize; 177] = [
    12, 15, 16, 17, 21, 22, 24, 25, 27, 29, 30, 31,
    33, 40, 42, 46, 48, 52, 54, 55, 56, 57, 59, 61,
    63, 65, 66, 67, 71, 72, 73, 75, 80, 82, 84, 88,
    90, 101, 103, 105, 106, 107, 111, 113, 115, 117, 118, 119,
    120, 122, 138, 147, 149, 151, 152, 153, 155, 156, 157, 161,
    162, 164, 165, 166, 168, 169, 170, 172, 173, 174, 176, 177,
    178, 182, 183, 185, 186, 187, 203, 204, 210, 212, 214, 216,
    217, 218, 219, 220, 223, 226, 228, 229, 230, 231, 233, 235,
    237, 238, 239, 241, 244, 247, 251, 252, 254, 255, 256, 258,
    259, 260, 262, 265, 268, 270, 272, 280, 283, 286, 289, 291,
    293, 295, 301, 304, 307, 310, 312, 314, 316, 322, 325, 328,
    335, 337, 339, 340, 341, 343, 344, 345, 346, 347, 348, 349,
    350, 351, 353, 354, 355, 356, 361, 379, 380, 381, 382, 385,
    386, 388, 389, 390, 393, 394, 396, 397, 406, 409, 411, 414,
    415, 417, 418, 422, 423, 424, 425, 427, 432,
];

/// Movement costs of the 8-connected neighbourhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostTable {
    /// Cost of a horizontal or vertical step.
    pub cardinal: i32,
    /// Cost of a diagonal step.
    pub diagonal: i32,
}

impl Default for CostTable {
    fn default() -> Self {
        Self {
            cardinal: 10,
            diagonal: 14,
        }
    }
}

impl CostTable {
    /// Check that both costs are positive and that a diagonal step is never
    /// cheaper than a cardinal one nor dearer than two of them.
    pub fn validate(&self) -> Result<(), GridError> {
        let ok = self.cardinal > 0
            && self.diagonal >= self.cardinal
            && self.diagonal - self.cardinal <= self.cardinal;
        if ok {
            Ok(())
        } else {
            Err(GridError::InvalidCosts(*self))
        }
    }

    /// Like [`validate`](Self::validate), and also check that every cost a
    /// search can produce on a `size`×`size` grid stays below `i32::MAX`.
    ///
    /// A path visits at most `size²` cells and an estimate never exceeds
    /// `3 * size` diagonal steps, so `diagonal * (size² + 3 * size)` bounds
    /// every `g`, `h` and `f`.
    pub fn validate_for(&self, size: i32) -> Result<(), GridError> {
        self.validate()?;
        let n = i64::from(size.max(0));
        let bound = n
            .checked_mul(n)
            .and_then(|cells| cells.checked_add(3 * n))
            .and_then(|steps| steps.checked_mul(i64::from(self.diagonal)));
        match bound {
            Some(b) if b < i64::from(i32::MAX) => Ok(()),
            _ => Err(GridError::InvalidCosts(*self)),
        }
    }
}

/// Remaining-cost estimate used to order the open set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    /// Octile distance: `cardinal * max(dx, dy) + (diagonal - cardinal) * min(dx, dy)`.
    /// Admissible and consistent for any valid [`CostTable`].
    #[default]
    Octile,
    /// `cardinal * (dx + dy) + (diagonal - cardinal) * min(dx, dy)`.
    ///
    /// Overestimates along diagonals, so the search behaves greedily and the
    /// returned path is not guaranteed to be the cheapest.
    AxisSum,
}

/// Everything needed to build a [`Grid`](crate::Grid).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Side length N of the square grid.
    pub size: i32,
    pub costs: CostTable,
    pub heuristic: Heuristic,
    /// Wall cells as linear indices `row * size + col`.
    pub walls: Vec<usize>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            costs: CostTable::default(),
            heuristic: Heuristic::default(),
            walls: DEFAULT_MAZE.to_vec(),
        }
    }
}

impl GridConfig {
    /// An `size`×`size` configuration without walls.
    pub fn empty(size: i32) -> Self {
        Self {
            size,
            walls: Vec::new(),
            ..Self::default()
        }
    }

    /// Builder: replace the wall layout.
    pub fn with_walls(mut self, walls: impl Into<Vec<usize>>) -> Self {
        self.walls = walls.into();
        self
    }

    /// Builder: replace the heuristic.
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Number of cells in the grid.
    #[inline]
    pub fn len(&self) -> usize {
        let n = self.size.max(0) as usize;
        n * n
    }

    /// Whether the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reject non-positive sizes, invalid cost tables and out-of-range walls.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.size <= 0 {
            return Err(GridError::InvalidSize(self.size));
        }
        self.costs.validate_for(self.size)?;
        let len = self.len();
        if let Some(&index) = self.walls.iter().find(|&&i| i >= len) {
            return Err(GridError::WallIndexOutOfRange { index, len });
        }
        Ok(())
    }
}
