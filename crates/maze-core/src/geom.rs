//! Grid coordinates: [`Point`].
//!
//! `x` is the column and `y` is the row, so `Point::new(col, row)` and
//! [`Point::rc`] describe the same cell.

use std::fmt;
use std::ops::{Add, Sub};

/// A 2D integer point. X grows right (columns), Y grows down (rows).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new point from a column and a row.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Create a point from a `(row, col)` pair.
    #[inline]
    pub const fn rc(row: i32, col: i32) -> Self {
        Self { x: col, y: row }
    }

    /// Row of the point.
    #[inline]
    pub const fn row(self) -> i32 {
        self.y
    }

    /// Column of the point.
    #[inline]
    pub const fn col(self) -> i32 {
        self.x
    }

    /// Return a point shifted by (dx, dy).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The four cardinal neighbours (up, right, down, left).
    #[inline]
    pub fn neighbors_4(self) -> [Point; 4] {
        [
            Self::new(self.x, self.y - 1),
            Self::new(self.x + 1, self.y),
            Self::new(self.x, self.y + 1),
            Self::new(self.x - 1, self.y),
        ]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(row {}, col {})", self.y, self.x)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rc_swaps_into_xy() {
        let p = Point::rc(3, 7);
        assert_eq!(p, Point::new(7, 3));
        assert_eq!(p.row(), 3);
        assert_eq!(p.col(), 7);
    }

    #[test]
    fn arithmetic() {
        let p = Point::new(2, 3) + Point::new(1, -1);
        assert_eq!(p, Point::new(3, 2));
        assert_eq!(p - Point::new(3, 2), Point::ZERO);
        assert_eq!(Point::ZERO.shift(-1, 4), Point::new(-1, 4));
    }
}
