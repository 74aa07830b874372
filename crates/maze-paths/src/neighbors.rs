use maze_core::{Grid, Point};

/// The eight unit moves, cardinals first.
pub const MOVES: [Point; 8] = [
    Point::new(0, 1),
    Point::new(1, 0),
    Point::new(0, -1),
    Point::new(-1, 0),
    Point::new(1, 1),
    Point::new(-1, -1),
    Point::new(1, -1),
    Point::new(-1, 1),
];

/// Cached neighbor computation helper.
///
/// Enumerates the cells a search may step into from a given cell, reusing
/// one buffer across calls.
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// Return the free 4-directional neighbors of `p`.
    pub fn cardinal(&mut self, grid: &Grid, p: Point) -> &[Point] {
        self.buf.clear();
        for n in p.neighbors_4() {
            if !grid.is_wall(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }

    /// Return the 8-directional neighbors of `p` that can be entered.
    ///
    /// Walls and out-of-grid cells are dropped. A diagonal move is kept only
    /// when both orthogonal cells flanking it are free, so paths never
    /// squeeze between two walls touching at a corner or clip a wall corner.
    pub fn moves(&mut self, grid: &Grid, p: Point) -> &[Point] {
        self.buf.clear();
        for d in MOVES {
            let n = p + d;
            if grid.is_wall(n) {
                continue;
            }
            let diagonal = d.x != 0 && d.y != 0;
            if diagonal && (grid.is_wall(p.shift(d.x, 0)) || grid.is_wall(p.shift(0, d.y))) {
                continue;
            }
            self.buf.push(n);
        }
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_interior_has_eight_moves() {
        let g = Grid::new(3);
        let mut nb = Neighbors::new();
        assert_eq!(nb.moves(&g, Point::new(1, 1)).len(), 8);
        assert_eq!(nb.cardinal(&g, Point::new(1, 1)).len(), 4);
    }

    #[test]
    fn corner_of_grid_is_clipped() {
        let g = Grid::new(3);
        let mut nb = Neighbors::new();
        let got = nb.moves(&g, Point::ZERO).to_vec();
        assert_eq!(got.len(), 3);
        assert!(got.contains(&Point::new(1, 1)));
    }

    #[test]
    fn diagonal_blocked_by_single_flanking_wall() {
        // . #
        // . .
        let mut g = Grid::new(2);
        g.set_wall(Point::new(1, 0), true).unwrap();
        let mut nb = Neighbors::new();
        let got = nb.moves(&g, Point::new(0, 0)).to_vec();
        assert_eq!(got, vec![Point::new(0, 1)]);
    }

    #[test]
    fn diagonal_blocked_by_both_flanking_walls() {
        // . #
        // # .
        let mut g = Grid::new(2);
        g.set_wall(Point::new(1, 0), true).unwrap();
        g.set_wall(Point::new(0, 1), true).unwrap();
        let mut nb = Neighbors::new();
        assert!(nb.moves(&g, Point::new(0, 0)).is_empty());
        assert!(nb.cardinal(&g, Point::new(0, 0)).is_empty());
    }
}
