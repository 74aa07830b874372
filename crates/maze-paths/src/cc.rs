//! Connectivity pre-check.

use maze_core::{Grid, Point};

use crate::neighbors::Neighbors;

/// Whether `to` can be reached from `from` with cardinal moves over free
/// cells.
///
/// Any diagonal step the search may take has both flanking orthogonal cells
/// free, so it can be replaced by two cardinal steps: this flood fill
/// therefore answers exactly whether the A* search can succeed. Cell state
/// is only read, never written.
pub fn is_path_possible(grid: &Grid, from: Point, to: Point) -> bool {
    let (Some(si), Some(gi)) = (grid.idx(from), grid.idx(to)) else {
        return false;
    };
    if grid.at_index(si).is_wall || grid.at_index(gi).is_wall {
        return false;
    }
    if si == gi {
        return true;
    }

    let mut seen = vec![false; grid.len()];
    let mut stack = vec![si];
    seen[si] = true;
    let mut nb = Neighbors::new();

    // Iterative DFS from `from`.
    while let Some(ci) = stack.pop() {
        let cp = grid.point(ci);
        for &np in nb.cardinal(grid, cp) {
            let ni = grid.index(np);
            if ni == gi {
                return true;
            }
            if !seen[ni] {
                seen[ni] = true;
                stack.push(ni);
            }
        }
    }
    false
}

/// Run [`is_path_possible`] between the grid's current markers.
///
/// Returns `false` while either marker is unset.
pub fn markers_connected(grid: &Grid) -> bool {
    match (grid.start(), grid.end()) {
        (Some(s), Some(e)) => is_path_possible(grid, s, e),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring_around(grid: &mut Grid, c: Point) {
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx != 0 || dy != 0 {
                    grid.set_wall(c.shift(dx, dy), true).unwrap();
                }
            }
        }
    }

    #[test]
    fn open_grid_is_connected() {
        let g = Grid::new(5);
        assert!(is_path_possible(&g, Point::new(0, 0), Point::new(4, 4)));
        assert!(is_path_possible(&g, Point::new(2, 2), Point::new(2, 2)));
    }

    #[test]
    fn ring_disconnects() {
        let mut g = Grid::new(5);
        ring_around(&mut g, Point::new(2, 2));
        assert!(!is_path_possible(&g, Point::new(0, 0), Point::new(2, 2)));
        assert!(!is_path_possible(&g, Point::new(2, 2), Point::new(4, 0)));
    }

    #[test]
    fn diagonal_gap_does_not_connect() {
        // . #
        // # .
        let mut g = Grid::new(2);
        g.set_wall(Point::new(1, 0), true).unwrap();
        g.set_wall(Point::new(0, 1), true).unwrap();
        assert!(!is_path_possible(&g, Point::new(0, 0), Point::new(1, 1)));
    }

    #[test]
    fn outside_or_wall_endpoints_are_unreachable() {
        let mut g = Grid::new(3);
        g.set_wall(Point::new(1, 1), true).unwrap();
        assert!(!is_path_possible(&g, Point::new(0, 0), Point::new(1, 1)));
        assert!(!is_path_possible(&g, Point::new(0, 0), Point::new(3, 0)));
    }

    #[test]
    fn leaves_cells_untouched() {
        let mut g = Grid::new(4);
        g.set_wall(Point::new(1, 0), true).unwrap();
        let before = g.cells().to_vec();
        assert!(is_path_possible(&g, Point::new(0, 0), Point::new(3, 3)));
        assert_eq!(g.cells(), &before[..]);
    }

    #[test]
    fn markers_must_be_set() {
        let mut g = Grid::new(3);
        assert!(!markers_connected(&g));
        g.set_start(Point::new(0, 0)).unwrap();
        assert!(!markers_connected(&g));
        g.set_end(Point::new(2, 2)).unwrap();
        assert!(markers_connected(&g));
    }
}
