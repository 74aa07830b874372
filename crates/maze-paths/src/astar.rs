//! A* search over a [`Grid`], as a resumable state machine.
//!
//! [`AstarSearch`] holds the open and closed sets between calls, so a caller
//! can advance it one expansion at a time with [`AstarSearch::step`], pause
//! for as long as it likes, and resume. [`find_path`] simply steps it to
//! completion.

use std::collections::BinaryHeap;
use std::fmt;

use maze_core::{Cell, Grid, Point};

use crate::distance::{estimate, step_cost};
use crate::neighbors::Neighbors;

/// Reference into the grid, ordered for use in `BinaryHeap`.
///
/// Lowest `f` pops first; ties go to the lower `h`, then to the entry pushed
/// first.
#[derive(Clone, Copy, Eq, PartialEq)]
struct NodeRef {
    idx: usize,
    f: i32,
    h: i32,
    seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest first.
        other
            .f
            .cmp(&self.f)
            .then(other.h.cmp(&self.h))
            .then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// A search that cannot start because a marker is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    MissingStart,
    MissingEnd,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStart => f.write_str("no start cell is set"),
            Self::MissingEnd => f.write_str("no end cell is set"),
        }
    }
}

impl std::error::Error for SearchError {}

/// Progress of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    /// The end cell was popped from the open set.
    Found,
    /// The open set ran dry without reaching the end cell.
    Exhausted,
}

/// Outcome of one call to [`AstarSearch::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A cell was popped and expanded; carries its state after being marked
    /// visited.
    Visited(Cell),
    /// Nothing left to do. Carries [`Status::Found`] or [`Status::Exhausted`].
    Done(Status),
}

/// An in-flight A* search.
///
/// The search borrows nothing: every call takes the grid it was created on.
/// Stepping it with another grid, or after the grid's walls or markers
/// changed, is a logic error.
pub struct AstarSearch {
    start: usize,
    goal: usize,
    goal_pos: Point,
    open: BinaryHeap<NodeRef>,
    closed: Vec<bool>,
    seq: u64,
    status: Status,
    expanded: usize,
    nbuf: Neighbors,
}

impl AstarSearch {
    /// Reset the grid's search fields and seed the open set with the start.
    pub fn new(grid: &mut Grid) -> Result<Self, SearchError> {
        let from = grid.start().ok_or(SearchError::MissingStart)?;
        let to = grid.end().ok_or(SearchError::MissingEnd)?;

        grid.reset_search();

        let start = grid.index(from);
        let h = estimate(grid.heuristic(), &grid.costs(), from, to);
        {
            let node = grid.at_index_mut(start);
            node.g = 0;
            node.h = h;
            node.f = h;
            node.frontier = true;
        }

        let mut open = BinaryHeap::new();
        open.push(NodeRef {
            idx: start,
            f: h,
            h,
            seq: 0,
        });

        log::debug!("A* search from {from} to {to}");

        Ok(Self {
            start,
            goal: grid.index(to),
            goal_pos: to,
            open,
            closed: vec![false; grid.len()],
            seq: 0,
            status: Status::Running,
            expanded: 0,
            nbuf: Neighbors::new(),
        })
    }

    /// Current progress.
    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Whether the search has found the end or exhausted the open set.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.status != Status::Running
    }

    /// Number of cells popped and expanded so far.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Number of entries in the open set, stale ones included.
    #[inline]
    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    /// Advance by one expansion.
    pub fn step(&mut self, grid: &mut Grid) -> Step {
        debug_assert_eq!(grid.len(), self.closed.len());
        if self.status != Status::Running {
            return Step::Done(self.status);
        }

        // Pop until a cell that is not already closed; anything else is a
        // stale duplicate superseded by a cheaper entry.
        let ci = loop {
            let Some(entry) = self.open.pop() else {
                self.status = Status::Exhausted;
                log::debug!("A* exhausted after {} expansions", self.expanded);
                return Step::Done(Status::Exhausted);
            };
            if !self.closed[entry.idx] {
                break entry.idx;
            }
        };

        grid.at_index_mut(ci).visited = true;
        self.expanded += 1;
        let current = *grid.at_index(ci);
        log::trace!("expand {} g={} f={}", current.pos, current.g, current.f);

        if ci == self.goal {
            self.status = Status::Found;
            log::debug!(
                "A* reached {} with cost {} after {} expansions",
                self.goal_pos,
                current.g,
                self.expanded
            );
            return Step::Visited(current);
        }

        self.closed[ci] = true;

        let costs = grid.costs();
        let heuristic = grid.heuristic();
        let mut nbuf = std::mem::take(&mut self.nbuf);

        for &np in nbuf.moves(grid, current.pos) {
            let ni = grid.index(np);
            if self.closed[ni] {
                continue;
            }
            let tentative_g = current.g + step_cost(&costs, current.pos, np);

            let n = grid.at_index_mut(ni);
            if tentative_g >= n.g {
                continue;
            }
            n.parent = Some(ci);
            n.g = tentative_g;
            n.h = estimate(heuristic, &costs, np, self.goal_pos);
            n.f = n.g + n.h;
            n.frontier = true;

            // Duplicates are allowed; the older entry is skipped once this
            // cell is closed.
            self.seq += 1;
            self.open.push(NodeRef {
                idx: ni,
                f: n.f,
                h: n.h,
                seq: self.seq,
            });
        }

        self.nbuf = nbuf;
        Step::Visited(current)
    }

    /// Step until finished, handing every expanded cell to `visit`.
    pub fn run(&mut self, grid: &mut Grid, mut visit: impl FnMut(&Cell)) -> Status {
        loop {
            match self.step(grid) {
                Step::Visited(cell) => visit(&cell),
                Step::Done(status) => return status,
            }
        }
    }

    /// The path from start to end (both inclusive), or empty unless found.
    pub fn path(&self, grid: &Grid) -> Vec<Point> {
        if self.status != Status::Found {
            return Vec::new();
        }
        let mut path = Vec::new();
        let mut ci = Some(self.goal);
        while let Some(i) = ci {
            path.push(grid.point(i));
            debug_assert!(path.len() <= grid.len(), "parent chain has a cycle");
            ci = grid.at_index(i).parent;
        }
        debug_assert_eq!(path.last().copied(), Some(grid.point(self.start)));
        path.reverse();
        path
    }

    /// Cost of the path found (`g` of the end cell), or 0 unless found.
    pub fn cost(&self, grid: &Grid) -> i32 {
        match self.status {
            Status::Found => grid.at_index(self.goal).g,
            _ => 0,
        }
    }
}

/// Shortest path between the grid's start and end markers.
///
/// Returns an empty path if a marker is unset or no path exists.
pub fn find_path(grid: &mut Grid) -> Vec<Point> {
    find_path_with(grid, |_| {})
}

/// Like [`find_path`], calling `visit` with each cell as it is expanded.
pub fn find_path_with(grid: &mut Grid, visit: impl FnMut(&Cell)) -> Vec<Point> {
    let mut search = match AstarSearch::new(grid) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("A* rejected: {e}");
            return Vec::new();
        }
    };
    search.run(grid, visit);
    search.path(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cc::is_path_possible;
    use crate::distance::path_cost;
    use maze_core::{GridConfig, Heuristic, UNREACHABLE};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::BinaryHeap;

    fn grid_with(size: i32, walls: &[Point], start: Point, end: Point) -> Grid {
        let mut g = Grid::new(size);
        for &w in walls {
            g.set_wall(w, true).unwrap();
        }
        g.set_start(start).unwrap();
        g.set_end(end).unwrap();
        g
    }

    /// Exhaustive Dijkstra under the same movement rules.
    fn brute_force_cost(grid: &Grid, from: Point, to: Point) -> Option<i32> {
        let mut dist = vec![UNREACHABLE; grid.len()];
        let mut open = BinaryHeap::new();
        let costs = grid.costs();
        let mut nb = Neighbors::new();
        dist[grid.index(from)] = 0;
        open.push(std::cmp::Reverse((0, grid.index(from))));
        while let Some(std::cmp::Reverse((d, ci))) = open.pop() {
            if d > dist[ci] {
                continue;
            }
            let cp = grid.point(ci);
            for &np in nb.moves(grid, cp) {
                let ni = grid.index(np);
                let nd = d + step_cost(&costs, cp, np);
                if nd < dist[ni] {
                    dist[ni] = nd;
                    open.push(std::cmp::Reverse((nd, ni)));
                }
            }
        }
        let d = dist[grid.index(to)];
        (d != UNREACHABLE).then_some(d)
    }

    fn assert_valid_path(grid: &Grid, path: &[Point]) {
        assert_eq!(path.first().copied(), grid.start());
        assert_eq!(path.last().copied(), grid.end());
        for w in path.windows(2) {
            let d = w[1] - w[0];
            assert!(d.x.abs() <= 1 && d.y.abs() <= 1 && d != Point::ZERO);
            assert!(!grid.is_wall(w[1]));
            if d.x != 0 && d.y != 0 {
                assert!(!grid.is_wall(w[0].shift(d.x, 0)), "corner cut at {}", w[0]);
                assert!(!grid.is_wall(w[0].shift(0, d.y)), "corner cut at {}", w[0]);
            }
        }
    }

    fn cost_of(grid: &Grid) -> i32 {
        grid.cell(grid.end().unwrap()).g
    }

    #[test]
    fn open_grid_diagonal() {
        let mut g = grid_with(5, &[], Point::rc(0, 0), Point::rc(4, 4));
        let path = find_path(&mut g);
        assert_eq!(path.len(), 5);
        assert_eq!(cost_of(&g), 56);
        assert!(path.iter().enumerate().all(|(i, p)| *p == Point::rc(i as i32, i as i32)));
    }

    #[test]
    fn wall_column_forces_detour() {
        let walls: Vec<Point> = (0..4).map(|r| Point::rc(r, 2)).collect();
        let mut g = grid_with(5, &walls, Point::rc(0, 0), Point::rc(0, 4));
        let path = find_path(&mut g);
        // (0,0)->(4,1): 14 + 3*10, then two cardinal steps through the gap
        // (diagonals there would clip the column), then (4,3)->(0,4): 14 + 3*10.
        assert_eq!(cost_of(&g), 44 + 10 + 10 + 44);
        assert_eq!(path.len(), 11);
        assert!(path.contains(&Point::rc(4, 2)));
        assert_valid_path(&g, &path);
        assert_eq!(path_cost(&g.costs(), &path), 108);
    }

    #[test]
    fn enclosed_end_has_no_path() {
        let end = Point::rc(2, 2);
        let walls: Vec<Point> = (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| end.shift(dx, dy)))
            .filter(|&p| p != end)
            .collect();
        let mut g = grid_with(5, &walls, Point::rc(0, 0), end);
        assert!(!is_path_possible(&g, Point::rc(0, 0), end));
        assert!(find_path(&mut g).is_empty());
        assert_eq!(cost_of(&g), UNREACHABLE);
    }

    #[test]
    fn start_equals_end() {
        let p = Point::rc(1, 3);
        let mut g = grid_with(4, &[], p, p);
        let mut visited = Vec::new();
        let path = find_path_with(&mut g, |c| visited.push(c.pos));
        assert_eq!(path, vec![p]);
        assert_eq!(cost_of(&g), 0);
        assert_eq!(visited, vec![p]);
    }

    #[test]
    fn missing_markers_are_rejected() {
        let mut g = Grid::new(3);
        assert_eq!(AstarSearch::new(&mut g).err(), Some(SearchError::MissingStart));
        g.set_start(Point::ZERO).unwrap();
        assert_eq!(AstarSearch::new(&mut g).err(), Some(SearchError::MissingEnd));
        assert!(find_path(&mut g).is_empty());
    }

    #[test]
    fn never_cuts_corners() {
        // S #
        // # E
        let walls = [Point::rc(0, 1), Point::rc(1, 0)];
        let mut g = grid_with(2, &walls, Point::rc(0, 0), Point::rc(1, 1));
        assert!(find_path(&mut g).is_empty());

        // S # .
        // . . .
        // . . E
        let mut g = grid_with(3, &[Point::rc(0, 1)], Point::rc(0, 0), Point::rc(2, 2));
        let path = find_path(&mut g);
        assert_valid_path(&g, &path);
        assert_eq!(path[1], Point::rc(1, 0));
        assert_eq!(cost_of(&g), 10 + 14 + 10);
    }

    #[test]
    fn callback_sees_visited_cells() {
        let mut g = grid_with(5, &[], Point::rc(0, 0), Point::rc(4, 4));
        let mut seen: Vec<Cell> = Vec::new();
        find_path_with(&mut g, |c| seen.push(*c));
        assert_eq!(seen.first().map(|c| c.pos), Some(Point::rc(0, 0)));
        assert_eq!(seen.last().map(|c| c.pos), Some(Point::rc(4, 4)));
        for c in &seen {
            assert!(c.visited && c.frontier);
            assert_eq!(c.f, c.g + c.h);
            assert_eq!(*g.cell(c.pos), *c);
        }
    }

    #[test]
    fn f_is_g_plus_h_for_reached_cells() {
        let cfg = GridConfig::default();
        let mut g = Grid::from_config(&cfg).unwrap();
        g.set_start(Point::rc(0, 0)).unwrap();
        g.set_end(Point::rc(20, 20)).unwrap();
        let path = find_path(&mut g);
        assert!(!path.is_empty());
        for c in g.cells().iter().filter(|c| c.is_reached()) {
            assert!(c.g >= 0);
            assert_eq!(c.f, c.g + c.h);
        }
        assert_eq!(g.cell(Point::rc(0, 0)).g, 0);
    }

    #[test]
    fn default_maze_is_solved_optimally() {
        let mut g = Grid::from_config(&GridConfig::default()).unwrap();
        let (s, e) = (Point::rc(0, 0), Point::rc(20, 20));
        g.set_start(s).unwrap();
        g.set_end(e).unwrap();
        let path = find_path(&mut g);
        assert_valid_path(&g, &path);
        assert_eq!(Some(cost_of(&g)), brute_force_cost(&g, s, e));
        assert_eq!(path_cost(&g.costs(), &path), cost_of(&g));
    }

    #[test]
    fn rerun_is_identical() {
        let mut g = Grid::from_config(&GridConfig::default()).unwrap();
        g.set_start(Point::rc(0, 0)).unwrap();
        g.set_end(Point::rc(17, 20)).unwrap();
        let first = find_path(&mut g);
        let first_cost = cost_of(&g);
        let first_cells = g.cells().to_vec();
        g.reset_search();
        let second = find_path(&mut g);
        assert_eq!(first, second);
        assert_eq!(first_cost, cost_of(&g));
        assert_eq!(first_cells, g.cells());
    }

    #[test]
    fn stepping_matches_run_to_completion() {
        let mut g = Grid::from_config(&GridConfig::default()).unwrap();
        g.set_start(Point::rc(0, 0)).unwrap();
        g.set_end(Point::rc(20, 20)).unwrap();
        let expected = find_path(&mut g);
        let expected_cost = cost_of(&g);

        let mut search = AstarSearch::new(&mut g).unwrap();
        assert_eq!(search.open_len(), 1);
        let mut steps = 0;
        while let Step::Visited(_) = search.step(&mut g) {
            steps += 1;
        }
        assert_eq!(search.status(), Status::Found);
        assert_eq!(search.expanded(), steps);
        assert_eq!(search.path(&g), expected);
        assert_eq!(search.cost(&g), expected_cost);
        // Further steps are no-ops.
        assert_eq!(search.step(&mut g), Step::Done(Status::Found));
    }

    #[test]
    fn exhausted_search_reports_done() {
        let walls = [Point::rc(0, 1), Point::rc(1, 0), Point::rc(1, 1)];
        let mut g = grid_with(3, &walls, Point::rc(0, 0), Point::rc(2, 2));
        let mut search = AstarSearch::new(&mut g).unwrap();
        assert!(matches!(search.step(&mut g), Step::Visited(_)));
        assert_eq!(search.step(&mut g), Step::Done(Status::Exhausted));
        assert!(search.is_finished());
        assert!(search.path(&g).is_empty());
        assert_eq!(search.cost(&g), 0);
    }

    #[test]
    fn axis_sum_still_finds_valid_paths() {
        let cfg = GridConfig::default().with_heuristic(Heuristic::AxisSum);
        let mut g = Grid::from_config(&cfg).unwrap();
        let (s, e) = (Point::rc(0, 0), Point::rc(20, 20));
        g.set_start(s).unwrap();
        g.set_end(e).unwrap();
        let path = find_path(&mut g);
        assert_valid_path(&g, &path);
        assert_eq!(path_cost(&g.costs(), &path), cost_of(&g));
        assert!(cost_of(&g) >= brute_force_cost(&g, s, e).unwrap());
    }

    #[test]
    fn random_grids_match_exhaustive_search() {
        for seed in 0..60u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let size = rng.random_range(4..12);
            let mut g = Grid::new(size);
            for y in 0..size {
                for x in 0..size {
                    if rng.random_bool(0.3) {
                        g.set_wall(Point::new(x, y), true).unwrap();
                    }
                }
            }
            let free: Vec<Point> = g.cells().iter().filter(|c| !c.is_wall).map(|c| c.pos).collect();
            if free.is_empty() {
                continue;
            }
            let s = free[rng.random_range(0..free.len())];
            let e = free[rng.random_range(0..free.len())];
            g.set_start(s).unwrap();
            g.set_end(e).unwrap();

            let path = find_path(&mut g);
            let expected = brute_force_cost(&g, s, e);
            assert_eq!(is_path_possible(&g, s, e), expected.is_some(), "seed {seed}");
            match expected {
                Some(cost) => {
                    assert_valid_path(&g, &path);
                    assert_eq!(cost_of(&g), cost, "seed {seed}");
                    assert_eq!(path_cost(&g.costs(), &path), cost, "seed {seed}");
                }
                None => assert!(path.is_empty(), "seed {seed}"),
            }
        }
    }
}
