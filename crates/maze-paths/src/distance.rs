//! Step costs and remaining-cost estimates.

use maze_core::{CostTable, Heuristic, Point};

/// Cost of a single step with offset `(dx, dy)`.
///
/// # Panics
///
/// Panics unless the offset is one of the eight unit moves.
#[inline]
pub fn movement_cost(costs: &CostTable, dx: i32, dy: i32) -> i32 {
    match (dx.abs(), dy.abs()) {
        (1, 0) | (0, 1) => costs.cardinal,
        (1, 1) => costs.diagonal,
        _ => panic!("({dx}, {dy}) is not a unit move"),
    }
}

/// Cost of stepping from `from` to the adjacent `to`.
#[inline]
pub fn step_cost(costs: &CostTable, from: Point, to: Point) -> i32 {
    let d = to - from;
    movement_cost(costs, d.x, d.y)
}

/// Octile distance scaled to `costs`.
#[inline]
pub fn octile(costs: &CostTable, a: Point, b: Point) -> i32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    costs.cardinal * dx.max(dy) + (costs.diagonal - costs.cardinal) * dx.min(dy)
}

/// Sum-of-axes estimate, `cardinal * (dx + dy) + (diagonal - cardinal) * min(dx, dy)`.
#[inline]
pub fn axis_sum(costs: &CostTable, a: Point, b: Point) -> i32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    costs.cardinal * (dx + dy) + (costs.diagonal - costs.cardinal) * dx.min(dy)
}

/// Estimate the remaining cost from `a` to `b` with the chosen heuristic.
#[inline]
pub fn estimate(heuristic: Heuristic, costs: &CostTable, a: Point, b: Point) -> i32 {
    match heuristic {
        Heuristic::Octile => octile(costs, a, b),
        Heuristic::AxisSum => axis_sum(costs, a, b),
    }
}

/// Cost of a path given as consecutive adjacent points.
pub fn path_cost(costs: &CostTable, path: &[Point]) -> i32 {
    path.windows(2).map(|w| step_cost(costs, w[0], w[1])).sum()
}
