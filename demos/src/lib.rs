//! Text front end shared by the demo binaries.
//!
//! Plays the part of the renderer: draws the grid with its search state and
//! turns command-line input into grid coordinates and configurations.

use std::error::Error;
use std::fs;
use std::path::Path;

use maze_core::{Cell, Grid, GridConfig, Point};

/// Character used for a cell, given whether it lies on the current path.
pub fn glyph(cell: &Cell, on_path: bool) -> char {
    if cell.is_start {
        'S'
    } else if cell.is_end {
        'E'
    } else if cell.is_wall {
        '#'
    } else if on_path {
        '*'
    } else if cell.visited {
        'o'
    } else if cell.frontier {
        '+'
    } else {
        '.'
    }
}

/// Draw the grid, one text line per row, overlaying `path`.
pub fn render(grid: &Grid, path: &[Point]) -> String {
    let n = grid.size() as usize;
    let mut on_path = vec![false; grid.len()];
    for &p in path {
        if let Some(i) = grid.idx(p) {
            on_path[i] = true;
        }
    }
    let mut out = String::with_capacity(grid.len() + n);
    for (i, cell) in grid.cells().iter().enumerate() {
        out.push(glyph(cell, on_path[i]));
        if (i + 1) % n == 0 {
            out.push('\n');
        }
    }
    out
}

/// One-line description of a visited cell.
pub fn describe(cell: &Cell) -> String {
    format!("visit {} g={} h={} f={}", cell.pos, cell.g, cell.h, cell.f)
}

/// Parse `"row,col"` into a [`Point`].
pub fn parse_point(s: &str) -> Result<Point, String> {
    let (r, c) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got {s:?}"))?;
    let row = r.trim().parse::<i32>().map_err(|e| format!("bad row {r:?}: {e}"))?;
    let col = c.trim().parse::<i32>().map_err(|e| format!("bad column {c:?}: {e}"))?;
    Ok(Point::rc(row, col))
}

/// Check that a user-supplied coordinate lies on `grid`.
pub fn in_bounds(grid: &Grid, p: Point) -> Result<Point, String> {
    if grid.contains(p) {
        Ok(p)
    } else {
        let n = grid.size();
        Err(format!("{p} is outside the {n}x{n} grid"))
    }
}

/// Read and validate a JSON grid configuration.
pub fn load_config(path: &Path) -> Result<GridConfig, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let cfg: GridConfig = serde_json::from_str(&text)?;
    cfg.validate()?;
    log::info!("loaded {}x{} grid from {}", cfg.size, cfg.size, path.display());
    Ok(cfg)
}
