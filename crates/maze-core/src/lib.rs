//! **maze-core**: grid model for the A* maze solver.
//!
//! This crate provides the types shared by the search engine and any
//! renderer: coordinates, cells with their search bookkeeping, the grid
//! arena with start/end markers, and the configuration describing grid
//! size, movement costs, heuristic and wall layout.

pub mod cell;
pub mod config;
pub mod error;
pub mod geom;
pub mod grid;

pub use cell::{Cell, UNREACHABLE};
pub use config::{CostTable, DEFAULT_MAZE, DEFAULT_SIZE, GridConfig, Heuristic};
pub use error::GridError;
pub use geom::Point;
pub use grid::Grid;
