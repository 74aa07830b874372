//! A* pathfinding on maze grids.
//!
//! - **Costs and heuristics** ([`movement_cost`], [`estimate`]) for the
//!   8-connected cardinal/diagonal cost table
//! - **A\*** shortest-path search ([`find_path`]), also available as the
//!   resumable state machine [`AstarSearch`]
//! - **Connectivity pre-check** ([`is_path_possible`]), a cardinal flood fill
//! - **Execution driver** ([`Driver`]) for run-to-completion, step and
//!   paused execution
//!
//! Diagonal moves never cut a wall corner: both orthogonal cells flanking a
//! diagonal step must be free.

mod astar;
mod cc;
mod distance;
mod driver;
mod neighbors;

pub use astar::{AstarSearch, SearchError, Status, Step, find_path, find_path_with};
pub use cc::{is_path_possible, markers_connected};
pub use distance::{axis_sum, estimate, movement_cost, octile, path_cost, step_cost};
pub use driver::{Driver, RunOutcome};
pub use neighbors::{MOVES, Neighbors};
