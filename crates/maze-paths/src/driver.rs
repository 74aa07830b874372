//! The [`Driver`]: owns a grid and runs searches on it.
//!
//! Three ways to run a search:
//!
//! 1. **Run to completion** with [`Driver::run`] / [`Driver::run_with`],
//!    optionally throttled for animation with [`Driver::run_throttled`].
//! 2. **Step mode**: [`Driver::begin`] then one [`Driver::step`] per external
//!    trigger.
//! 3. **Auto-advance**: after [`Driver::begin`], a UI timer calls
//!    [`Driver::tick`], which steps unless the driver is paused.
//!
//! At most one search is in flight. Starting another run, or changing walls
//! or markers, abandons it.

use std::time::Duration;

use maze_core::{Cell, Grid, GridConfig, GridError, Heuristic, Point};

use crate::astar::{AstarSearch, SearchError, Step};
use crate::cc::is_path_possible;

/// How the last finished run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// A path was found.
    Found { cost: i32, expanded: usize },
    /// Start and end are valid but not connected.
    NoPath { expanded: usize },
    /// The run could not start.
    Rejected(SearchError),
}

/// Owns a [`Grid`], the in-flight search and the last result.
pub struct Driver {
    config: GridConfig,
    grid: Grid,
    search: Option<AstarSearch>,
    paused: bool,
    path: Vec<Point>,
    cost: i32,
    outcome: Option<RunOutcome>,
}

impl Driver {
    /// Build a driver around a fresh grid made from `config`.
    pub fn new(config: GridConfig) -> Result<Self, GridError> {
        let grid = Grid::from_config(&config)?;
        Ok(Self {
            config,
            grid,
            search: None,
            paused: false,
            path: Vec::new(),
            cost: 0,
            outcome: None,
        })
    }

    /// The grid, for rendering.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The configuration the grid was built from.
    #[inline]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// The last path found, start to end inclusive. Empty if none.
    #[inline]
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Cost of the last path found, or 0.
    #[inline]
    pub fn cost(&self) -> i32 {
        self.cost
    }

    /// How the last finished run ended, if any run finished since the grid
    /// last changed.
    #[inline]
    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    /// The in-flight step-mode search, if any.
    #[inline]
    pub fn search(&self) -> Option<&AstarSearch> {
        self.search.as_ref()
    }

    /// Whether a step-mode search is in flight.
    #[inline]
    pub fn is_searching(&self) -> bool {
        self.search.is_some()
    }

    // -----------------------------------------------------------------------
    // Grid mutators
    // -----------------------------------------------------------------------

    /// See [`Grid::set_wall`].
    pub fn set_wall(&mut self, p: Point, wall: bool) -> Result<(), GridError> {
        self.grid.set_wall(p, wall)?;
        self.clear_results();
        Ok(())
    }

    /// See [`Grid::set_start`].
    pub fn set_start(&mut self, p: Point) -> Result<(), GridError> {
        self.grid.set_start(p)?;
        self.clear_results();
        Ok(())
    }

    /// See [`Grid::set_end`].
    pub fn set_end(&mut self, p: Point) -> Result<(), GridError> {
        self.grid.set_end(p)?;
        self.clear_results();
        Ok(())
    }

    /// Switch heuristic for the next run.
    pub fn set_heuristic(&mut self, heuristic: Heuristic) {
        self.grid.set_heuristic(heuristic);
        self.config.heuristic = heuristic;
        self.clear_results();
    }

    /// Clear markers, results and any in-flight search, and restore the
    /// configured wall layout.
    pub fn reset(&mut self) -> Result<(), GridError> {
        self.clear_results();
        self.grid.clear_start();
        self.grid.clear_end();
        self.grid.clear_walls();
        self.grid.apply_walls(&self.config.walls)?;
        log::debug!("grid reset to configured layout");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Run to completion
    // -----------------------------------------------------------------------

    /// Search start to end without a progress callback.
    pub fn run(&mut self) -> RunOutcome {
        self.run_with(|_| {})
    }

    /// Search start to end, calling `visit` with each expanded cell.
    ///
    /// Unconnected markers are rejected by a flood fill before any A* work,
    /// so `visit` is never called in that case.
    pub fn run_with(&mut self, visit: impl FnMut(&Cell)) -> RunOutcome {
        self.clear_results();

        let (start, end) = match (self.grid.start(), self.grid.end()) {
            (None, _) => return self.reject(SearchError::MissingStart),
            (_, None) => return self.reject(SearchError::MissingEnd),
            (Some(s), Some(e)) => (s, e),
        };

        if !is_path_possible(&self.grid, start, end) {
            log::debug!("{start} and {end} are not connected; skipping A*");
            let outcome = RunOutcome::NoPath { expanded: 0 };
            self.outcome = Some(outcome);
            return outcome;
        }

        let mut search = match AstarSearch::new(&mut self.grid) {
            Ok(s) => s,
            Err(e) => return self.reject(e),
        };
        search.run(&mut self.grid, visit);
        self.finish(&search)
    }

    /// Like [`run_with`](Self::run_with), sleeping `delay` after each
    /// expanded cell. Blocks the calling thread; an event-driven UI should
    /// use [`begin`](Self::begin) and [`tick`](Self::tick) instead.
    pub fn run_throttled(&mut self, delay: Duration, mut visit: impl FnMut(&Cell)) -> RunOutcome {
        self.run_with(|cell| {
            visit(cell);
            std::thread::sleep(delay);
        })
    }

    // -----------------------------------------------------------------------
    // Step mode
    // -----------------------------------------------------------------------

    /// Start a step-mode search. Any search already in flight is abandoned.
    /// The new search starts unpaused.
    pub fn begin(&mut self) -> Result<(), SearchError> {
        self.clear_results();
        match AstarSearch::new(&mut self.grid) {
            Ok(search) => {
                self.search = Some(search);
                self.paused = false;
                Ok(())
            }
            Err(e) => {
                self.reject(e);
                Err(e)
            }
        }
    }

    /// Advance the in-flight search by exactly one step, paused or not.
    ///
    /// Returns `None` when no search is in flight. When the step finishes
    /// the search, the path and cost are materialized and the search is
    /// dropped.
    pub fn step(&mut self) -> Option<Step> {
        let search = self.search.as_mut()?;
        let step = search.step(&mut self.grid);
        if search.is_finished() {
            if let Some(done) = self.search.take() {
                self.finish(&done);
            }
        }
        Some(step)
    }

    /// Step once unless paused. Meant to be called from a UI timer.
    pub fn tick(&mut self) -> Option<Step> {
        if self.paused {
            return None;
        }
        self.step()
    }

    /// Stop [`tick`](Self::tick) from advancing the search.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Let [`tick`](Self::tick) advance the search again.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Flip between paused and running; returns the new paused state.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Whether auto-advance is paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Abandon the in-flight search. Cell fields keep whatever the search
    /// wrote until the next run resets them.
    pub fn cancel(&mut self) {
        if let Some(search) = self.search.take() {
            log::debug!("search abandoned after {} expansions", search.expanded());
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn clear_results(&mut self) {
        self.cancel();
        self.grid.reset_search();
        self.path.clear();
        self.cost = 0;
        self.outcome = None;
    }

    fn reject(&mut self, e: SearchError) -> RunOutcome {
        log::warn!("search rejected: {e}");
        let outcome = RunOutcome::Rejected(e);
        self.outcome = Some(outcome);
        outcome
    }

    fn finish(&mut self, search: &AstarSearch) -> RunOutcome {
        self.path = search.path(&self.grid);
        self.cost = search.cost(&self.grid);
        let expanded = search.expanded();
        let outcome = if self.path.is_empty() {
            RunOutcome::NoPath { expanded }
        } else {
            RunOutcome::Found {
                cost: self.cost,
                expanded,
            }
        };
        log::debug!("run finished: {outcome:?}");
        self.outcome = Some(outcome);
        outcome
    }
}
