//! Tick engine: drives every cell through one simulation step.

use rayon::prelude::*;
use rayon::ThreadPool;
use serde::{Deserialize, Serialize};

use crate::coordinator::LockedGrid;
use crate::grid::{Coord, Grid};
use crate::rng::CellDraws;
use crate::rules::CELL_COUNT;
use crate::systems::{evaluate_cell, Action, Outcome};

/// How cells are scheduled within a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schedule {
    /// Single-threaded row-major scan.
    #[default]
    Sequential,
    /// Cells spread over a worker pool, each evaluated under its
    /// neighbourhood locks.
    Parallel,
}

/// Tally of what happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickReport {
    pub evaluated: usize,
    pub deaths: usize,
    pub births: usize,
    pub meals: usize,
    pub moves: usize,
    pub idle: usize,
}

impl TickReport {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Skipped => return,
            Outcome::Died(_) => self.deaths += 1,
            Outcome::Idle => self.idle += 1,
            Outcome::Acted(Action::Eat) => self.meals += 1,
            Outcome::Acted(Action::Move) => self.moves += 1,
            Outcome::Acted(Action::Reproduce) => self.births += 1,
        }
        self.evaluated += 1;
    }

    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.evaluated += other.evaluated;
        self.deaths += other.deaths;
        self.births += other.births;
        self.meals += other.meals;
        self.moves += other.moves;
        self.idle += other.idle;
        self
    }
}

/// One tick as a single-threaded row-major scan.
pub fn tick_sequential(grid: &mut Grid, tick_seed: u64) -> TickReport {
    grid.clear_processed();
    let mut report = TickReport::default();
    for index in 0..CELL_COUNT {
        let mut draws = CellDraws::for_cell(tick_seed, index);
        report.record(evaluate_cell(grid, &mut draws, Coord::from_index(index)));
    }
    report
}

/// One tick with cells distributed over `pool`.
///
/// Returns only after every cell has been evaluated and every lock released,
/// so the caller always observes a quiescent grid.
pub fn tick_parallel(grid: &mut Grid, pool: &ThreadPool, tick_seed: u64) -> TickReport {
    grid.clear_processed();
    let locked = LockedGrid::new(std::mem::take(grid));

    let report = pool.install(|| {
        (0..CELL_COUNT)
            .into_par_iter()
            .map(|index| {
                // Drawn before locking: no randomness inside a critical section.
                let mut draws = CellDraws::for_cell(tick_seed, index);
                let origin = Coord::from_index(index);
                let mut hood = locked.lock_neighborhood(origin);
                evaluate_cell(&mut hood, &mut draws, origin)
            })
            .fold(TickReport::default, |mut report, outcome| {
                report.record(outcome);
                report
            })
            .reduce(TickReport::default, TickReport::merge)
    });

    *grid = locked.into_grid();
    report
}
