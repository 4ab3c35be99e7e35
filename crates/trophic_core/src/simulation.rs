//! The simulation instance: owns the grid, the random source and, for the
//! parallel schedule, the worker pool.

use std::time::Instant;

use anyhow::Context;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rayon::ThreadPool;

use crate::config::{AppConfig, EngineConfig};
use crate::engine::{tick_parallel, tick_sequential, Schedule, TickReport};
use crate::error::{Result, SimError};
use crate::grid::{Coord, Grid};
use crate::metrics::Metrics;
use crate::rng::{seeded_rng, RandomSource};
use crate::rules::{newborn, CELL_COUNT, GRID_SIZE};
use trophic_data::{Census, EntityKind, GridSnapshot, StartRequest};

pub struct Simulation {
    grid: Grid,
    rng: ChaCha8Rng,
    schedule: Schedule,
    pool: Option<ThreadPool>,
    metrics: Metrics,
}

impl Simulation {
    /// Builds a simulation from configuration, spawning the worker pool when
    /// the parallel schedule is selected.
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let EngineConfig {
            seed,
            schedule,
            workers,
        } = config.engine;

        let pool = match schedule {
            Schedule::Sequential => None,
            Schedule::Parallel => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(workers)
                    .thread_name(|i| format!("trophic-worker-{i}"))
                    .build()
                    .context("building tick worker pool")?,
            ),
        };

        tracing::info!(?schedule, workers, ?seed, "Simulation created");
        Ok(Self {
            grid: Grid::new(),
            rng: seeded_rng(seed),
            schedule,
            pool,
            metrics: Metrics::new(config.log.summary_interval),
        })
    }

    /// Sequential, seeded simulation with default settings.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            grid: Grid::new(),
            rng: seeded_rng(Some(seed)),
            schedule: Schedule::Sequential,
            pool: None,
            metrics: Metrics::default(),
        }
    }

    /// Parallel, seeded simulation running on `pool`.
    #[must_use]
    pub fn with_pool(seed: u64, pool: ThreadPool) -> Self {
        Self {
            grid: Grid::new(),
            rng: seeded_rng(Some(seed)),
            schedule: Schedule::Parallel,
            pool: Some(pool),
            metrics: Metrics::default(),
        }
    }

    /// Reseeds the grid with the requested populations.
    ///
    /// Rejects requests larger than the grid without touching the current
    /// state. Otherwise every cell is cleared and plants, herbivores and
    /// carnivores are placed, in that order, on random free cells.
    pub fn start(&mut self, request: &StartRequest) -> Result<GridSnapshot> {
        let requested = request.total();
        if requested > CELL_COUNT as u64 {
            tracing::warn!(requested, capacity = CELL_COUNT, "Start request rejected");
            return Err(SimError::TooManyEntities {
                requested,
                capacity: CELL_COUNT,
            });
        }

        self.grid.reset();
        self.place(EntityKind::Plant, request.plants);
        self.place(EntityKind::Herbivore, request.herbivores);
        self.place(EntityKind::Carnivore, request.carnivores);

        let census = self.grid.census();
        self.metrics.reset(&census);
        tracing::info!(
            plants = census.plants,
            herbivores = census.herbivores,
            carnivores = census.carnivores,
            "Simulation started"
        );
        Ok(self.grid.snapshot())
    }

    /// Puts `count` newborns of `kind` on random empty cells, retrying on
    /// collisions. The caller guarantees there is room.
    fn place(&mut self, kind: EntityKind, count: u32) {
        for _ in 0..count {
            loop {
                let at = Coord::new(
                    self.rng.uniform_int(0, GRID_SIZE - 1),
                    self.rng.uniform_int(0, GRID_SIZE - 1),
                );
                if self.grid.get(at).is_empty() {
                    self.grid.set(at, newborn(kind));
                    break;
                }
            }
        }
    }

    /// Advances exactly one tick.
    pub fn step(&mut self) -> TickReport {
        let started = Instant::now();
        let tick_seed: u64 = self.rng.gen();
        let report = match (&self.pool, self.schedule) {
            (Some(pool), Schedule::Parallel) => tick_parallel(&mut self.grid, pool, tick_seed),
            _ => tick_sequential(&mut self.grid, tick_seed),
        };
        self.metrics
            .record_tick(started.elapsed(), &report, &self.grid.census());
        report
    }

    /// Advances one tick and returns the resulting grid.
    pub fn next_iteration(&mut self) -> GridSnapshot {
        self.step();
        self.grid.snapshot()
    }

    #[must_use]
    pub fn snapshot(&self) -> GridSnapshot {
        self.grid.snapshot()
    }

    #[must_use]
    pub fn census(&self) -> Census {
        self.grid.census()
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access for setting up scenarios.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[must_use]
    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Ticks since the last start.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.metrics.tick_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_places_exact_counts() {
        let mut sim = Simulation::with_seed(11);
        let snapshot = sim.start(&StartRequest::new(30, 20, 10)).unwrap();
        let census = snapshot.census();
        assert_eq!(census.plants, 30);
        assert_eq!(census.herbivores, 20);
        assert_eq!(census.carnivores, 10);
        assert_eq!(census.empty, CELL_COUNT - 60);
    }

    #[test]
    fn test_start_initial_energies() {
        let mut sim = Simulation::with_seed(12);
        let snapshot = sim.start(&StartRequest::new(10, 10, 10)).unwrap();
        for cell in snapshot.cells() {
            assert_eq!(cell.age, 0);
            match cell.kind {
                EntityKind::Empty | EntityKind::Plant => assert_eq!(cell.energy, 0),
                EntityKind::Herbivore | EntityKind::Carnivore => assert_eq!(cell.energy, 100),
            }
        }
    }

    #[test]
    fn test_full_grid_start_terminates() {
        let mut sim = Simulation::with_seed(13);
        let snapshot = sim.start(&StartRequest::new(100, 100, 25)).unwrap();
        assert_eq!(snapshot.census().empty, 0);
    }

    #[test]
    fn test_oversized_start_leaves_grid_untouched() {
        let mut sim = Simulation::with_seed(14);
        sim.start(&StartRequest::new(5, 5, 5)).unwrap();
        let before = sim.snapshot();

        let err = sim.start(&StartRequest::new(200, 20, 6)).unwrap_err();
        assert_eq!(
            err,
            SimError::TooManyEntities {
                requested: 226,
                capacity: 225
            }
        );
        assert_eq!(sim.snapshot(), before);
    }

    #[test]
    fn test_step_counts_ticks() {
        let mut sim = Simulation::with_seed(15);
        sim.start(&StartRequest::new(10, 5, 2)).unwrap();
        sim.step();
        sim.step();
        assert_eq!(sim.tick_count(), 2);
        sim.start(&StartRequest::new(1, 0, 0)).unwrap();
        assert_eq!(sim.tick_count(), 0);
    }

    #[test]
    fn test_parallel_config_builds_pool() {
        let mut config = AppConfig::default();
        config.engine.schedule = Schedule::Parallel;
        config.engine.workers = 2;
        config.engine.seed = Some(3);
        let mut sim = Simulation::new(&config).unwrap();
        assert_eq!(sim.schedule(), Schedule::Parallel);
        sim.start(&StartRequest::new(40, 20, 5)).unwrap();
        let snapshot = sim.next_iteration();
        assert_eq!(snapshot.height(), GRID_SIZE);
    }
}
