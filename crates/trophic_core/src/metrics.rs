//! Tick metrics for the simulation.
//!
//! Provides structured logging and counters for monitoring population
//! dynamics and tick cost.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::engine::TickReport;
use trophic_data::Census;

/// Running totals since the simulation was created.
pub struct Metrics {
    tick_count: AtomicU64,
    living: AtomicU64,
    births: AtomicU64,
    deaths: AtomicU64,
    meals: AtomicU64,
    moves: AtomicU64,
    last_tick_micros: AtomicU64,
    summary_interval: u64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Metrics {
    /// Creates a collector that logs a summary every `summary_interval` ticks.
    #[must_use]
    pub fn new(summary_interval: u64) -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            living: AtomicU64::new(0),
            births: AtomicU64::new(0),
            deaths: AtomicU64::new(0),
            meals: AtomicU64::new(0),
            moves: AtomicU64::new(0),
            last_tick_micros: AtomicU64::new(0),
            summary_interval: summary_interval.max(1),
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick with its duration.
    pub fn record_tick(&self, duration: Duration, report: &TickReport, census: &Census) {
        let tick = self.tick_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.living.store(census.living() as u64, Ordering::Relaxed);
        self.births.fetch_add(report.births as u64, Ordering::Relaxed);
        self.deaths.fetch_add(report.deaths as u64, Ordering::Relaxed);
        self.meals.fetch_add(report.meals as u64, Ordering::Relaxed);
        self.moves.fetch_add(report.moves as u64, Ordering::Relaxed);
        self.last_tick_micros
            .store(duration.as_micros() as u64, Ordering::Relaxed);

        tracing::debug!(
            tick,
            evaluated = report.evaluated,
            births = report.births,
            deaths = report.deaths,
            meals = report.meals,
            moves = report.moves,
            duration_us = duration.as_micros() as u64,
            "Tick complete"
        );

        if tick % self.summary_interval == 0 {
            tracing::info!(
                tick,
                plants = census.plants,
                herbivores = census.herbivores,
                carnivores = census.carnivores,
                total_births = self.births(),
                total_deaths = self.deaths(),
                elapsed_ms = self.elapsed().as_millis() as u64,
                "Population summary"
            );
        }
    }

    /// Forgets per-run totals after the grid is reseeded.
    pub fn reset(&self, census: &Census) {
        self.tick_count.store(0, Ordering::Relaxed);
        self.living.store(census.living() as u64, Ordering::Relaxed);
        self.births.store(0, Ordering::Relaxed);
        self.deaths.store(0, Ordering::Relaxed);
        self.meals.store(0, Ordering::Relaxed);
        self.moves.store(0, Ordering::Relaxed);
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn living(&self) -> u64 {
        self.living.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn births(&self) -> u64 {
        self.births.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn deaths(&self) -> u64 {
        self.deaths.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn last_tick_duration(&self) -> Duration {
        Duration::from_micros(self.last_tick_micros.load(Ordering::Relaxed))
    }

    /// Gets elapsed time since metrics creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins over `default_filter`. Calling this more than once is
/// harmless; later calls are ignored.
pub fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .ok();
}
