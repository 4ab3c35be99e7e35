//! In-process runner without the HTTP layer.

use anyhow::Result;
use trophic_core::{AppConfig, Census, Simulation};
use trophic_data::{GridSnapshot, StartRequest};

/// Result of a headless run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub ticks: u64,
    pub census: Census,
    pub snapshot: GridSnapshot,
}

/// Starts a simulation with `request` and runs up to `ticks` ticks, stopping
/// early once nothing is alive.
pub fn run(config: &AppConfig, request: &StartRequest, ticks: u64) -> Result<RunSummary> {
    let mut sim = Simulation::new(config)?;
    sim.start(request)?;

    let mut ran = 0;
    while ran < ticks {
        let report = sim.step();
        ran += 1;
        let census = sim.census();
        tracing::info!(
            tick = ran,
            plants = census.plants,
            herbivores = census.herbivores,
            carnivores = census.carnivores,
            births = report.births,
            deaths = report.deaths,
            "Tick"
        );
        if census.living() == 0 {
            tracing::info!(tick = ran, "Grid is empty, stopping");
            break;
        }
    }

    let snapshot = sim.snapshot();
    tracing::debug!("Final grid after {} ticks:\n{}", ran, snapshot);
    Ok(RunSummary {
        ticks: ran,
        census: sim.census(),
        snapshot,
    })
}
