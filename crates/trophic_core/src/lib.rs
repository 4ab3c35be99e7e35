//! # Trophic Core
//!
//! The simulation engine for a plant / herbivore / carnivore ecosystem on a
//! fixed square grid.
//!
//! This crate contains:
//! - The grid state model with explicit per-tick processed markers
//! - Species rules (aging, death, eating, moving, reproducing)
//! - Neighbour search and the action resolver
//! - The tick engine, in a sequential and a parallel (per-cell locked) flavour
//! - Configuration, errors, metrics and structured logging
//!
//! ## Example
//!
//! ```
//! use trophic_core::simulation::Simulation;
//! use trophic_data::StartRequest;
//!
//! let mut sim = Simulation::with_seed(7);
//! let snapshot = sim.start(&StartRequest::new(5, 0, 0)).unwrap();
//! assert_eq!(snapshot.census().plants, 5);
//!
//! let next = sim.next_iteration();
//! assert_eq!(next.height(), 15);
//! ```

/// Configuration management for engine, server and logging
pub mod config;
/// Per-cell locking for parallel ticks
pub mod coordinator;
/// Tick scheduling (sequential and parallel)
pub mod engine;
/// Domain error types
pub mod error;
/// Grid storage and coordinate access
pub mod grid;
/// Tick metrics and logging setup
pub mod metrics;
/// Orthogonal neighbour search
pub mod neighbors;
/// Random decision sources
pub mod rng;
/// Fixed species rule constants
pub mod rules;
/// Simulation instance: start, tick, snapshot
pub mod simulation;
/// Per-cell lifecycle and action systems
pub mod systems;

pub use config::AppConfig;
pub use engine::{Schedule, TickReport};
pub use error::SimError;
pub use grid::{CellAccess, Coord, Grid};
pub use metrics::{init_logging, Metrics};
pub use rng::{CellDraws, RandomSource};
pub use simulation::Simulation;
pub use trophic_data::{Cell, Census, EntityKind, GridSnapshot, StartRequest};
