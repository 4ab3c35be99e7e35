//! Command-line front end for the trophic simulation.
//!
//! The engine lives in `trophic_core`, the HTTP layer in `trophic_server`.
//! This crate wires them to a CLI and adds a headless runner.

pub mod cli;
pub mod headless;

pub use trophic_core as core;
pub use trophic_data as data;
