//! Core data structures for the trophic simulation.

pub mod cell;
pub mod census;
pub mod request;
pub mod snapshot;
