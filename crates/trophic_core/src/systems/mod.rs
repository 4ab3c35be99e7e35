//! Per-cell rule systems, written against [`crate::grid::CellAccess`].

pub mod action;
pub mod lifecycle;

pub use action::{apply_action, Action};
pub use lifecycle::{evaluate_cell, Outcome};
