//! Grid layout engine.
//!
//! # Responsibility
//! - Map the linear board order to square grid cells on screen.
//!
//! # Invariants
//! - Output has exactly one position per input note, in input order.
//! - At least one column is always used, whatever the inputs.
//! - Layout is recomputed from scratch on every call.

pub mod grid;

pub use grid::{compute_layout, grid_metrics, GridMetrics, Position};
