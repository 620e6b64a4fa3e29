//! Board layout preferences.
//!
//! # Responsibility
//! - Hold the user-tunable size factor and grid cell width.
//! - Normalize incoming values to the ranges the UI sliders expose.
//!
//! # Invariants
//! - Stored settings are always inside their range and on their step.

use serde::{Deserialize, Serialize};

pub const SIZE_FACTOR_MIN: u32 = 6;
pub const SIZE_FACTOR_MAX: u32 = 25;
pub const SIZE_FACTOR_STEP: u32 = 1;
pub const SIZE_FACTOR_DEFAULT: u32 = 10;

pub const CELL_WIDTH_MIN: u32 = 80;
pub const CELL_WIDTH_MAX: u32 = 600;
pub const CELL_WIDTH_STEP: u32 = 10;
pub const CELL_WIDTH_DEFAULT: u32 = 200;

/// Layout preferences persisted alongside the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSettings {
    /// Note scale in tenths (10 = 100%).
    pub size_factor: u32,
    /// Grid cell edge length in pixels.
    pub cell_width: u32,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            size_factor: SIZE_FACTOR_DEFAULT,
            cell_width: CELL_WIDTH_DEFAULT,
        }
    }
}

impl BoardSettings {
    /// Note scale as a multiplier.
    pub fn scale(&self) -> f64 {
        f64::from(self.size_factor) / 10.0
    }
}

/// Clamps and snaps a size factor.
pub fn normalize_size_factor(value: u32) -> u32 {
    snap(value, SIZE_FACTOR_MIN, SIZE_FACTOR_MAX, SIZE_FACTOR_STEP)
}

/// Clamps and snaps a cell width.
pub fn normalize_cell_width(value: u32) -> u32 {
    snap(value, CELL_WIDTH_MIN, CELL_WIDTH_MAX, CELL_WIDTH_STEP)
}

fn snap(value: u32, min: u32, max: u32, step: u32) -> u32 {
    let clamped = value.clamp(min, max);
    let offset = clamped - min;
    let rounded = (offset + step / 2) / step * step;
    (min + rounded).min(max)
}
