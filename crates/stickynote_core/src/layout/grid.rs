//! Space-between column packing.

use serde::{Deserialize, Serialize};

/// Top-left corner of one note cell, in container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Column count and horizontal gap derived from container and cell width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    pub columns: usize,
    pub gap: f64,
}

/// Packs as many `cell_width` columns as fit into `container_width` and
/// spreads the leftover width evenly between them.
///
/// Degenerate widths (zero, negative, NaN, infinite ratio) fall back to a
/// single column with no gap.
pub fn grid_metrics(container_width: f64, cell_width: f64) -> GridMetrics {
    let fitted = (container_width / cell_width).floor();
    let columns = if fitted.is_finite() && fitted >= 1.0 {
        fitted as usize
    } else {
        1
    };

    let gap = if columns > 1 {
        (container_width - cell_width * columns as f64) / (columns - 1) as f64
    } else {
        0.0
    };

    GridMetrics { columns, gap }
}

/// Computes one grid position per item.
///
/// Rows are `cell_width` tall with no vertical gap.
pub fn compute_layout<T>(items: &[T], container_width: f64, cell_width: f64) -> Vec<Position> {
    let GridMetrics { columns, gap } = grid_metrics(container_width, cell_width);

    (0..items.len())
        .map(|index| {
            let column = index % columns;
            let row = index / columns;
            Position {
                x: column as f64 * (cell_width + gap),
                y: row as f64 * cell_width,
            }
        })
        .collect()
}
