//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `stickynote_core` linkage.
//! - Print a deterministic sample board and its grid layout.

use stickynote_core::{compute_layout, grid_metrics, sort_notes_by_title, Note};
use uuid::Uuid;

const SAMPLE_CONTAINER_WIDTH: f64 = 1540.0;
const SAMPLE_CELL_WIDTH: f64 = 400.0;

fn main() {
    println!("stickynote_core ping={}", stickynote_core::ping());
    println!("stickynote_core version={}", stickynote_core::core_version());

    let board: Vec<Note> = ["", "Delta", "Alpha", "Beta"]
        .into_iter()
        .enumerate()
        .map(|(idx, title)| Note::with_id(Uuid::nil(), title, "", 0, idx as i64))
        .collect();
    let sorted = sort_notes_by_title(&board, true);

    let metrics = grid_metrics(SAMPLE_CONTAINER_WIDTH, SAMPLE_CELL_WIDTH);
    println!(
        "sample columns={} gap={}",
        metrics.columns, metrics.gap
    );
    for (note, position) in sorted
        .iter()
        .zip(compute_layout(&sorted, SAMPLE_CONTAINER_WIDTH, SAMPLE_CELL_WIDTH))
    {
        println!(
            "sample title={:?} x={} y={}",
            note.title, position.x, position.y
        );
    }
}
