//! Core domain logic for StickyNote boards.
//! This crate is the single source of truth for ordering and layout rules.

pub mod db;
pub mod layout;
pub mod logging;
pub mod model;
pub mod ordering;
pub mod repo;
pub mod service;
pub mod settings;

pub use layout::grid::{compute_layout, grid_metrics, GridMetrics, Position};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::collection::{CollectionError, NoteCollection};
pub use model::note::{Note, NoteId, NoteValidationError, NOTE_BODY_MAX_CHARS};
pub use ordering::{
    compare_titles, compare_updated_at, is_sorted_by, sort_notes_by, sort_notes_by_time,
    sort_notes_by_title, SortKey, SortLabel,
};
pub use repo::preference_repo::{
    PreferenceKey, PreferenceRepository, RepoError, RepoResult, SqlitePreferenceRepository,
};
pub use service::board_service::{
    system_clock_ms, BoardResult, BoardService, BoardServiceError, Clock, LogNotifier, NoteUpdate,
    Notifier,
};
pub use settings::BoardSettings;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
