//! Repository layer for persisted board state.
//!
//! # Responsibility
//! - Define the key/value persistence contract used by the board service.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Values are JSON documents keyed by [`PreferenceKey`] names.
//! - Corrupt stored values surface as `RepoError::InvalidData`, never as
//!   silently reset state.

pub mod preference_repo;
