//! Board domain model.
//!
//! # Responsibility
//! - Define the note record and the pinned-first board collection.
//!
//! # Invariants
//! - A board always holds at least its pinned note.
//! - Position 0 is the pinned compose slot; sorting never moves it.

pub mod collection;
pub mod note;
