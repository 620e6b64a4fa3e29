//! Note ordering engine.
//!
//! # Responsibility
//! - Sort boards by title or by last update while keeping the pinned slot.
//! - Answer whether a board still satisfies a given ordering.
//! - Track which sort mode (if any) the board currently reflects.
//!
//! # Invariants
//! - Element 0 is never moved by a sort and never inspected by
//!   [`is_sorted_by`].
//! - All functions are pure: inputs are borrowed, outputs freshly allocated.

pub mod compare;
pub mod sort;
pub mod sort_label;

pub use compare::{compare_titles, compare_updated_at, SortKey};
pub use sort::{is_sorted_by, sort_notes_by, sort_notes_by_time, sort_notes_by_title};
pub use sort_label::SortLabel;
