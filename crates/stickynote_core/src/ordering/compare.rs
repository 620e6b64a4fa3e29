//! Note comparators.

use crate::model::note::Note;
use std::cmp::Ordering;

/// Orders by title, ignoring case first.
///
/// Titles that differ only in case put lowercase first (`"note"` before
/// `"Note"`), matching common locale collation. The tie-break keeps the
/// order total.
pub fn compare_titles(a: &Note, b: &Note) -> Ordering {
    let folded_a = a.title.chars().flat_map(char::to_lowercase);
    let folded_b = b.title.chars().flat_map(char::to_lowercase);
    folded_a
        .cmp(folded_b)
        .then_with(|| b.title.cmp(&a.title))
}

/// Orders by last update instant, oldest first.
pub fn compare_updated_at(a: &Note, b: &Note) -> Ordering {
    a.updated_at.cmp(&b.updated_at)
}

/// Field a board can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Time,
}

impl SortKey {
    /// Returns the ascending comparator for this key.
    pub fn comparator(self) -> fn(&Note, &Note) -> Ordering {
        match self {
            Self::Title => compare_titles,
            Self::Time => compare_updated_at,
        }
    }
}
