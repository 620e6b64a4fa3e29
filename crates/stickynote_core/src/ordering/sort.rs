//! Pinned-aware sorting and sortedness detection.

use crate::model::note::Note;
use crate::ordering::compare::{compare_titles, compare_updated_at};
use std::cmp::Ordering;

/// Sorts every note after the pinned one with `compare`.
///
/// Returns an empty vector for empty input. Descending order uses the
/// reversed comparator, so equal notes keep their relative order in both
/// directions.
pub fn sort_notes_by<F>(notes: &[Note], compare: F, ascending: bool) -> Vec<Note>
where
    F: Fn(&Note, &Note) -> Ordering,
{
    let Some((pinned, rest)) = notes.split_first() else {
        return Vec::new();
    };

    let mut sorted_rest = rest.to_vec();
    if ascending {
        sorted_rest.sort_by(|a, b| compare(a, b));
    } else {
        sorted_rest.sort_by(|a, b| compare(b, a));
    }

    let mut sorted = Vec::with_capacity(notes.len());
    sorted.push(pinned.clone());
    sorted.extend(sorted_rest);
    sorted
}

/// Sorts non-pinned notes by title (A→Z when `ascending`).
pub fn sort_notes_by_title(notes: &[Note], ascending: bool) -> Vec<Note> {
    sort_notes_by(notes, compare_titles, ascending)
}

/// Sorts non-pinned notes by last update (oldest first when `ascending`).
pub fn sort_notes_by_time(notes: &[Note], ascending: bool) -> Vec<Note> {
    sort_notes_by(notes, compare_updated_at, ascending)
}

/// Reports whether `notes` agrees with `compare` in the given direction.
///
/// Only the pairs `(i, i + 1)` for `i` in `1..len - 1` are checked: the
/// pinned element and the `(0, 1)` pair are skipped, so boards with two or
/// fewer notes are always sorted. Scanning stops at the first violation.
pub fn is_sorted_by<F>(notes: &[Note], compare: F, ascending: bool) -> bool
where
    F: Fn(&Note, &Note) -> Ordering,
{
    for i in 1..notes.len().saturating_sub(1) {
        let ordering = compare(&notes[i], &notes[i + 1]);
        let violated = if ascending {
            ordering == Ordering::Greater
        } else {
            ordering == Ordering::Less
        };
        if violated {
            return false;
        }
    }
    true
}
