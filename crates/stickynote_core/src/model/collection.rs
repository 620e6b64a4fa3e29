//! Pinned-first note collection.
//!
//! # Responsibility
//! - Make the pinned compose slot explicit instead of an index convention.
//! - Provide drag-and-drop reordering over the non-pinned notes.
//!
//! # Invariants
//! - `pinned` is always flat index 0; `rest` holds indices `1..`.
//! - Reorders never move a note into or out of the pinned slot.

use crate::model::note::{Note, NoteId};
use crate::ordering::sort::{sort_notes_by_time, sort_notes_by_title};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from collection reorder operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// Flat index is past the end of the board.
    IndexOutOfRange { index: usize, len: usize },
}

impl Display for CollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "note index {index} out of range for board of {len}")
            }
        }
    }
}

impl Error for CollectionError {}

/// Ordered board of notes with an explicit pinned slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCollection {
    pinned: Note,
    rest: Vec<Note>,
}

impl NoteCollection {
    /// Builds a board from a pinned note and the notes after it.
    pub fn new(pinned: Note, rest: Vec<Note>) -> Self {
        Self { pinned, rest }
    }

    /// Builds a board from flat order. Returns `None` for an empty list.
    pub fn from_vec(mut notes: Vec<Note>) -> Option<Self> {
        if notes.is_empty() {
            return None;
        }
        let rest = notes.split_off(1);
        let pinned = notes.pop()?;
        Some(Self { pinned, rest })
    }

    /// Flattens back to `[pinned, ...rest]`.
    pub fn into_vec(self) -> Vec<Note> {
        let mut notes = Vec::with_capacity(self.rest.len() + 1);
        notes.push(self.pinned);
        notes.extend(self.rest);
        notes
    }

    pub fn to_vec(&self) -> Vec<Note> {
        self.clone().into_vec()
    }

    pub fn pinned(&self) -> &Note {
        &self.pinned
    }

    pub fn pinned_mut(&mut self) -> &mut Note {
        &mut self.pinned
    }

    pub fn rest(&self) -> &[Note] {
        &self.rest
    }

    /// Number of notes including the pinned one. Never zero.
    pub fn len(&self) -> usize {
        self.rest.len() + 1
    }

    /// Always `false`; present for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Note at a flat index.
    pub fn get(&self, index: usize) -> Option<&Note> {
        match index {
            0 => Some(&self.pinned),
            _ => self.rest.get(index - 1),
        }
    }

    /// Iterates notes in flat order.
    pub fn iter(&self) -> impl Iterator<Item = &Note> + '_ {
        std::iter::once(&self.pinned).chain(self.rest.iter())
    }

    /// Mutable access to a non-pinned or pinned note by id.
    pub fn find_mut(&mut self, id: NoteId) -> Option<&mut Note> {
        if self.pinned.id == id {
            return Some(&mut self.pinned);
        }
        self.rest.iter_mut().find(|note| note.id == id)
    }

    /// Pushes a fresh compose slot; the old pinned note becomes index 1.
    pub fn push_pinned(&mut self, pinned: Note) {
        let previous = std::mem::replace(&mut self.pinned, pinned);
        self.rest.insert(0, previous);
    }

    /// Removes a non-pinned note by id, returning it.
    pub fn remove(&mut self, id: NoteId) -> Option<Note> {
        let index = self.rest.iter().position(|note| note.id == id)?;
        Some(self.rest.remove(index))
    }

    /// Drops every note except the pinned one.
    pub fn clear_rest(&mut self) {
        self.rest.clear();
    }

    /// Moves the note at flat index `from` to flat index `to`.
    ///
    /// Returns `Ok(false)` without changes when `from == to` or either index
    /// targets the pinned slot.
    pub fn move_note(&mut self, from: usize, to: usize) -> Result<bool, CollectionError> {
        let len = self.len();
        for index in [from, to] {
            if index >= len {
                return Err(CollectionError::IndexOutOfRange { index, len });
            }
        }
        if from == to || from < 1 || to < 1 {
            return Ok(false);
        }

        let moved = self.rest.remove(from - 1);
        self.rest.insert(to - 1, moved);
        Ok(true)
    }

    /// New board with the rest sorted by title.
    pub fn sorted_by_title(&self, ascending: bool) -> Self {
        self.resorted(|notes| sort_notes_by_title(notes, ascending))
    }

    /// New board with the rest sorted by last update.
    pub fn sorted_by_time(&self, ascending: bool) -> Self {
        self.resorted(|notes| sort_notes_by_time(notes, ascending))
    }

    fn resorted(&self, sort: impl FnOnce(&[Note]) -> Vec<Note>) -> Self {
        let mut notes = Vec::with_capacity(self.len());
        notes.push(self.pinned.clone());
        notes.extend_from_slice(&self.rest);
        let rest = sort(&notes).split_off(1);
        Self {
            pinned: self.pinned.clone(),
            rest,
        }
    }
}
