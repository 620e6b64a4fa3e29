//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical sticky note record shared by every board view.
//! - Validate user-editable fields before they reach persistence.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `updated_at` changes only when title or body changes, and is stamped by
//!   the board service, never by ordering/layout code.
//! - `body` holds at most [`NOTE_BODY_MAX_CHARS`] characters.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Maximum body length, counted in Unicode scalar values.
pub const NOTE_BODY_MAX_CHARS: usize = 140;

/// Stable identifier for a note.
pub type NoteId = Uuid;

/// One sticky note.
///
/// Serialized with camelCase names so stored boards keep the
/// `id/title/body/colorIndex/updatedAt` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    /// Short label; may be blank for the compose slot.
    pub title: String,
    /// Free text, capped at [`NOTE_BODY_MAX_CHARS`].
    pub body: String,
    /// Index into the UI color palette.
    pub color_index: u8,
    /// Unix epoch milliseconds of the last title/body change.
    pub updated_at: i64,
}

/// Validation failures for note fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Body exceeds the character cap.
    BodyTooLong { chars: usize, max: usize },
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BodyTooLong { chars, max } => {
                write!(f, "note body has {chars} chars; at most {max} allowed")
            }
        }
    }
}

impl Error for NoteValidationError {}

impl Note {
    /// Creates a blank note with a generated id.
    pub fn blank(color_index: u8, updated_at: i64) -> Self {
        Self::with_id(Uuid::new_v4(), "", "", color_index, updated_at)
    }

    /// Creates a note with a caller-provided id.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(
        id: NoteId,
        title: impl Into<String>,
        body: impl Into<String>,
        color_index: u8,
        updated_at: i64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
            color_index,
            updated_at,
        }
    }

    /// Checks field constraints.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        let chars = self.body.chars().count();
        if chars > NOTE_BODY_MAX_CHARS {
            return Err(NoteValidationError::BodyTooLong {
                chars,
                max: NOTE_BODY_MAX_CHARS,
            });
        }
        Ok(())
    }

    /// Returns whether the title has any non-whitespace content.
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteValidationError, NOTE_BODY_MAX_CHARS};

    #[test]
    fn body_at_cap_is_valid() {
        let mut note = Note::blank(0, 0);
        note.body = "é".repeat(NOTE_BODY_MAX_CHARS);
        assert!(note.validate().is_ok());
    }

    #[test]
    fn body_over_cap_is_rejected() {
        let mut note = Note::blank(0, 0);
        note.body = "x".repeat(NOTE_BODY_MAX_CHARS + 1);
        assert_eq!(
            note.validate(),
            Err(NoteValidationError::BodyTooLong {
                chars: 141,
                max: 140
            })
        );
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let note = Note::blank(3, 1_700_000_000_000);
        let json = serde_json::to_value(&note).expect("serialize note");
        assert_eq!(json["colorIndex"], 3);
        assert_eq!(json["updatedAt"], 1_700_000_000_000_i64);
    }
}
