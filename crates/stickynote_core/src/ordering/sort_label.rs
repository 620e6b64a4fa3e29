//! Sort mode label.
//!
//! # Invariants
//! - A label other than `None` is only kept while the board satisfies its
//!   ordering; any out-of-band reorder that breaks it clears the label.
//! - Stored spellings (`alphAsc`, `alphDes`, `timeAsc`, `timeDes`, empty)
//!   are stable across releases.

use crate::model::note::Note;
use crate::ordering::compare::SortKey;
use crate::ordering::sort::is_sorted_by;
use serde::{Deserialize, Serialize};

/// Sort mode most recently applied to the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortLabel {
    #[default]
    #[serde(rename = "")]
    None,
    #[serde(rename = "alphAsc")]
    TitleAsc,
    #[serde(rename = "alphDes")]
    TitleDesc,
    #[serde(rename = "timeAsc")]
    TimeAsc,
    #[serde(rename = "timeDes")]
    TimeDesc,
}

impl SortLabel {
    /// Label recorded after an explicit sort action.
    pub fn for_sort(key: SortKey, ascending: bool) -> Self {
        match (key, ascending) {
            (SortKey::Title, true) => Self::TitleAsc,
            (SortKey::Title, false) => Self::TitleDesc,
            (SortKey::Time, true) => Self::TimeAsc,
            (SortKey::Time, false) => Self::TimeDesc,
        }
    }

    /// Key and direction this label stands for.
    pub fn ordering(self) -> Option<(SortKey, bool)> {
        match self {
            Self::None => None,
            Self::TitleAsc => Some((SortKey::Title, true)),
            Self::TitleDesc => Some((SortKey::Title, false)),
            Self::TimeAsc => Some((SortKey::Time, true)),
            Self::TimeDesc => Some((SortKey::Time, false)),
        }
    }

    /// Returns this label if `notes` still satisfies it, else `None`.
    pub fn revalidate(self, notes: &[Note]) -> Self {
        match self.ordering() {
            Some((key, ascending)) if !is_sorted_by(notes, key.comparator(), ascending) => {
                Self::None
            }
            _ => self,
        }
    }

    /// Stored spelling of this label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::TitleAsc => "alphAsc",
            Self::TitleDesc => "alphDes",
            Self::TimeAsc => "timeAsc",
            Self::TimeDesc => "timeDes",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SortLabel;
    use crate::model::note::Note;
    use crate::ordering::compare::SortKey;
    use uuid::Uuid;

    fn board(titles: &[&str]) -> Vec<Note> {
        titles
            .iter()
            .enumerate()
            .map(|(idx, title)| Note::with_id(Uuid::new_v4(), *title, "", 0, idx as i64))
            .collect()
    }

    #[test]
    fn label_survives_while_board_stays_sorted() {
        let notes = board(&["", "A", "B", "C"]);
        assert_eq!(SortLabel::TitleAsc.revalidate(&notes), SortLabel::TitleAsc);
        assert_eq!(SortLabel::TimeAsc.revalidate(&notes), SortLabel::TimeAsc);
    }

    #[test]
    fn label_clears_when_board_breaks_order() {
        let notes = board(&["", "A", "C", "B"]);
        assert_eq!(SortLabel::TitleAsc.revalidate(&notes), SortLabel::None);
        assert_eq!(SortLabel::TimeDesc.revalidate(&notes), SortLabel::None);
        assert_eq!(SortLabel::None.revalidate(&notes), SortLabel::None);
    }

    #[test]
    fn labels_use_stored_spellings() {
        assert_eq!(SortLabel::for_sort(SortKey::Title, false).as_str(), "alphDes");
        let json = serde_json::to_string(&SortLabel::TimeAsc).expect("serialize label");
        assert_eq!(json, "\"timeAsc\"");
        let parsed: SortLabel = serde_json::from_str("\"\"").expect("parse empty label");
        assert_eq!(parsed, SortLabel::None);
    }
}
