//! Board use-case service.
//!
//! # Responsibility
//! - Own the live board state: notes, sort label and layout settings.
//! - Apply user actions (add, edit, delete, sort, drag, resize) and persist
//!   the result through a [`PreferenceRepository`].
//! - Re-validate the sort label after every note mutation.
//!
//! # Invariants
//! - In-memory state only changes after the matching write succeeded.
//! - `updated_at` is stamped here, and only for title/body changes.
//! - The pinned note is never deleted, dragged or sorted.

use crate::layout::grid::{compute_layout, Position};
use crate::model::collection::{CollectionError, NoteCollection};
use crate::model::note::{Note, NoteId, NoteValidationError};
use crate::ordering::compare::SortKey;
use crate::ordering::sort_label::SortLabel;
use crate::repo::preference_repo::{
    encode_json, PreferenceKey, PreferenceRepository, RepoError, RepoResult,
};
use crate::settings::{normalize_cell_width, normalize_size_factor, BoardSettings};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of "now" in epoch milliseconds.
pub type Clock = fn() -> i64;

/// Wall-clock time in epoch milliseconds; 0 if the clock predates 1970.
pub fn system_clock_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}

/// Receives user-visible confirmations.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Notifier that only records confirmations in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        info!("event=notify module=service message={message:?}");
    }
}

/// Partial edit of one note. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Service error for board use-cases.
#[derive(Debug)]
pub enum BoardServiceError {
    /// A note can only be filed once the compose slot has a title.
    TitleRequired,
    /// Target note does not exist.
    NoteNotFound(NoteId),
    /// Operation is not allowed on the pinned compose slot.
    PinnedNoteImmutable(NoteId),
    /// Edited fields break note constraints.
    Validation(NoteValidationError),
    /// Reorder indices are invalid.
    Collection(CollectionError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for BoardServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TitleRequired => write!(f, "note title must not be blank"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::PinnedNoteImmutable(id) => write!(f, "pinned note cannot be removed: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Collection(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BoardServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Collection(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for BoardServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<NoteValidationError> for BoardServiceError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<CollectionError> for BoardServiceError {
    fn from(value: CollectionError) -> Self {
        Self::Collection(value)
    }
}

pub type BoardResult<T> = Result<T, BoardServiceError>;

/// Board service facade over a preference repository.
pub struct BoardService<R: PreferenceRepository, N: Notifier = LogNotifier> {
    repo: R,
    notifier: N,
    clock: Clock,
    notes: NoteCollection,
    sort_label: SortLabel,
    settings: BoardSettings,
}

impl<R: PreferenceRepository> BoardService<R, LogNotifier> {
    /// Loads board state with log-only notifications and the system clock.
    pub fn load(repo: R) -> BoardResult<Self> {
        Self::load_with(repo, LogNotifier, system_clock_ms)
    }
}

impl<R: PreferenceRepository, N: Notifier> BoardService<R, N> {
    /// Loads stored board state, seeding one blank pinned note when empty.
    ///
    /// The seeded board is written back before returning, so the compose
    /// slot keeps its id across reloads. A stored sort label that no longer
    /// matches the stored notes is dropped on load.
    pub fn load_with(repo: R, notifier: N, clock: Clock) -> BoardResult<Self> {
        let stored_notes: Option<Vec<Note>> = repo.get_json(PreferenceKey::Notes)?;
        let (notes, seeded) = match stored_notes.and_then(NoteCollection::from_vec) {
            Some(notes) => (notes, false),
            None => (NoteCollection::new(Note::blank(0, clock()), Vec::new()), true),
        };

        let stored_label: Option<SortLabel> = repo.get_json(PreferenceKey::Sort)?;
        let sort_label = stored_label.unwrap_or_default().revalidate(&notes.to_vec());

        let mut settings = BoardSettings::default();
        if let Some(size_factor) = repo.get_json::<u32>(PreferenceKey::SizeFactor)? {
            settings.size_factor = normalize_size_factor(size_factor);
        }
        if let Some(cell_width) = repo.get_json::<u32>(PreferenceKey::CellWidth)? {
            settings.cell_width = normalize_cell_width(cell_width);
        }

        let service = Self {
            repo,
            notifier,
            clock,
            notes,
            sort_label,
            settings,
        };
        if seeded {
            service.persist_notes(&service.notes, service.sort_label)?;
        }

        info!(
            "event=board_load module=service status=ok notes={} seeded={} sort={:?} cell_width={}",
            service.notes.len(),
            seeded,
            service.sort_label.as_str(),
            service.settings.cell_width
        );
        Ok(service)
    }

    pub fn notes(&self) -> &NoteCollection {
        &self.notes
    }

    pub fn sort_label(&self) -> SortLabel {
        self.sort_label
    }

    pub fn settings(&self) -> BoardSettings {
        self.settings
    }

    /// Files the compose slot as a regular note and opens a fresh one.
    ///
    /// The new compose slot inherits the current pinned color.
    pub fn add_note(&mut self) -> BoardResult<&Note> {
        if !self.notes.pinned().has_title() {
            return Err(BoardServiceError::TitleRequired);
        }
        let mut next = self.notes.clone();
        let color = next.pinned().color_index;
        next.push_pinned(Note::blank(color, (self.clock)()));
        self.commit_notes(next, "add_note")?;
        self.notifier.notify("Note added.");
        Ok(self.notes.pinned())
    }

    /// Applies a partial title/body edit and stamps `updated_at`.
    ///
    /// Returns `Ok(false)` when the edit matches current values.
    pub fn update_note(&mut self, id: NoteId, update: NoteUpdate) -> BoardResult<bool> {
        let mut next = self.notes.clone();
        let now = (self.clock)();
        let note = next
            .find_mut(id)
            .ok_or(BoardServiceError::NoteNotFound(id))?;

        let mut changed = false;
        if let Some(title) = update.title.filter(|title| *title != note.title) {
            note.title = title;
            changed = true;
        }
        if let Some(body) = update.body.filter(|body| *body != note.body) {
            note.body = body;
            changed = true;
        }
        if !changed {
            return Ok(false);
        }
        note.validate()?;
        note.updated_at = now;

        self.commit_notes(next, "update_note")?;
        self.notifier.notify("Note updated.");
        Ok(true)
    }

    /// Deletes one filed note.
    pub fn delete_note(&mut self, id: NoteId) -> BoardResult<()> {
        if self.notes.pinned().id == id {
            return Err(BoardServiceError::PinnedNoteImmutable(id));
        }
        let mut next = self.notes.clone();
        next.remove(id).ok_or(BoardServiceError::NoteNotFound(id))?;
        self.commit_notes(next, "delete_note")?;
        self.notifier.notify("Note deleted.");
        Ok(())
    }

    /// Deletes every filed note, keeping the compose slot.
    ///
    /// Returns `Ok(false)` without writing when only the compose slot exists.
    pub fn delete_all_notes(&mut self) -> BoardResult<bool> {
        if self.notes.len() < 2 {
            return Ok(false);
        }
        let mut next = self.notes.clone();
        next.clear_rest();
        self.commit_notes(next, "delete_all_notes")?;
        self.notifier.notify("All Notes deleted.");
        Ok(true)
    }

    /// Recolors the compose slot only.
    pub fn set_pinned_color(&mut self, color_index: u8) -> BoardResult<()> {
        let mut next = self.notes.clone();
        next.pinned_mut().color_index = color_index;
        self.commit_notes(next, "set_pinned_color")
    }

    /// Sorts filed notes and records the matching sort label.
    pub fn sort(&mut self, key: SortKey, ascending: bool) -> BoardResult<()> {
        let next = match key {
            SortKey::Title => self.notes.sorted_by_title(ascending),
            SortKey::Time => self.notes.sorted_by_time(ascending),
        };
        let label = SortLabel::for_sort(key, ascending);
        self.persist_notes(&next, label)?;
        self.notes = next;
        self.sort_label = label;
        info!(
            "event=board_sort module=service status=ok sort={:?} notes={}",
            label.as_str(),
            self.notes.len()
        );
        Ok(())
    }

    /// Drag-and-drop reorder between flat indices.
    ///
    /// Returns `Ok(false)` when the move is a no-op (same slot or pinned).
    pub fn move_note(&mut self, from: usize, to: usize) -> BoardResult<bool> {
        let mut next = self.notes.clone();
        if !next.move_note(from, to)? {
            return Ok(false);
        }
        self.commit_notes(next, "move_note")?;
        Ok(true)
    }

    /// Stores a normalized size factor and returns it.
    pub fn set_size_factor(&mut self, value: u32) -> BoardResult<u32> {
        let normalized = normalize_size_factor(value);
        self.repo.set_json(PreferenceKey::SizeFactor, &normalized)?;
        self.settings.size_factor = normalized;
        Ok(normalized)
    }

    /// Stores a normalized cell width and returns it.
    pub fn set_cell_width(&mut self, value: u32) -> BoardResult<u32> {
        let normalized = normalize_cell_width(value);
        self.repo.set_json(PreferenceKey::CellWidth, &normalized)?;
        self.settings.cell_width = normalized;
        Ok(normalized)
    }

    /// Lays the board out for `container_width` and persists the positions.
    pub fn layout(&self, container_width: f64) -> BoardResult<Vec<Position>> {
        let notes = self.notes.to_vec();
        let positions = compute_layout(
            &notes,
            container_width,
            f64::from(self.settings.cell_width),
        );
        self.repo.set_json(PreferenceKey::Positions, &positions)?;
        debug!(
            "event=board_layout module=service status=ok notes={} container_width={}",
            positions.len(),
            container_width
        );
        Ok(positions)
    }

    /// Positions from the most recent layout, if any.
    pub fn stored_positions(&self) -> RepoResult<Vec<Position>> {
        Ok(self
            .repo
            .get_json(PreferenceKey::Positions)?
            .unwrap_or_default())
    }

    fn commit_notes(&mut self, next: NoteCollection, action: &'static str) -> BoardResult<()> {
        let label = self.sort_label.revalidate(&next.to_vec());
        self.persist_notes(&next, label)?;
        if label != self.sort_label {
            info!(
                "event=sort_label_cleared module=service action={action} previous={:?}",
                self.sort_label.as_str()
            );
        }
        self.notes = next;
        self.sort_label = label;
        debug!(
            "event=board_mutation module=service status=ok action={action} notes={}",
            self.notes.len()
        );
        Ok(())
    }

    fn persist_notes(&self, notes: &NoteCollection, label: SortLabel) -> BoardResult<()> {
        let entries = [
            (
                PreferenceKey::Notes,
                encode_json(PreferenceKey::Notes, &notes.to_vec())?,
            ),
            (PreferenceKey::Sort, encode_json(PreferenceKey::Sort, &label)?),
        ];
        self.repo.set_values(&entries)?;
        Ok(())
    }
}
