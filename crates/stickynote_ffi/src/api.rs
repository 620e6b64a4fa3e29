//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose board actions (edit, sort, drag, layout) to Dart via FRB.
//! - Return whole-board snapshots so the UI never re-derives order.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every board call opens the configured database, applies one action and
//!   returns the resulting snapshot or an error message.

use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::OnceLock;
use stickynote_core::db::open_db;
use stickynote_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    BoardService, Note, NoteId, NoteUpdate, SortKey, SqlitePreferenceRepository,
};
use uuid::Uuid;

const BOARD_DB_FILE_NAME: &str = "stickynote_board.sqlite3";
static BOARD_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - `level`: `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory for rolling logs.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One note as seen by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardNoteItem {
    pub id: String,
    pub title: String,
    pub body: String,
    pub color_index: u8,
    /// Epoch milliseconds of the last title/body change.
    pub updated_at: i64,
}

/// Grid cell origin for the note at the same index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardPosition {
    pub x: f64,
    pub y: f64,
}

/// Board snapshot returned by every board call.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardResponse {
    /// Whether the action succeeded.
    pub ok: bool,
    /// Notes in display order; index 0 is the compose slot.
    pub notes: Vec<BoardNoteItem>,
    /// Active sort label (`""`, `alphAsc`, `alphDes`, `timeAsc`, `timeDes`).
    pub sort_label: String,
    pub size_factor: u32,
    pub cell_width: u32,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl BoardResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            notes: Vec::new(),
            sort_label: String::new(),
            size_factor: 0,
            cell_width: 0,
            message: message.into(),
        }
    }
}

/// Loads the current board without changing it.
#[flutter_rust_bridge::frb(sync)]
pub fn board_load() -> BoardResponse {
    with_board("board_load", "Board loaded.", |_| Ok(()))
}

/// Files the compose slot and opens a fresh one.
#[flutter_rust_bridge::frb(sync)]
pub fn board_add_note() -> BoardResponse {
    with_board("board_add_note", "Note added.", |service| {
        service.add_note().map(|_| ())
    })
}

/// Applies a partial title/body edit.
///
/// `None` fields are left unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn board_update_note(id: String, title: Option<String>, body: Option<String>) -> BoardResponse {
    let Some(note_id) = parse_note_id(&id) else {
        return BoardResponse::failure(format!("board_update_note failed: invalid id `{id}`"));
    };
    with_board("board_update_note", "Note updated.", |service| {
        service
            .update_note(note_id, NoteUpdate { title, body })
            .map(|_| ())
    })
}

/// Deletes one filed note.
#[flutter_rust_bridge::frb(sync)]
pub fn board_delete_note(id: String) -> BoardResponse {
    let Some(note_id) = parse_note_id(&id) else {
        return BoardResponse::failure(format!("board_delete_note failed: invalid id `{id}`"));
    };
    with_board("board_delete_note", "Note deleted.", |service| {
        service.delete_note(note_id)
    })
}

/// Deletes every filed note.
#[flutter_rust_bridge::frb(sync)]
pub fn board_delete_all_notes() -> BoardResponse {
    with_board("board_delete_all_notes", "All Notes deleted.", |service| {
        service.delete_all_notes().map(|_| ())
    })
}

/// Recolors the compose slot.
#[flutter_rust_bridge::frb(sync)]
pub fn board_set_pinned_color(color_index: u8) -> BoardResponse {
    with_board("board_set_pinned_color", "Color updated.", |service| {
        service.set_pinned_color(color_index)
    })
}

/// Sorts by `title` or `time`.
#[flutter_rust_bridge::frb(sync)]
pub fn board_sort(key: String, ascending: bool) -> BoardResponse {
    let sort_key = match key.trim().to_ascii_lowercase().as_str() {
        "title" => SortKey::Title,
        "time" => SortKey::Time,
        other => {
            return BoardResponse::failure(format!(
                "board_sort failed: unknown key `{other}`; expected title|time"
            ))
        }
    };
    with_board("board_sort", "Notes sorted.", |service| {
        service.sort(sort_key, ascending)
    })
}

/// Drag-and-drop reorder between display indices.
#[flutter_rust_bridge::frb(sync)]
pub fn board_move_note(from: u32, to: u32) -> BoardResponse {
    with_board("board_move_note", "Note moved.", |service| {
        service
            .move_note(from as usize, to as usize)
            .map(|_| ())
    })
}

/// Stores the note scale slider value.
#[flutter_rust_bridge::frb(sync)]
pub fn board_set_size_factor(value: u32) -> BoardResponse {
    with_board("board_set_size_factor", "Size updated.", |service| {
        service.set_size_factor(value).map(|_| ())
    })
}

/// Stores the grid cell width slider value.
#[flutter_rust_bridge::frb(sync)]
pub fn board_set_cell_width(value: u32) -> BoardResponse {
    with_board("board_set_cell_width", "Cell width updated.", |service| {
        service.set_cell_width(value).map(|_| ())
    })
}

/// Computes grid positions for the current board.
///
/// Returns an empty list when the board cannot be opened.
#[flutter_rust_bridge::frb(sync)]
pub fn board_layout(container_width: f64) -> Vec<BoardPosition> {
    let result = open_connection().and_then(|conn| {
        let repo = SqlitePreferenceRepository::try_new(&conn).map_err(|err| err.to_string())?;
        let service = BoardService::load(repo).map_err(|err| err.to_string())?;
        let positions = service
            .layout(container_width)
            .map_err(|err| err.to_string())?;
        Ok(positions)
    });
    match result {
        Ok(positions) => positions
            .into_iter()
            .map(|position| BoardPosition {
                x: position.x,
                y: position.y,
            })
            .collect(),
        Err(err) => {
            log::warn!("event=ffi_call module=ffi call=board_layout status=error error={err}");
            Vec::new()
        }
    }
}

fn with_board<F>(call: &'static str, success_message: &str, action: F) -> BoardResponse
where
    F: FnOnce(
        &mut BoardService<SqlitePreferenceRepository<'_>>,
    ) -> Result<(), stickynote_core::BoardServiceError>,
{
    let conn = match open_connection() {
        Ok(conn) => conn,
        Err(err) => return BoardResponse::failure(format!("{call} failed: {err}")),
    };
    let repo = match SqlitePreferenceRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => return BoardResponse::failure(format!("{call} failed: {err}")),
    };
    let mut service = match BoardService::load(repo) {
        Ok(service) => service,
        Err(err) => return BoardResponse::failure(format!("{call} failed: {err}")),
    };

    match action(&mut service) {
        Ok(()) => snapshot(&service, true, success_message.to_string()),
        Err(err) => {
            log::warn!("event=ffi_call module=ffi call={call} status=error error={err}");
            snapshot(&service, false, format!("{call} failed: {err}"))
        }
    }
}

fn snapshot(
    service: &BoardService<SqlitePreferenceRepository<'_>>,
    ok: bool,
    message: String,
) -> BoardResponse {
    let settings = service.settings();
    BoardResponse {
        ok,
        notes: service.notes().iter().map(to_note_item).collect(),
        sort_label: service.sort_label().as_str().to_string(),
        size_factor: settings.size_factor,
        cell_width: settings.cell_width,
        message,
    }
}

fn open_connection() -> Result<Connection, String> {
    open_db(resolve_board_db_path()).map_err(|err| format!("board DB open failed: {err}"))
}

fn resolve_board_db_path() -> PathBuf {
    BOARD_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("STICKYNOTE_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(BOARD_DB_FILE_NAME)
        })
        .clone()
}

fn parse_note_id(raw: &str) -> Option<NoteId> {
    Uuid::parse_str(raw.trim()).ok()
}

fn to_note_item(note: &Note) -> BoardNoteItem {
    BoardNoteItem {
        id: note.id.to_string(),
        title: note.title.clone(),
        body: note.body.clone(),
        color_index: note.color_index,
        updated_at: note.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        board_add_note, board_delete_all_notes, board_layout, board_load, board_sort,
        board_update_note, core_version, init_logging, ping, resolve_board_db_path,
    };
    use std::sync::OnceLock;
    use tempfile::TempDir;

    static BOARD_DIR: OnceLock<TempDir> = OnceLock::new();

    // Only one test may touch the board database; it is process-wide.
    fn use_fresh_board_db() {
        let dir = BOARD_DIR.get_or_init(|| tempfile::tempdir().expect("temp board dir"));
        let db_path = dir.path().join("board.sqlite3");
        std::env::set_var("STICKYNOTE_DB_PATH", &db_path);
        assert_eq!(resolve_board_db_path(), db_path);
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "/tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn board_sort_rejects_unknown_key() {
        let response = board_sort("color".to_string(), true);
        assert!(!response.ok);
        assert!(response.message.contains("title|time"));
    }

    #[test]
    fn board_update_rejects_malformed_id() {
        let response = board_update_note("not-a-uuid".to_string(), None, None);
        assert!(!response.ok);
        assert!(response.message.contains("invalid id"));
    }

    #[test]
    fn fresh_board_compose_slot_can_be_titled_and_filed() {
        use_fresh_board_db();

        let loaded = board_load();
        assert!(loaded.ok, "{}", loaded.message);
        assert_eq!(loaded.notes.len(), 1);
        assert_eq!(loaded.sort_label, "");
        let pinned_id = loaded.notes[0].id.clone();

        let reloaded = board_load();
        assert_eq!(reloaded.notes[0].id, pinned_id);

        let cleared = board_delete_all_notes();
        assert!(cleared.ok, "{}", cleared.message);
        assert_eq!(cleared.notes.len(), 1);

        let rejected = board_add_note();
        assert!(!rejected.ok);
        assert_eq!(rejected.notes.len(), 1);

        let updated = board_update_note(pinned_id.clone(), Some("First".to_string()), None);
        assert!(updated.ok, "{}", updated.message);
        assert_eq!(updated.notes[0].title, "First");

        let added = board_add_note();
        assert!(added.ok, "{}", added.message);
        assert_eq!(added.notes.len(), 2);
        assert_eq!(added.notes[0].title, "");
        assert_ne!(added.notes[0].id, pinned_id);
        assert_eq!(added.notes[1].id, pinned_id);
        assert_eq!(added.notes[1].title, "First");

        assert_eq!(board_layout(1200.0).len(), 2);
    }
}
