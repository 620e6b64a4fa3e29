use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicI64, Ordering};
use stickynote_core::db::{open_db, open_db_in_memory};
use stickynote_core::{
    BoardService, BoardServiceError, NoteUpdate, Notifier, PreferenceKey, PreferenceRepository,
    SortKey, SortLabel, SqlitePreferenceRepository,
};
use uuid::Uuid;

static TICK: AtomicI64 = AtomicI64::new(1_704_067_200_000);

fn ticking_clock() -> i64 {
    TICK.fetch_add(1_000, Ordering::SeqCst)
}

#[derive(Clone, Default)]
struct RecordingNotifier {
    messages: Rc<RefCell<Vec<String>>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

fn add_titled<R: PreferenceRepository, N: Notifier>(service: &mut BoardService<R, N>, title: &str) {
    let pinned_id = service.notes().pinned().id;
    service
        .update_note(
            pinned_id,
            NoteUpdate {
                title: Some(title.to_string()),
                body: None,
            },
        )
        .unwrap();
    service.add_note().unwrap();
}

fn titles<R: PreferenceRepository, N: Notifier>(service: &BoardService<R, N>) -> Vec<String> {
    service
        .notes()
        .iter()
        .map(|note| note.title.clone())
        .collect()
}

#[test]
fn fresh_board_has_one_blank_pinned_note_and_defaults() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferenceRepository::try_new(&conn).unwrap();
    let service = BoardService::load(repo).unwrap();

    assert_eq!(service.notes().len(), 1);
    assert_eq!(service.notes().pinned().title, "");
    assert_eq!(service.sort_label(), SortLabel::None);
    assert_eq!(service.settings().cell_width, 200);
    assert_eq!(service.settings().size_factor, 10);
}

#[test]
fn seeded_compose_slot_keeps_its_id_across_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("board.sqlite3");

    let first_pinned = {
        let conn = open_db(&db_path).unwrap();
        let repo = SqlitePreferenceRepository::try_new(&conn).unwrap();
        let service = BoardService::load(repo).unwrap();
        assert!(repo_has_notes(&conn));
        let pinned_id = service.notes().pinned().id;
        pinned_id
    };

    let conn = open_db(&db_path).unwrap();
    let repo = SqlitePreferenceRepository::try_new(&conn).unwrap();
    let mut service =
        BoardService::load_with(repo, RecordingNotifier::default(), ticking_clock).unwrap();
    assert_eq!(service.notes().pinned().id, first_pinned);

    let changed = service
        .update_note(
            first_pinned,
            NoteUpdate {
                title: Some("First".to_string()),
                body: None,
            },
        )
        .unwrap();
    assert!(changed);
    service.add_note().unwrap();
    assert_eq!(titles(&service), vec!["", "First"]);
    assert_eq!(service.notes().get(1).unwrap().id, first_pinned);
}

fn repo_has_notes(conn: &rusqlite::Connection) -> bool {
    SqlitePreferenceRepository::try_new(conn)
        .unwrap()
        .get_value(PreferenceKey::Notes)
        .unwrap()
        .is_some()
}

#[test]
fn add_note_requires_pinned_title() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferenceRepository::try_new(&conn).unwrap();
    let notifier = RecordingNotifier::default();
    let mut service = BoardService::load_with(repo, notifier.clone(), ticking_clock).unwrap();

    let err = service.add_note().unwrap_err();
    assert!(matches!(err, BoardServiceError::TitleRequired));
    assert_eq!(service.notes().len(), 1);
    assert!(notifier.messages.borrow().is_empty());
}

#[test]
fn add_note_files_compose_slot_and_inherits_color() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferenceRepository::try_new(&conn).unwrap();
    let notifier = RecordingNotifier::default();
    let mut service = BoardService::load_with(repo, notifier.clone(), ticking_clock).unwrap();

    service.set_pinned_color(4).unwrap();
    add_titled(&mut service, "New Note");

    assert_eq!(titles(&service), vec!["", "New Note"]);
    assert_eq!(service.notes().pinned().color_index, 4);
    assert_eq!(
        notifier.messages.borrow().as_slice(),
        ["Note updated.", "Note added."]
    );
}

#[test]
fn sort_sets_label_and_drag_clears_it() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferenceRepository::try_new(&conn).unwrap();
    let mut service =
        BoardService::load_with(repo, RecordingNotifier::default(), ticking_clock).unwrap();
    for title in ["B", "C", "A", "D"] {
        add_titled(&mut service, title);
    }
    assert_eq!(titles(&service), vec!["", "D", "A", "C", "B"]);

    service.sort(SortKey::Title, true).unwrap();
    assert_eq!(titles(&service), vec!["", "A", "B", "C", "D"]);
    assert_eq!(service.sort_label(), SortLabel::TitleAsc);

    service.sort(SortKey::Title, false).unwrap();
    assert_eq!(titles(&service), vec!["", "D", "C", "B", "A"]);
    assert_eq!(service.sort_label(), SortLabel::TitleDesc);

    assert!(service.move_note(1, 3).unwrap());
    assert_eq!(titles(&service), vec!["", "C", "B", "D", "A"]);
    assert_eq!(service.sort_label(), SortLabel::None);
}

#[test]
fn adding_to_a_sorted_board_keeps_label_when_order_still_holds() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferenceRepository::try_new(&conn).unwrap();
    let mut service =
        BoardService::load_with(repo, RecordingNotifier::default(), ticking_clock).unwrap();
    for title in ["B", "C"] {
        add_titled(&mut service, title);
    }
    service.sort(SortKey::Title, false).unwrap();
    assert_eq!(titles(&service), vec!["", "C", "B"]);

    add_titled(&mut service, "D");
    assert_eq!(titles(&service), vec!["", "D", "C", "B"]);
    assert_eq!(service.sort_label(), SortLabel::TitleDesc);

    add_titled(&mut service, "A");
    assert_eq!(service.sort_label(), SortLabel::None);
}

#[test]
fn time_sort_follows_edit_stamps_and_clears_on_newer_edit() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferenceRepository::try_new(&conn).unwrap();
    let mut service =
        BoardService::load_with(repo, RecordingNotifier::default(), ticking_clock).unwrap();
    for title in ["B", "C", "A", "D"] {
        add_titled(&mut service, title);
    }

    service.sort(SortKey::Time, true).unwrap();
    assert_eq!(titles(&service), vec!["", "B", "C", "A", "D"]);
    assert_eq!(service.sort_label(), SortLabel::TimeAsc);

    service.sort(SortKey::Time, false).unwrap();
    assert_eq!(titles(&service), vec!["", "D", "A", "C", "B"]);

    let oldest = service.notes().get(4).unwrap().id;
    let changed = service
        .update_note(
            oldest,
            NoteUpdate {
                title: None,
                body: Some("fresh edit".to_string()),
            },
        )
        .unwrap();
    assert!(changed);
    assert_eq!(service.sort_label(), SortLabel::None);
}

#[test]
fn unchanged_update_does_not_restamp() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferenceRepository::try_new(&conn).unwrap();
    let mut service =
        BoardService::load_with(repo, RecordingNotifier::default(), ticking_clock).unwrap();
    add_titled(&mut service, "Same");
    let note = service.notes().get(1).unwrap().clone();

    let changed = service
        .update_note(
            note.id,
            NoteUpdate {
                title: Some("Same".to_string()),
                body: Some(String::new()),
            },
        )
        .unwrap();
    assert!(!changed);
    assert_eq!(service.notes().get(1).unwrap().updated_at, note.updated_at);
}

#[test]
fn overlong_body_is_rejected_without_state_change() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferenceRepository::try_new(&conn).unwrap();
    let mut service =
        BoardService::load_with(repo, RecordingNotifier::default(), ticking_clock).unwrap();
    let pinned_id = service.notes().pinned().id;

    let err = service
        .update_note(
            pinned_id,
            NoteUpdate {
                title: None,
                body: Some("x".repeat(141)),
            },
        )
        .unwrap_err();
    assert!(matches!(err, BoardServiceError::Validation(_)));
    assert_eq!(service.notes().pinned().body, "");
}

#[test]
fn delete_rules_protect_pinned_note() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferenceRepository::try_new(&conn).unwrap();
    let notifier = RecordingNotifier::default();
    let mut service = BoardService::load_with(repo, notifier.clone(), ticking_clock).unwrap();
    for title in ["A", "B", "C"] {
        add_titled(&mut service, title);
    }

    let pinned_id = service.notes().pinned().id;
    assert!(matches!(
        service.delete_note(pinned_id).unwrap_err(),
        BoardServiceError::PinnedNoteImmutable(_)
    ));
    let missing = Uuid::new_v4();
    assert!(matches!(
        service.delete_note(missing).unwrap_err(),
        BoardServiceError::NoteNotFound(id) if id == missing
    ));

    let middle = service.notes().get(2).unwrap().id;
    service.delete_note(middle).unwrap();
    assert_eq!(titles(&service), vec!["", "C", "A"]);

    assert!(service.delete_all_notes().unwrap());
    assert_eq!(titles(&service), vec![""]);
    assert_eq!(service.notes().pinned().id, pinned_id);
    assert_eq!(
        notifier.messages.borrow().last().map(String::as_str),
        Some("All Notes deleted.")
    );
}

#[test]
fn delete_all_on_compose_slot_only_is_a_no_op() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferenceRepository::try_new(&conn).unwrap();
    let notifier = RecordingNotifier::default();
    let mut service = BoardService::load_with(repo, notifier.clone(), ticking_clock).unwrap();
    let pinned_id = service.notes().pinned().id;

    assert!(!service.delete_all_notes().unwrap());
    assert_eq!(service.notes().len(), 1);
    assert_eq!(service.notes().pinned().id, pinned_id);
    assert!(notifier.messages.borrow().is_empty());
}

#[test]
fn state_survives_reload() {
    let conn = open_db_in_memory().unwrap();
    {
        let repo = SqlitePreferenceRepository::try_new(&conn).unwrap();
        let mut service =
            BoardService::load_with(repo, RecordingNotifier::default(), ticking_clock).unwrap();
        for title in ["Beta", "Alpha"] {
            add_titled(&mut service, title);
        }
        service.sort(SortKey::Title, true).unwrap();
        service.set_cell_width(333).unwrap();
        service.set_size_factor(3).unwrap();
    }

    let repo = SqlitePreferenceRepository::try_new(&conn).unwrap();
    let service = BoardService::load(repo).unwrap();
    assert_eq!(titles(&service), vec!["", "Alpha", "Beta"]);
    assert_eq!(service.sort_label(), SortLabel::TitleAsc);
    assert_eq!(service.settings().cell_width, 330);
    assert_eq!(service.settings().size_factor, 6);
}

#[test]
fn stale_stored_label_is_dropped_on_load() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferenceRepository::try_new(&conn).unwrap();
    let notes = serde_json_notes(&["", "B", "A"]);
    repo.set_values(&[
        (PreferenceKey::Notes, notes),
        (PreferenceKey::Sort, "\"alphAsc\"".to_string()),
    ])
    .unwrap();

    let service = BoardService::load(repo).unwrap();
    assert_eq!(titles(&service), vec!["", "B", "A"]);
    assert_eq!(service.sort_label(), SortLabel::None);
}

#[test]
fn layout_uses_cell_width_and_persists_positions() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferenceRepository::try_new(&conn).unwrap();
    let mut service =
        BoardService::load_with(repo, RecordingNotifier::default(), ticking_clock).unwrap();
    for title in ["A", "B", "C"] {
        add_titled(&mut service, title);
    }
    assert_eq!(service.set_cell_width(400).unwrap(), 400);

    let positions = service.layout(1540.0).unwrap();
    let coords: Vec<(f64, f64)> = positions.iter().map(|p| (p.x, p.y)).collect();
    assert_eq!(
        coords,
        vec![(0.0, 0.0), (570.0, 0.0), (1140.0, 0.0), (0.0, 400.0)]
    );
    assert_eq!(service.stored_positions().unwrap(), positions);
}

#[test]
fn move_note_out_of_range_is_an_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferenceRepository::try_new(&conn).unwrap();
    let mut service =
        BoardService::load_with(repo, RecordingNotifier::default(), ticking_clock).unwrap();
    add_titled(&mut service, "A");

    assert!(matches!(
        service.move_note(1, 9).unwrap_err(),
        BoardServiceError::Collection(_)
    ));
    assert!(!service.move_note(1, 0).unwrap());
}

fn serde_json_notes(titles: &[&str]) -> String {
    let items: Vec<String> = titles
        .iter()
        .enumerate()
        .map(|(idx, title)| {
            format!(
                r#"{{"id":"{}","title":"{}","body":"","colorIndex":0,"updatedAt":{}}}"#,
                Uuid::new_v4(),
                title,
                idx
            )
        })
        .collect();
    format!("[{}]", items.join(","))
}
