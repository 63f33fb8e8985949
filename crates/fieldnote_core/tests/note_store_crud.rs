use fieldnote_core::db::open_db_in_memory;
use fieldnote_core::{Database, Note, NoteRepository, NoteStore, SqliteNoteRepository, StoreError};
use rusqlite::params;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

fn mem_database() -> Database {
    Arc::new(Mutex::new(open_db_in_memory().unwrap()))
}

fn drop_notes_table(db: &Database) {
    db.lock().unwrap().execute_batch("DROP TABLE notes;").unwrap();
}

#[test]
fn add_note_prepends_to_cache_and_persists() {
    let db = mem_database();
    let mut store = NoteStore::new(Arc::clone(&db));

    let first = store.add_note("first note").unwrap();
    let second = store.add_note("second note").unwrap();

    assert_eq!(first.created_at, first.updated_at);
    assert_eq!(second.word_count, 2);
    assert_eq!(store.notes().len(), 2);
    assert_eq!(store.notes()[0].id, second.id);
    assert_eq!(store.notes()[1].id, first.id);

    let persisted: i64 = db
        .lock()
        .unwrap()
        .query_row("SELECT COUNT(*) FROM notes;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(persisted, 2);
}

#[test]
fn add_note_rejects_empty_content_without_touching_storage() {
    let db = mem_database();
    let mut store = NoteStore::new(Arc::clone(&db));

    let err = store.add_note("   ").unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert!(store.notes().is_empty());

    let persisted: i64 = db
        .lock()
        .unwrap()
        .query_row("SELECT COUNT(*) FROM notes;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(persisted, 0);
}

#[test]
fn add_note_failure_leaves_cache_unchanged() {
    let db = mem_database();
    let mut store = NoteStore::new(Arc::clone(&db));
    store.add_note("survivor").unwrap();

    drop_notes_table(&db);

    let err = store.add_note("doomed").unwrap_err();
    assert!(matches!(err, StoreError::Repo(_)));
    assert_eq!(store.notes().len(), 1);
    assert_eq!(store.notes()[0].content, "survivor");
}

#[test]
fn update_note_patches_matching_entry_only() {
    let db = mem_database();
    let mut store = NoteStore::new(Arc::clone(&db));
    let target = store.add_note("original text").unwrap();
    let other = store.add_note("untouched").unwrap();

    // Backdate the target so the fresh updated_at is strictly greater.
    db.lock()
        .unwrap()
        .execute(
            "UPDATE notes SET createdAt = 1000, updatedAt = 1000 WHERE id = ?1;",
            params![target.id.to_string()],
        )
        .unwrap();
    store.load_notes();

    store.update_note(target.id, "edited 你好").unwrap();

    let updated = store.get_note_by_id(target.id).unwrap();
    assert_eq!(updated.content, "edited 你好");
    assert_eq!(updated.word_count, 3);
    assert_eq!(updated.created_at, 1000);
    assert!(updated.updated_at > 1000);

    let untouched = store.get_note_by_id(other.id).unwrap();
    assert_eq!(untouched.content, "untouched");
    assert_eq!(untouched.updated_at, other.updated_at);
}

#[test]
fn update_note_on_absent_id_is_silent_noop() {
    let db = mem_database();
    let mut store = NoteStore::new(db);
    store.add_note("only note").unwrap();
    let before = store.notes().to_vec();

    store.update_note(Uuid::new_v4(), "nothing to hit").unwrap();

    assert_eq!(store.notes(), before.as_slice());
}

#[test]
fn update_note_failure_leaves_cache_unchanged() {
    let db = mem_database();
    let mut store = NoteStore::new(Arc::clone(&db));
    let note = store.add_note("stable").unwrap();

    drop_notes_table(&db);

    let err = store.update_note(note.id, "never lands").unwrap_err();
    assert!(matches!(err, StoreError::Repo(_)));
    assert_eq!(store.get_note_by_id(note.id).unwrap().content, "stable");
}

#[test]
fn delete_note_removes_exactly_one_entry() {
    let db = mem_database();
    let mut store = NoteStore::new(Arc::clone(&db));
    let first = store.add_note("first").unwrap();
    let second = store.add_note("second").unwrap();

    store.delete_note(first.id).unwrap();

    assert_eq!(store.notes().len(), 1);
    assert_eq!(store.notes()[0].id, second.id);

    let persisted: i64 = db
        .lock()
        .unwrap()
        .query_row("SELECT COUNT(*) FROM notes;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(persisted, 1);
}

#[test]
fn delete_note_on_absent_id_is_noop() {
    let db = mem_database();
    let mut store = NoteStore::new(db);
    store.add_note("kept").unwrap();

    store.delete_note(Uuid::new_v4()).unwrap();

    assert_eq!(store.notes().len(), 1);
}

#[test]
fn load_notes_orders_newest_first_and_replaces_wholesale() {
    let db = mem_database();

    let (first, second, third) = {
        let conn = db.lock().unwrap();
        let repo = SqliteNoteRepository::new(&conn);
        let first = seeded_note("note one", 3000);
        let second = seeded_note("note two", 2000);
        let third = seeded_note("note three", 1000);
        // Insert out of creation order; the load query re-sorts.
        repo.insert_note(&second).unwrap();
        repo.insert_note(&third).unwrap();
        repo.insert_note(&first).unwrap();
        (first, second, third)
    };

    let mut store = NoteStore::new(db);
    store.load_notes();

    assert!(!store.is_loading());
    let ids: Vec<_> = store.notes().iter().map(|note| note.id).collect();
    assert_eq!(ids, vec![first.id, second.id, third.id]);

    store.delete_note(second.id).unwrap();
    let ids: Vec<_> = store.notes().iter().map(|note| note.id).collect();
    assert_eq!(ids, vec![first.id, third.id]);
}

#[test]
fn load_notes_failure_keeps_prior_cache() {
    let db = mem_database();
    let mut store = NoteStore::new(Arc::clone(&db));
    store.add_note("visible before failure").unwrap();

    drop_notes_table(&db);
    store.load_notes();

    assert!(!store.is_loading());
    assert_eq!(store.notes().len(), 1);
    assert_eq!(store.notes()[0].content, "visible before failure");
}

#[test]
fn get_note_by_id_reads_cache_only() {
    let db = mem_database();
    let mut store = NoteStore::new(Arc::clone(&db));
    let note = store.add_note("cache resident").unwrap();

    // With the table gone, a cache-only lookup still succeeds.
    drop_notes_table(&db);

    assert_eq!(store.get_note_by_id(note.id), Some(&note));
    assert_eq!(store.get_note_by_id(Uuid::new_v4()), None);
}

#[test]
fn cjk_note_roundtrip_add_then_delete() {
    let db = mem_database();
    let mut store = NoteStore::new(db);

    let note = store.add_note("集成测试笔记").unwrap();
    assert_eq!(note.word_count, 6);
    assert_eq!(store.notes().len(), 1);

    store.delete_note(note.id).unwrap();
    assert_eq!(store.notes().len(), 0);
}

fn seeded_note(content: &str, created_at: i64) -> Note {
    Note {
        id: Uuid::new_v4(),
        content: content.to_string(),
        created_at,
        updated_at: created_at,
        word_count: fieldnote_core::calculate_word_count(content),
    }
}
