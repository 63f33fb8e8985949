use fieldnote_core::{Note, NoteValidationError};
use uuid::Uuid;

#[test]
fn note_new_sets_defaults() {
    let note = Note::new("hello world").unwrap();

    assert!(!note.id.is_nil());
    assert_eq!(note.content, "hello world");
    assert_eq!(note.created_at, note.updated_at);
    assert!(note.created_at > 0);
    assert_eq!(note.word_count, 2);
}

#[test]
fn note_new_rejects_empty_content() {
    assert_eq!(
        Note::new("").unwrap_err(),
        NoteValidationError::EmptyContent
    );
    assert_eq!(
        Note::new("   \n\t").unwrap_err(),
        NoteValidationError::EmptyContent
    );
}

#[test]
fn distinct_notes_get_distinct_ids() {
    let first = Note::new("one").unwrap();
    let second = Note::new("one").unwrap();
    assert_ne!(first.id, second.id);
}

#[test]
fn note_serialization_uses_schema_field_names() {
    let note_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let note = Note {
        id: note_id,
        content: "Hello 你好".to_string(),
        created_at: 1_700_000_000_000,
        updated_at: 1_700_000_360_000,
        word_count: 3,
    };

    let json = serde_json::to_value(&note).unwrap();
    assert_eq!(json["id"], note_id.to_string());
    assert_eq!(json["content"], "Hello 你好");
    assert_eq!(json["createdAt"], 1_700_000_000_000_i64);
    assert_eq!(json["updatedAt"], 1_700_000_360_000_i64);
    assert_eq!(json["wordCount"], 3);

    let decoded: Note = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, note);
}
