//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide row-level CRUD over the `notes` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `createdAt` is never part of an UPDATE statement.
//! - Listing is always ordered by `createdAt DESC` (newest first).
//! - Read paths must reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::note::{Note, NoteId};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    content,
    createdAt,
    updatedAt,
    wordCount
FROM notes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for note persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for note CRUD operations.
///
/// Update/delete return the affected-row count so callers can decide how to
/// treat a missing id; the store treats zero rows as a silent no-op.
pub trait NoteRepository {
    fn insert_note(&self, note: &Note) -> RepoResult<()>;
    fn update_note(
        &self,
        id: NoteId,
        content: &str,
        updated_at: i64,
        word_count: u32,
    ) -> RepoResult<usize>;
    fn delete_note(&self, id: NoteId) -> RepoResult<usize>;
    fn list_notes(&self) -> RepoResult<Vec<Note>>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a bootstrapped connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn insert_note(&self, note: &Note) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO notes (id, content, createdAt, updatedAt, wordCount)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                note.id.to_string(),
                note.content.as_str(),
                note.created_at,
                note.updated_at,
                note.word_count,
            ],
        )?;
        Ok(())
    }

    fn update_note(
        &self,
        id: NoteId,
        content: &str,
        updated_at: i64,
        word_count: u32,
    ) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "UPDATE notes SET content = ?1, updatedAt = ?2, wordCount = ?3 WHERE id = ?4;",
            params![content, updated_at, word_count, id.to_string()],
        )?;
        Ok(changed)
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "DELETE FROM notes WHERE id = ?1;",
            params![id.to_string()],
        )?;
        Ok(changed)
    }

    fn list_notes(&self) -> RepoResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} ORDER BY createdAt DESC;"))?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(note_from_row(row)?);
        }
        Ok(notes)
    }
}

fn note_from_row(row: &Row<'_>) -> RepoResult<Note> {
    let id_text: String = row.get("id")?;
    Ok(Note {
        id: parse_note_id(&id_text)?,
        content: row.get("content")?,
        created_at: row.get("createdAt")?,
        updated_at: row.get("updatedAt")?,
        word_count: row.get("wordCount")?,
    })
}

fn parse_note_id(value: &str) -> RepoResult<NoteId> {
    Uuid::parse_str(value)
        .map_err(|err| RepoError::InvalidData(format!("id `{value}` is not a valid uuid: {err}")))
}
