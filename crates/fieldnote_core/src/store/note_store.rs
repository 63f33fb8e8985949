//! In-memory note store backed by the persistence gateway.
//!
//! # Responsibility
//! - Act as the single source of truth for what the UI renders.
//! - Mediate every mutation through durable storage before touching the
//!   in-memory cache (pessimistic ordering).
//!
//! # Invariants
//! - The cache equals the durable store after every successful mutation and
//!   keeps its prior value after every failed one.
//! - The cache is ordered newest-first by `created_at`.
//! - The durable store is read only by `load_notes`; all other reads are
//!   served from the cache.

use crate::db::{Database, DbError};
use crate::model::note::{now_ms, validate_content, Note, NoteId, NoteValidationError};
use crate::repo::note_repo::{NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
use crate::wordcount::calculate_word_count;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::MutexGuard;
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error for note mutations.
///
/// Mutations fail loud: the caller must learn a write did not durably succeed
/// so it can surface the failure and must not assume the cache changed.
#[derive(Debug)]
pub enum StoreError {
    /// Rejected before any durable write was attempted.
    Validation(NoteValidationError),
    /// Persistence-layer failure; the cache is guaranteed unchanged.
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<NoteValidationError> for StoreError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}

/// Authoritative in-memory cache of all notes, newest first.
///
/// One logical mutation is in flight at a time from the UI's perspective;
/// the shared handle's mutex serializes any overlap. Two overlapping edits of
/// the same id remain last-write-wins at the durable layer.
pub struct NoteStore {
    db: Database,
    notes: Vec<Note>,
    is_loading: bool,
}

impl NoteStore {
    /// Creates a store over an injected database handle.
    ///
    /// The cache starts empty; call `load_notes` to hydrate it.
    pub fn new(db: Database) -> Self {
        Self {
            db,
            notes: Vec::new(),
            is_loading: false,
        }
    }

    /// Creates a store over the process-wide gateway handle.
    pub fn open() -> StoreResult<Self> {
        let db = crate::db::gateway::get_database()?;
        Ok(Self::new(db))
    }

    /// Immutable snapshot view of the cached notes, newest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// True only while a full reload is in flight.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Replaces the cache wholesale from durable storage.
    ///
    /// Fail-soft: a failed reload is logged and leaves the cache at its prior
    /// value, so a transient read failure never blanks the visible list. The
    /// caller observes only `is_loading` and `notes`.
    pub fn load_notes(&mut self) {
        let started_at = Instant::now();
        self.is_loading = true;

        let loaded = self
            .lock_conn()
            .and_then(|conn| SqliteNoteRepository::new(&conn).list_notes());
        match loaded {
            Ok(notes) => {
                info!(
                    "event=notes_load module=store status=ok count={} duration_ms={}",
                    notes.len(),
                    started_at.elapsed().as_millis()
                );
                self.notes = notes;
            }
            Err(err) => {
                error!(
                    "event=notes_load module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
            }
        }

        self.is_loading = false;
    }

    /// Creates a note: durable insert first, cache prepend on success only.
    ///
    /// Returns the created note.
    ///
    /// # Errors
    /// - `StoreError::Validation` for empty/whitespace-only content.
    /// - `StoreError::Repo` when the durable insert fails; the cache is
    ///   unchanged.
    pub fn add_note(&mut self, content: &str) -> StoreResult<Note> {
        let note = Note::new(content)?;

        let inserted = self
            .lock_conn()
            .and_then(|conn| SqliteNoteRepository::new(&conn).insert_note(&note));
        if let Err(err) = inserted {
            error!(
                "event=note_add module=store status=error id={} error={}",
                note.id, err
            );
            return Err(err.into());
        }

        info!(
            "event=note_add module=store status=ok id={} word_count={}",
            note.id, note.word_count
        );
        self.notes.insert(0, note.clone());
        Ok(note)
    }

    /// Edits a note's content: durable update first, cache patch on success.
    ///
    /// `created_at` is immutable and never part of the update. A missing id
    /// is a silent no-op: the durable update affects zero rows and the cache
    /// patch matches zero entries.
    pub fn update_note(&mut self, id: NoteId, content: &str) -> StoreResult<()> {
        validate_content(content)?;
        let updated_at = now_ms();
        let word_count = calculate_word_count(content);

        let changed = self.lock_conn().and_then(|conn| {
            SqliteNoteRepository::new(&conn).update_note(id, content, updated_at, word_count)
        });
        let changed = match changed {
            Ok(changed) => changed,
            Err(err) => {
                error!(
                    "event=note_update module=store status=error id={} error={}",
                    id, err
                );
                return Err(err.into());
            }
        };

        info!(
            "event=note_update module=store status=ok id={} rows={} word_count={}",
            id, changed, word_count
        );
        if let Some(note) = self.notes.iter_mut().find(|note| note.id == id) {
            note.content = content.to_string();
            note.updated_at = updated_at;
            note.word_count = word_count;
        }
        Ok(())
    }

    /// Deletes a note: durable delete first, cache removal on success.
    ///
    /// Deleting an absent id is a no-op, not an error.
    pub fn delete_note(&mut self, id: NoteId) -> StoreResult<()> {
        let changed = self
            .lock_conn()
            .and_then(|conn| SqliteNoteRepository::new(&conn).delete_note(id));
        let changed = match changed {
            Ok(changed) => changed,
            Err(err) => {
                error!(
                    "event=note_delete module=store status=error id={} error={}",
                    id, err
                );
                return Err(err.into());
            }
        };

        info!(
            "event=note_delete module=store status=ok id={} rows={}",
            id, changed
        );
        self.notes.retain(|note| note.id != id);
        Ok(())
    }

    /// Synchronous cache-only lookup; never touches durable storage.
    pub fn get_note_by_id(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    fn lock_conn(&self) -> RepoResult<MutexGuard<'_, rusqlite::Connection>> {
        self.db
            .lock()
            .map_err(|_| RepoError::Db(DbError::HandlePoisoned))
    }
}
