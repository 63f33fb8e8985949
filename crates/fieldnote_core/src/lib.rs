//! Core domain logic for Fieldnote, a local-first note-taking app.
//! This crate is the single source of truth for note persistence invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;
pub mod wordcount;

pub use db::gateway::{configure_db_path, get_database, init_database, Database};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteId, NoteValidationError};
pub use repo::note_repo::{NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
pub use store::note_store::{NoteStore, StoreError, StoreResult};
pub use wordcount::calculate_word_count;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
