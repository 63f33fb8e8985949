//! Process-wide persistence gateway.
//!
//! # Responsibility
//! - Own the single lazily-created database handle shared by all callers.
//! - Guarantee the open + schema step runs at most once per process lifetime.
//!
//! # Invariants
//! - All callers of `get_database` observe the same handle.
//! - A failed initialization leaves the singleton empty, so the next call
//!   retries instead of observing a permanently poisoned handle.
//! - The database path cannot change after it has been pinned.

use super::open::open_db;
use super::{DbError, DbResult};
use once_cell::sync::OnceCell;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

const DEFAULT_DB_FILE_NAME: &str = "fieldnote.sqlite3";

/// Shared handle to the on-device store.
///
/// The mutex serializes access; the gateway performs no locking of its own
/// beyond handing out this handle.
pub type Database = Arc<Mutex<Connection>>;

static DB_PATH: OnceCell<PathBuf> = OnceCell::new();
static DB_HANDLE: OnceCell<Database> = OnceCell::new();

/// Pins the database file location before the first open.
///
/// Idempotent for the same path. Once the path is active (explicitly or via
/// the first `get_database` call using the default), a different path is
/// rejected with `DbError::PathConflict`.
pub fn configure_db_path(path: impl AsRef<Path>) -> DbResult<()> {
    let requested = path.as_ref().to_path_buf();
    let active = DB_PATH.get_or_init(|| requested.clone());
    if *active != requested {
        return Err(DbError::PathConflict {
            active: active.clone(),
            requested,
        });
    }
    Ok(())
}

/// Returns the shared database handle, opening it on first use.
///
/// Memoizes the handle behind a `OnceCell`: concurrent first callers all
/// observe a single open + schema-creation attempt. If that attempt fails the
/// error propagates and the cell stays empty, so a later call retries.
pub fn get_database() -> DbResult<Database> {
    let handle = DB_HANDLE.get_or_try_init(|| -> DbResult<Database> {
        let path = DB_PATH
            .get_or_init(|| PathBuf::from(DEFAULT_DB_FILE_NAME))
            .clone();
        let conn = open_db(path)?;
        Ok(Arc::new(Mutex::new(conn)))
    })?;
    Ok(Arc::clone(handle))
}

/// Forces gateway initialization without returning the handle.
///
/// Called at process startup so the first UI interaction never pays the
/// open + schema cost synchronously.
pub fn init_database() -> DbResult<()> {
    get_database().map(|_| ())
}
