//! SQLite storage bootstrap and the process-wide persistence gateway.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the note store.
//! - Guarantee the `notes` table exists before first use.
//! - Hand out the shared, lazily-initialized database handle.
//!
//! # Invariants
//! - Schema creation is idempotent (`CREATE TABLE IF NOT EXISTS`).
//! - Core code must not read/write note data before bootstrap succeeds.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod gateway;
mod open;

pub use gateway::Database;
pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The shared handle's mutex was poisoned by a panicking holder.
    HandlePoisoned,
    /// `configure_db_path` was called with a path that conflicts with the
    /// already-active one.
    PathConflict {
        active: PathBuf,
        requested: PathBuf,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::HandlePoisoned => write!(f, "shared database handle is poisoned"),
            Self::PathConflict { active, requested } => write!(
                f,
                "database path already configured as `{}`; refusing to switch to `{}`",
                active.display(),
                requested.display()
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::HandlePoisoned | Self::PathConflict { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
