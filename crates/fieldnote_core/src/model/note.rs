//! Note domain model.
//!
//! # Responsibility
//! - Define the single persisted entity of the app.
//! - Derive `word_count` from content on every construction and edit.
//!
//! # Invariants
//! - `id` is stable, globally unique, and never reused.
//! - `created_at` is set once and never changes.
//! - `updated_at >= created_at` always.
//! - Content is never empty or whitespace-only once persisted.

use crate::wordcount::calculate_word_count;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for a note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = Uuid;

/// The single persisted entity: an identified block of text with
/// creation/update timestamps and a derived word count.
///
/// Serialized field names match the external `notes` schema naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Stable global ID, generated once at creation.
    pub id: NoteId,
    /// Note body. Non-empty after trimming.
    pub content: String,
    /// Unix epoch milliseconds, immutable after creation.
    pub created_at: i64,
    /// Unix epoch milliseconds, bumped on every content edit.
    pub updated_at: i64,
    /// Derived from `content`, never independently mutated.
    pub word_count: u32,
}

/// Validation failure for note construction and edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Content is empty or whitespace-only.
    EmptyContent,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "note content cannot be empty"),
        }
    }
}

impl Error for NoteValidationError {}

impl Note {
    /// Creates a new note with a generated id and current timestamps.
    ///
    /// # Invariants
    /// - `created_at == updated_at` on the returned note.
    /// - `word_count` is derived from the given content.
    ///
    /// # Errors
    /// - `NoteValidationError::EmptyContent` when content trims to empty.
    pub fn new(content: impl Into<String>) -> Result<Self, NoteValidationError> {
        let content = content.into();
        validate_content(&content)?;

        let now = now_ms();
        Ok(Self {
            id: Uuid::new_v4(),
            word_count: calculate_word_count(&content),
            content,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Rejects empty/whitespace-only note content.
pub(crate) fn validate_content(content: &str) -> Result<(), NoteValidationError> {
    if content.trim().is_empty() {
        return Err(NoteValidationError::EmptyContent);
    }
    Ok(())
}

/// Current wall-clock time in epoch milliseconds.
///
/// A clock set before the Unix epoch degrades to 0 rather than failing.
pub(crate) fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}
