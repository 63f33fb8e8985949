//! Persistence contracts over the `notes` table.

pub mod note_repo;
