//! UI-facing note state, kept consistent with durable storage.

pub mod note_store;
