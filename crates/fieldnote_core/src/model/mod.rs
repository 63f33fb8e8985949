//! Domain models shared across persistence and store layers.

pub mod note;
