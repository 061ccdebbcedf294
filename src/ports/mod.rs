// src/ports/mod.rs
pub mod views;

pub use views::{Board, EntryIntent, NoteEntry, PinnedEntry, Sidebar};
