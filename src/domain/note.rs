// src/domain/note.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Session-scoped note identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub u64);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for NoteId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub pin_status: bool,
}

impl Note {
    /// Fresh note as produced by "Add New": empty body, not pinned.
    pub fn new(id: NoteId) -> Self {
        Self {
            id,
            body: String::new(),
            pin_status: false,
        }
    }
}

/// A note as reconstructed from disk. Pin state is not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredNote {
    pub id: NoteId,
    pub body: String,
}

impl From<StoredNote> for Note {
    fn from(stored: StoredNote) -> Self {
        Self {
            id: stored.id,
            body: stored.body,
            pin_status: false,
        }
    }
}

impl From<&Note> for StoredNote {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id,
            body: note.body.clone(),
        }
    }
}
