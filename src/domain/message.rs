// src/domain/message.rs
use crate::domain::{Note, StoredNote};
use serde::{Deserialize, Serialize};

/// Messages sent by the UI role to the storage role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "channel", content = "payload", rename_all = "lowercase")]
pub enum UiEvent {
    /// The window finished its initial load.
    Ready,
    /// Full snapshot of the current list.
    Data(Vec<Note>),
    /// Terminate the application.
    Close,
}

/// Messages sent by the storage role to the UI role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "channel", content = "payload", rename_all = "lowercase")]
pub enum StorageEvent {
    /// Notes reconstructed from disk, sent once in reply to `Ready`.
    Data(Vec<StoredNote>),
}
