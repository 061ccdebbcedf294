// src/domain/mod.rs
pub mod error;
pub mod id;
pub mod message;
pub mod note;

pub use error::DomainError;
pub use id::{IdGenerator, IdStrategy};
pub use message::{StorageEvent, UiEvent};
pub use note::{Note, NoteId, StoredNote};
