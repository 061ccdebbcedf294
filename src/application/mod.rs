// src/application/mod.rs
pub mod note_list;
pub mod protocol;
pub mod storage_session;
pub mod ui_session;

pub use note_list::{NoteList, NoteOperations};
pub use protocol::{link, StorageLink, UiLink};
pub use storage_session::{NoteStore, StorageSession};
pub use ui_session::{Action, ActionSource, ParseActionError, UiSession};
