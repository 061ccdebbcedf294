// src/infrastructure/mod.rs
pub mod config;
pub mod notes_dir;
pub mod wire;

pub use config::Config;
pub use notes_dir::FileNoteStore;
