// src/domain/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Failed to create notes directory {path}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to list notes directory {path}: {message}")]
    DirectoryListing { path: PathBuf, message: String },
    #[error("Failed to write note file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Channel closed: {0}")]
    ChannelClosed(String),
    #[error("Protocol error: {0}")]
    Protocol(String),
}
