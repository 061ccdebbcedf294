// src/util/testing.rs

use anyhow::Result;
use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::NoteStore;
use crate::domain::{DomainError, Note, NoteId, StoredNote};

/// Shared in-memory `NoteStore` for testing the storage role without a disk.
///
/// "Files" are plain bodies; `load` numbers them by position and `save`
/// replaces them with the saved bodies in id order, so a save followed by a
/// load behaves like the directory store.
///
/// # Examples
///
/// ```
/// use bulletin::application::NoteStore;
/// use bulletin::util::testing::InMemoryNoteStore;
///
/// let mut store = InMemoryNoteStore::builder()
///     .with_file_body("buy milk")
///     .build();
/// let notes = store.load().unwrap();
/// assert_eq!(notes[0].body, "buy milk");
/// ```
#[derive(Debug, Default)]
pub struct InMemoryNoteStore {
    files: Vec<String>,
    fail_load: bool,
    fail_save: bool,
    saved: Option<Vec<Note>>,
    save_calls: usize,
}

impl InMemoryNoteStore {
    pub fn builder() -> InMemoryNoteStoreBuilder {
        InMemoryNoteStoreBuilder::new()
    }

    /// Notes passed to the most recent successful `save`.
    pub fn saved(&self) -> Option<&[Note]> {
        self.saved.as_deref()
    }

    pub fn saved_bodies(&self) -> Vec<String> {
        self.saved
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|n| n.body.clone())
            .collect()
    }

    pub fn save_calls(&self) -> usize {
        self.save_calls
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }
}

impl NoteStore for InMemoryNoteStore {
    fn load(&mut self) -> Result<Vec<StoredNote>, DomainError> {
        if self.fail_load {
            return Err(DomainError::DirectoryCreation {
                path: PathBuf::from("memory"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "load disabled"),
            });
        }
        Ok(self
            .files
            .iter()
            .enumerate()
            .map(|(i, body)| StoredNote {
                id: NoteId(i as u64),
                body: body.clone(),
            })
            .collect())
    }

    fn save(&mut self, notes: &[Note]) -> Result<usize, DomainError> {
        self.save_calls += 1;
        if self.fail_save {
            return Err(DomainError::Write {
                path: PathBuf::from("memory"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "save disabled"),
            });
        }
        // Same id twice: the later note wins, as with overwritten files
        let by_id: BTreeMap<NoteId, &str> =
            notes.iter().map(|n| (n.id, n.body.as_str())).collect();
        self.files = by_id.into_values().map(str::to_string).collect();
        self.saved = Some(notes.to_vec());
        Ok(notes.len())
    }
}

/// Builder for InMemoryNoteStore
///
/// Provides a fluent interface for configuring mock behavior.
#[derive(Debug, Default)]
pub struct InMemoryNoteStoreBuilder {
    files: Vec<String>,
    fail_load: bool,
    fail_save: bool,
}

impl InMemoryNoteStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file whose content becomes the body of the next loaded note
    pub fn with_file_body(mut self, body: &str) -> Self {
        self.files.push(body.to_string());
        self
    }

    /// Make `load` fail as if the directory could not be created
    pub fn with_load_failure(mut self) -> Self {
        self.fail_load = true;
        self
    }

    /// Make `save` fail with a write error
    pub fn with_save_failure(mut self) -> Self {
        self.fail_save = true;
        self
    }

    pub fn build(self) -> InMemoryNoteStore {
        InMemoryNoteStore {
            files: self.files,
            fail_load: self.fail_load,
            fail_save: self.fail_save,
            ..Default::default()
        }
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Create a filter for noisy modules
    let noisy_modules = ["mio", "tokio"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Set up the subscriber with environment filter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Build and set the subscriber
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
