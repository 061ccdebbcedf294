// src/application/storage_session.rs
use crate::application::protocol::StorageLink;
use crate::domain::{DomainError, Note, StorageEvent, StoredNote, UiEvent};
use tracing::{debug, error, info, instrument};

/// Persistence port for the storage role.
pub trait NoteStore {
    /// Make sure the notes directory exists and reconstruct notes from it.
    fn load(&mut self) -> Result<Vec<StoredNote>, DomainError>;

    /// Write one file per note. Returns the number of notes written.
    fn save(&mut self, notes: &[Note]) -> Result<usize, DomainError>;
}

/// State the storage role keeps for one application lifetime.
pub struct StorageSession<S: NoteStore> {
    store: S,
    snapshot: Option<Vec<Note>>,
}

impl<S: NoteStore> StorageSession<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            snapshot: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Last snapshot pushed by the UI, if any arrived.
    pub fn snapshot(&self) -> Option<&[Note]> {
        self.snapshot.as_deref()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn on_window_ready(&mut self) -> Result<Vec<StoredNote>, DomainError> {
        let notes = self.store.load()?;
        info!(count = notes.len(), "Loaded notes");
        Ok(notes)
    }

    /// Last write wins.
    pub fn on_data(&mut self, notes: Vec<Note>) {
        debug!(count = notes.len(), "Holding snapshot");
        self.snapshot = Some(notes);
    }

    /// Persist the held snapshot. Without one, the directory is left alone.
    #[instrument(level = "debug", skip(self))]
    pub fn on_shutdown(&mut self) -> Result<usize, DomainError> {
        let Some(notes) = self.snapshot.as_deref() else {
            info!("No snapshot received, nothing to save");
            return Ok(0);
        };
        match self.store.save(notes) {
            Ok(written) => {
                info!(written, "Saved notes");
                Ok(written)
            }
            Err(e) => {
                error!(error = %e, "Saving notes failed");
                Err(e)
            }
        }
    }

    /// Serve the UI until it closes, then save.
    pub async fn run(&mut self, mut link: StorageLink) -> Result<usize, DomainError> {
        loop {
            match link.recv().await {
                UiEvent::Ready => {
                    let notes = self.on_window_ready().map_err(|e| {
                        error!(error = %e, "Initial load failed");
                        e
                    })?;
                    link.send(StorageEvent::Data(notes));
                }
                UiEvent::Data(notes) => self.on_data(notes),
                UiEvent::Close => break,
            }
        }
        self.on_shutdown()
    }
}
