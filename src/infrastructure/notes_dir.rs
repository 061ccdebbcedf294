// src/infrastructure/notes_dir.rs
use crate::application::NoteStore;
use crate::constants::NOTE_FILE_SUFFIX;
use crate::domain::{DomainError, Note, NoteId, StoredNote};
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

static NOTE_FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)-note\.txt$").expect("valid note file pattern"));

/// Parse the id out of a `<id>-note.txt` file name.
pub fn note_file_id(file_name: &str) -> Option<NoteId> {
    NOTE_FILE_RE
        .captures(file_name)
        .and_then(|caps| caps[1].parse::<u64>().ok())
        .map(NoteId)
}

fn is_note_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(note_file_id)
        .is_some()
}

/// Note files by numeric id first, anything else after them by name.
fn load_order(path: &Path) -> (u8, u64, String) {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match note_file_id(&name) {
        Some(id) => (0, id.0, name),
        None => (1, 0, name),
    }
}

/// One text file per note inside a single directory.
#[derive(Debug, Clone)]
pub struct FileNoteStore {
    dir: PathBuf,
    prune_stale: bool,
    /// Files loaded as notes that are not named `<id>-note.txt`.
    strays: Vec<PathBuf>,
}

impl FileNoteStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            prune_stale: true,
            strays: Vec::new(),
        }
    }

    /// Remove `<id>-note.txt` files absent from the saved snapshot.
    pub fn with_prune_stale(mut self, prune_stale: bool) -> Self {
        self.prune_stale = prune_stale;
        self
    }

    pub fn note_path(&self, id: NoteId) -> PathBuf {
        self.dir.join(format!("{id}{NOTE_FILE_SUFFIX}"))
    }

    /// Create the directory if needed. An existing directory is fine.
    pub fn ensure_dir(&self) -> Result<(), DomainError> {
        match fs::create_dir_all(&self.dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && self.dir.is_dir() => Ok(()),
            Err(source) => Err(DomainError::DirectoryCreation {
                path: self.dir.clone(),
                source,
            }),
        }
    }

    fn list_files(&self) -> Result<Vec<PathBuf>, DomainError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(DomainError::DirectoryListing {
                        path: self.dir.clone(),
                        message: e.to_string(),
                    })
                }
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable directory entry");
                    continue;
                }
            };
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        files.sort_by_cached_key(|p| load_order(p));
        Ok(files)
    }

    fn prune(&self, keep: &HashSet<NoteId>) -> Result<(), DomainError> {
        for path in self.list_files()? {
            let Some(id) = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(note_file_id)
            else {
                continue;
            };
            if keep.contains(&id) {
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => debug!(path = %path.display(), "Removed stale note file"),
                Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove stale note file"),
            }
        }
        Ok(())
    }

    /// Stray files were rewritten as `<id>-note.txt`; drop the originals.
    fn absorb_strays(&mut self) {
        for path in self.strays.drain(..) {
            match fs::remove_file(&path) {
                Ok(()) => debug!(path = %path.display(), "Removed absorbed stray file"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove stray file"),
            }
        }
    }
}

impl NoteStore for FileNoteStore {
    #[instrument(level = "debug", skip(self), fields(dir = %self.dir.display()))]
    fn load(&mut self) -> Result<Vec<StoredNote>, DomainError> {
        self.ensure_dir()?;
        self.strays.clear();
        let mut notes = Vec::new();
        for path in self.list_files()? {
            match fs::read_to_string(&path) {
                Ok(body) => {
                    if !is_note_file(&path) {
                        self.strays.push(path);
                    }
                    notes.push(StoredNote {
                        id: NoteId(notes.len() as u64),
                        body,
                    })
                }
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable note file"),
            }
        }
        if !self.strays.is_empty() {
            debug!(count = self.strays.len(), "Loaded files outside the note naming scheme");
        }
        Ok(notes)
    }

    #[instrument(level = "debug", skip_all, fields(dir = %self.dir.display(), count = notes.len()))]
    fn save(&mut self, notes: &[Note]) -> Result<usize, DomainError> {
        self.ensure_dir()?;
        for note in notes {
            let path = self.note_path(note.id);
            fs::write(&path, &note.body).map_err(|source| DomainError::Write {
                path: path.clone(),
                source,
            })?;
            debug!(path = %path.display(), "Wrote note");
        }
        if self.prune_stale {
            let keep: HashSet<NoteId> = notes.iter().map(|n| n.id).collect();
            self.prune(&keep)?;
        }
        self.absorb_strays();
        info!(written = notes.len(), "Notes directory updated");
        Ok(notes.len())
    }
}
