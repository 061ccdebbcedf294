use anyhow::{Context, Result};
use bulletin::application::{Action, ActionSource, StorageSession};
use bulletin::constants::NOTES_DIR_NAME;
use bulletin::domain::IdStrategy;
use bulletin::infrastructure::FileNoteStore;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture: a notes directory inside a temporary "documents" folder
#[allow(dead_code)]
pub struct TestNotesDir {
    _temp_dir: TempDir,
    pub documents: PathBuf,
    pub notes_dir: PathBuf,
}

#[allow(dead_code)]
impl TestNotesDir {
    /// Create a fixture; the notes directory itself does not exist yet
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let documents = temp_dir.path().join("documents");
        std::fs::create_dir_all(&documents).context("Failed to create documents directory")?;
        let notes_dir = documents.join(NOTES_DIR_NAME);

        Ok(Self {
            _temp_dir: temp_dir,
            documents,
            notes_dir,
        })
    }

    /// Create a fixture with the given note files already on disk
    pub fn with_files(files: &[(&str, &str)]) -> Result<Self> {
        let fixture = Self::new()?;
        std::fs::create_dir_all(&fixture.notes_dir)?;
        for (name, body) in files {
            std::fs::write(fixture.notes_dir.join(name), body)?;
        }
        Ok(fixture)
    }

    pub fn store(&self) -> FileNoteStore {
        FileNoteStore::new(&self.notes_dir)
    }

    pub fn read(&self, name: &str) -> Result<String> {
        std::fs::read_to_string(self.notes_dir.join(name))
            .with_context(|| format!("Failed to read {name}"))
    }

    /// File names in the notes directory, sorted
    pub fn file_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.notes_dir)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    /// Run one full session (load, apply actions, save) against this directory
    pub async fn session(
        &self,
        strategy: IdStrategy,
        actions: Vec<Action>,
    ) -> Result<(StorageSession<FileNoteStore>, String)> {
        let mut out = Vec::new();
        let storage = bulletin::run_session(
            self.store(),
            strategy,
            ActionSource::script(actions),
            &mut out,
        )
        .await?;
        Ok((storage, String::from_utf8(out)?))
    }

    pub fn path(&self) -> &Path {
        &self.notes_dir
    }
}
