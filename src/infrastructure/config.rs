// src/infrastructure/config.rs
use crate::constants::NOTES_DIR_NAME;
use crate::domain::IdStrategy;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// TOML configuration for the bulletin board
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub notes: NotesConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Notes directory; defaults to `<documents>/BulletinBoard`
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default = "default_prune_stale")]
    pub prune_stale: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct NotesConfig {
    #[serde(default)]
    pub id_strategy: IdStrategy,
}

fn default_prune_stale() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            prune_stale: default_prune_stale(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content).context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// Notes directory: explicit override, then config, then the default.
    pub fn notes_dir(&self, override_dir: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = override_dir {
            return Ok(dir.to_path_buf());
        }
        if let Some(dir) = &self.storage.dir {
            return Ok(dir.clone());
        }
        default_notes_dir()
    }
}

pub fn default_notes_dir() -> Result<PathBuf> {
    let documents = match dirs::document_dir() {
        Some(dir) => dir,
        None => dirs::home_dir()
            .context("Could not find home directory")?
            .join("Documents"),
    };
    Ok(documents.join(NOTES_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn given_toml_file_when_loading_then_reads_values() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bulletin.toml");

        let toml_content = r#"
[storage]
dir = "/tmp/notes"
prune_stale = false

[notes]
id_strategy = "list-length"
"#;
        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load(&config_path).unwrap();

        assert_eq!(config.storage.dir, Some(PathBuf::from("/tmp/notes")));
        assert!(!config.storage.prune_stale);
        assert_eq!(config.notes.id_strategy, IdStrategy::ListLength);
    }

    #[test]
    fn given_partial_toml_when_loading_then_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("partial.toml");
        fs::write(&config_path, "[notes]\n").unwrap();

        let config = Config::load(&config_path).unwrap();

        assert_eq!(config.storage.dir, None);
        assert!(config.storage.prune_stale);
        assert_eq!(config.notes.id_strategy, IdStrategy::Monotonic);
    }

    #[test]
    fn given_unknown_strategy_when_loading_then_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad.toml");
        fs::write(&config_path, "[notes]\nid_strategy = \"random\"\n").unwrap();

        assert!(Config::load(&config_path).is_err());
    }

    #[test]
    fn given_nonexistent_file_when_loading_then_returns_error() {
        let result = Config::load("/nonexistent/path/bulletin.toml");

        assert!(result.is_err());
    }

    #[test]
    fn given_override_when_resolving_dir_then_override_wins() {
        let config = Config {
            storage: StorageConfig {
                dir: Some(PathBuf::from("/from/config")),
                ..Default::default()
            },
            ..Default::default()
        };

        let dir = config.notes_dir(Some(Path::new("/from/cli"))).unwrap();
        assert_eq!(dir, PathBuf::from("/from/cli"));

        let dir = config.notes_dir(None).unwrap();
        assert_eq!(dir, PathBuf::from("/from/config"));
    }
}
