use std::path::{Path, PathBuf};

use crate::storage::{Seed, json::DEFAULT_BACKUPS_TO_KEEP, json::JsonFileStorage};

/// Environment variable that overrides the store location.
pub const STORE_ENV: &str = "PROJDESK_STORE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON file holding the project collection
    pub store_path: PathBuf,
    /// How many previous versions of the store file are kept
    pub backups_to_keep: usize,
    /// Collection used when the store file is missing or unreadable
    pub seed: Seed,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: Self::default_store_path(),
            backups_to_keep: DEFAULT_BACKUPS_TO_KEEP,
            seed: Seed::Empty,
        }
    }
}

impl Config {
    /// `<local data dir>/projdesk/projects.json`, or `./projdesk/projects.json`
    /// when the platform has no data dir.
    pub fn default_store_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("projdesk")
            .join("projects.json")
    }

    pub fn with_store_path(mut self, store_path: Option<PathBuf>) -> Self {
        if let Some(path) = store_path {
            self.store_path = path;
        }
        self
    }

    pub fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = seed;
        self
    }

    /// Creates the directory the store file lives in.
    pub fn ensure_store_dir(&self) -> std::io::Result<()> {
        match self.store_path.parent() {
            Some(parent) if parent != Path::new("") => std::fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }

    pub fn storage(&self) -> JsonFileStorage {
        JsonFileStorage::new(self.store_path.clone()).with_backups_to_keep(self.backups_to_keep)
    }
}
