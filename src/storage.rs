use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};

use crate::models::{
    project::{Project, ValidationError},
    sort::SortConfig,
};

pub mod json;
pub mod memory;
pub mod record;
pub mod seed;

pub use seed::Seed;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to load projects from '{path}': {source}")]
    LoadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON from '{path}': {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to save projects to '{path}': {source}")]
    SaveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize projects to JSON: {source}")]
    SerializeFailed {
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to create backup at '{path}': {source}")]
    BackupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to cleanup old backups in '{dir}': {source}")]
    CleanupFailed {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Stored projects are invalid: {0}")]
    Invalid(#[from] ValidationError),
}

/// A durable slot holding the whole project collection, plus the sort the
/// collection was last ordered by.
pub trait Storage {
    /// Reads the slot. `Ok(None)` means nothing was ever saved.
    fn load(&self) -> Result<Option<Vec<Project>>, StorageError>;

    /// Replaces the slot content with `projects`.
    fn save(&self, projects: &[Project]) -> Result<(), StorageError>;

    /// Reads the saved sort. `Ok(None)` means no explicit sort was saved.
    fn load_sort(&self) -> Result<Option<SortConfig>, StorageError>;

    /// Replaces the saved sort. `None` clears it.
    fn save_sort(&self, sort: Option<SortConfig>) -> Result<(), StorageError>;
}

impl<T: Storage + ?Sized> Storage for &T {
    fn load(&self) -> Result<Option<Vec<Project>>, StorageError> {
        (**self).load()
    }

    fn save(&self, projects: &[Project]) -> Result<(), StorageError> {
        (**self).save(projects)
    }

    fn load_sort(&self) -> Result<Option<SortConfig>, StorageError> {
        (**self).load_sort()
    }

    fn save_sort(&self, sort: Option<SortConfig>) -> Result<(), StorageError> {
        (**self).save_sort(sort)
    }
}

/// Collection a session starts from.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub projects: Vec<Project>,
    /// `true` when the slot had nothing usable and `projects` is the seed,
    /// so the slot does not hold it yet.
    pub seeded: bool,
}

impl Loaded {
    fn from_slot(projects: Vec<Project>) -> Self {
        Self {
            projects,
            seeded: false,
        }
    }

    fn from_seed(seed: Seed) -> Self {
        Self {
            projects: seed.projects(),
            seeded: true,
        }
    }
}

/// Loads the collection, falling back to `seed` when the slot is absent or
/// cannot be read or parsed. Records that parse but break an invariant (bad
/// deadline, blank name, bad link, repeated id) are reported instead of being
/// replaced.
pub fn load_or_seed(storage: &impl Storage, seed: Seed) -> Result<Loaded, ValidationError> {
    match storage.load() {
        Ok(Some(projects)) => {
            info!(count = projects.len(), "Loaded projects");
            Ok(Loaded::from_slot(projects))
        }
        Ok(None) => {
            info!(?seed, "No saved projects, starting from seed");
            Ok(Loaded::from_seed(seed))
        }
        Err(StorageError::Invalid(e)) => Err(e),
        Err(e) => {
            warn!(error = %e, ?seed, "Could not read saved projects, starting from seed");
            Ok(Loaded::from_seed(seed))
        }
    }
}

/// Loads the saved sort. A sort that cannot be read is dropped with a warning
/// and the session starts with the default order.
pub fn load_sort_or_default(storage: &impl Storage) -> Option<SortConfig> {
    match storage.load_sort() {
        Ok(sort) => sort,
        Err(e) => {
            warn!(error = %e, "Could not read saved sort, using default order");
            None
        }
    }
}
