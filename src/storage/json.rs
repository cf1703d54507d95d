use std::{
    fs::{self, OpenOptions, rename, write},
    path::{Path, PathBuf},
};

use fs2::FileExt;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    models::{project::Project, sort::SortConfig},
    storage::{Storage, StorageError, record},
};

pub const DEFAULT_BACKUPS_TO_KEEP: usize = 5;

/// Slot stored as a single JSON file. Every save keeps a copy of the
/// previous file under `backups/` next to it. The last sort lives in a
/// separate `<name>.view.json` file so the slot itself stays a bare array.
pub struct JsonFileStorage {
    path: PathBuf,
    backups_to_keep: usize,
}

impl JsonFileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            backups_to_keep: DEFAULT_BACKUPS_TO_KEEP,
        }
    }

    pub fn with_backups_to_keep(mut self, backups_to_keep: usize) -> Self {
        self.backups_to_keep = backups_to_keep;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sort_path(&self) -> PathBuf {
        self.path.with_extension("view.json")
    }

    /// Swaps the written temp file in under the lock, backing up the file it
    /// replaces.
    fn replace_with(&self, temp_path: &Path) -> Result<(), StorageError> {
        let lock_file_path = self.path.with_extension("lock");
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_file_path)
            .map_err(|e| StorageError::SaveFailed {
                path: lock_file_path.clone(),
                source: e,
            })?;
        lock_file
            .lock_exclusive()
            .map_err(|e| StorageError::SaveFailed {
                path: lock_file_path,
                source: e,
            })?;

        self.create_backup()?;
        self.cleanup_old_backups()?;

        rename(temp_path, &self.path).map_err(|e| StorageError::SaveFailed {
            path: self.path.clone(),
            source: e,
        })?;

        lock_file.unlock().map_err(|e| StorageError::SaveFailed {
            path: self.path.clone(),
            source: e,
        })
    }

    fn create_backup_dir(&self) -> Result<(), StorageError> {
        let backups_dir = self.get_backup_dir();
        fs::create_dir(&backups_dir).map_err(|e| StorageError::BackupFailed {
            path: backups_dir,
            source: e,
        })?;
        Ok(())
    }

    fn create_backup(&self) -> Result<u64, StorageError> {
        let file_exists = fs::exists(&self.path).map_err(|e| StorageError::BackupFailed {
            path: self.path.clone(),
            source: e,
        })?;
        if !file_exists {
            return Ok(0);
        }

        let backup_path = self.get_backup_path();
        match fs::copy(&self.path, &backup_path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.create_backup_dir()?;
                self.create_backup()
            }
            Err(e) => Err(StorageError::BackupFailed {
                path: backup_path,
                source: e,
            }),
            Ok(bytes) => Ok(bytes),
        }
    }

    fn cleanup_old_backups(&self) -> Result<(), StorageError> {
        let backup_dir = self.get_backup_dir();
        let backup_dir_exists =
            fs::exists(&backup_dir).map_err(|e| StorageError::CleanupFailed {
                dir: backup_dir.clone(),
                source: e,
            })?;
        if !backup_dir_exists {
            return Ok(());
        }

        let mut file_entries = fs::read_dir(&backup_dir)
            .map_err(|e| StorageError::CleanupFailed {
                dir: backup_dir.clone(),
                source: e,
            })?
            .flatten()
            .filter(|entry| entry.metadata().map(|m| m.is_file()).unwrap_or(false))
            .map(|entry| entry.path())
            .collect::<Vec<_>>();

        // Names end in zero-padded nanoseconds, so lexical order is age order
        file_entries.sort();

        let number_of_files_to_delete = file_entries.len().saturating_sub(self.backups_to_keep);
        if number_of_files_to_delete == 0 {
            return Ok(());
        }

        for file_path in &file_entries[0..number_of_files_to_delete] {
            debug!(path = ?file_path, "Removing old backup");
            fs::remove_file(file_path).map_err(|e| StorageError::CleanupFailed {
                dir: backup_dir.clone(),
                source: e,
            })?;
        }

        Ok(())
    }

    fn get_backup_dir(&self) -> PathBuf {
        let parent_store_path = self.path.parent().unwrap_or(Path::new("."));
        parent_store_path.join("backups")
    }

    fn get_backup_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("projects.json"));
        let nanos = jiff::Timestamp::now().as_nanosecond();

        self.get_backup_dir()
            .join(format!("{}-{:020}", file_name, nanos))
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> Result<Option<Vec<Project>>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => record::from_json(&content, &self.path).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::LoadFailed {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    fn save(&self, projects: &[Project]) -> Result<(), StorageError> {
        let json = record::to_json(projects)?;

        let temp_path = temp_path_for(&self.path);
        let result =
            write_temp(&temp_path, &json).and_then(|()| self.replace_with(&temp_path));
        if result.is_err() {
            discard_temp(&temp_path);
        }
        result?;

        debug!(path = ?self.path, count = projects.len(), "Saved projects");
        Ok(())
    }

    fn load_sort(&self) -> Result<Option<SortConfig>, StorageError> {
        let sort_path = self.sort_path();
        match fs::read_to_string(&sort_path) {
            Ok(content) => record::sort_from_json(&content, &sort_path).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::LoadFailed {
                path: sort_path,
                source: e,
            }),
        }
    }

    fn save_sort(&self, sort: Option<SortConfig>) -> Result<(), StorageError> {
        let sort_path = self.sort_path();
        let Some(sort) = sort else {
            return match fs::remove_file(&sort_path) {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
                    Err(StorageError::SaveFailed {
                        path: sort_path,
                        source: e,
                    })
                }
                _ => Ok(()),
            };
        };

        let json = record::sort_to_json(&sort)?;
        let temp_path = temp_path_for(&sort_path);
        let result = write_temp(&temp_path, &json).and_then(|()| {
            rename(&temp_path, &sort_path).map_err(|e| StorageError::SaveFailed {
                path: sort_path.clone(),
                source: e,
            })
        });
        if result.is_err() {
            discard_temp(&temp_path);
        }
        result?;

        debug!(path = ?sort_path, key = %sort.key, direction = %sort.direction, "Saved sort");
        Ok(())
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    PathBuf::from(format!("{}.tmp.{}", path.display(), Uuid::new_v4()))
}

fn write_temp(temp_path: &Path, content: &str) -> Result<(), StorageError> {
    write(temp_path, content).map_err(|e| StorageError::SaveFailed {
        path: temp_path.to_path_buf(),
        source: e,
    })
}

/// Removes the temp file of a save that did not go through.
fn discard_temp(temp_path: &Path) {
    match fs::remove_file(temp_path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
            warn!(path = ?temp_path, error = %e, "Could not remove temp file");
        }
        _ => {}
    }
}
