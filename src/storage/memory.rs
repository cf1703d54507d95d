use std::{cell::RefCell, path::Path};

use crate::{
    models::{project::Project, sort::SortConfig},
    storage::{Storage, StorageError, record},
};

const ORIGIN: &str = "<memory>";

/// Slot kept in memory, holding the same JSON a file slot would.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    content: RefCell<Option<String>>,
    sort: RefCell<Option<String>>,
}

impl MemoryStorage {
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: RefCell::new(Some(content.into())),
            ..Self::default()
        }
    }

    pub fn with_sort_content(self, sort: impl Into<String>) -> Self {
        *self.sort.borrow_mut() = Some(sort.into());
        self
    }

    /// Raw JSON currently in the slot.
    pub fn content(&self) -> Option<String> {
        self.content.borrow().clone()
    }

    /// Raw JSON of the saved sort.
    pub fn sort_content(&self) -> Option<String> {
        self.sort.borrow().clone()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<Project>>, StorageError> {
        match self.content.borrow().as_deref() {
            Some(content) => record::from_json(content, Path::new(ORIGIN)).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, projects: &[Project]) -> Result<(), StorageError> {
        let json = record::to_json(projects)?;
        *self.content.borrow_mut() = Some(json);
        Ok(())
    }

    fn load_sort(&self) -> Result<Option<SortConfig>, StorageError> {
        match self.sort.borrow().as_deref() {
            Some(content) => record::sort_from_json(content, Path::new(ORIGIN)).map(Some),
            None => Ok(None),
        }
    }

    fn save_sort(&self, sort: Option<SortConfig>) -> Result<(), StorageError> {
        let json = sort.as_ref().map(record::sort_to_json).transpose()?;
        *self.sort.borrow_mut() = json;
        Ok(())
    }
}
