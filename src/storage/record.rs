use std::{collections::HashSet, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    models::{
        project::{Project, ProjectId, ValidationError, parse_deadline},
        sort::SortConfig,
    },
    storage::StorageError,
};

/// On-disk shape of a project. Deadlines stay strings here so that a bad
/// date is reported as such instead of as a JSON error.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StoredProject {
    pub id: ProjectId,
    pub name: String,
    pub deadline: String,
    pub client: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drive_link: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
}

impl From<&Project> for StoredProject {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            deadline: project.deadline.to_string(),
            client: project.client.clone(),
            description: project.description.clone(),
            notes: project.notes.clone(),
            drive_link: project.drive_link.clone(),
            is_completed: project.is_completed,
        }
    }
}

impl TryFrom<StoredProject> for Project {
    type Error = ValidationError;

    fn try_from(stored: StoredProject) -> Result<Self, Self::Error> {
        let project = Project {
            deadline: parse_deadline(&stored.deadline)?,
            id: stored.id,
            name: stored.name,
            client: stored.client,
            description: stored.description,
            notes: stored.notes,
            drive_link: stored.drive_link,
            is_completed: stored.is_completed,
        };
        project.check()?;
        Ok(project)
    }
}

pub fn to_json(projects: &[Project]) -> Result<String, StorageError> {
    let stored: Vec<StoredProject> = projects.iter().map(StoredProject::from).collect();
    serde_json::to_string_pretty(&stored).map_err(|e| StorageError::SerializeFailed { source: e })
}

/// Decodes a whole slot. Either every record converts or nothing is
/// returned.
pub fn from_json(content: &str, origin: &Path) -> Result<Vec<Project>, StorageError> {
    let stored: Vec<StoredProject> =
        serde_json::from_str(content).map_err(|e| StorageError::ParseFailed {
            path: origin.to_path_buf(),
            source: e,
        })?;

    let mut seen = HashSet::with_capacity(stored.len());
    let mut projects = Vec::with_capacity(stored.len());
    for record in stored {
        if !seen.insert(record.id.clone()) {
            return Err(ValidationError::DuplicateId(record.id).into());
        }
        projects.push(Project::try_from(record)?);
    }

    Ok(projects)
}

pub fn sort_to_json(sort: &SortConfig) -> Result<String, StorageError> {
    serde_json::to_string(sort).map_err(|e| StorageError::SerializeFailed { source: e })
}

pub fn sort_from_json(content: &str, origin: &Path) -> Result<SortConfig, StorageError> {
    serde_json::from_str(content).map_err(|e| StorageError::ParseFailed {
        path: origin.to_path_buf(),
        source: e,
    })
}
