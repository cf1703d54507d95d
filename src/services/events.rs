use std::fmt;

use crate::models::{
    project::{Project, ProjectId},
    sort::SortConfig,
};

/// Emitted after every successful mutation of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Created { id: ProjectId, name: String },
    Updated { id: ProjectId, name: String },
    Deleted { id: ProjectId, name: String },
    Completed { id: ProjectId, name: String },
    Reopened { id: ProjectId, name: String },
    Sorted(SortConfig),
}

/// Callback receiving each event together with the collection as it is
/// after the change.
pub type Subscriber = Box<dyn FnMut(&StoreEvent, &[Project])>;

impl StoreEvent {
    pub fn created(project: &Project) -> Self {
        StoreEvent::Created {
            id: project.id.clone(),
            name: project.name.clone(),
        }
    }

    pub fn updated(project: &Project) -> Self {
        StoreEvent::Updated {
            id: project.id.clone(),
            name: project.name.clone(),
        }
    }

    pub fn deleted(project: &Project) -> Self {
        StoreEvent::Deleted {
            id: project.id.clone(),
            name: project.name.clone(),
        }
    }

    pub fn toggled(project: &Project) -> Self {
        let id = project.id.clone();
        let name = project.name.clone();
        if project.is_completed {
            StoreEvent::Completed { id, name }
        } else {
            StoreEvent::Reopened { id, name }
        }
    }

    /// Project the event is about, if any.
    pub fn project_id(&self) -> Option<&ProjectId> {
        match self {
            StoreEvent::Created { id, .. }
            | StoreEvent::Updated { id, .. }
            | StoreEvent::Deleted { id, .. }
            | StoreEvent::Completed { id, .. }
            | StoreEvent::Reopened { id, .. } => Some(id),
            StoreEvent::Sorted(_) => None,
        }
    }
}

impl fmt::Display for StoreEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreEvent::Created { name, .. } => {
                write!(f, "Project \"{}\" added successfully!", name)
            }
            StoreEvent::Updated { name, .. } => {
                write!(f, "Project \"{}\" updated successfully!", name)
            }
            StoreEvent::Deleted { name, .. } => write!(f, "Project \"{}\" deleted", name),
            StoreEvent::Completed { name, .. } => {
                write!(f, "Project \"{}\" marked as complete", name)
            }
            StoreEvent::Reopened { name, .. } => {
                write!(f, "Project \"{}\" moved back to ongoing projects", name)
            }
            StoreEvent::Sorted(config) => {
                write!(f, "Projects sorted by {} ({})", config.key, config.direction)
            }
        }
    }
}
