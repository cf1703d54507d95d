// projdesk - track a handful of projects with deadlines, clients and notes

pub mod config;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;
pub mod ui;

// Re-export main types for convenience
pub use config::Config;
pub use export::{ExportDocument, ExportFormat, Section};
pub use models::project::{Project, ProjectId, ProjectInput, ValidationError};
pub use models::sort::{SortConfig, SortDirection, SortKey};
pub use services::events::StoreEvent;
pub use services::projects::{Applied, LookupError, ProjectStore, StoreError};
pub use storage::{Seed, Storage, StorageError};
