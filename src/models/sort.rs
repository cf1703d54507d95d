use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::models::project::Project;

/// Column a project listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    Client,
    Deadline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// The sort currently applied to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortConfig {
    /// Direction to use when `key` is picked again: an ascending sort on the
    /// same key flips to descending, everything else starts ascending.
    pub fn next_direction(current: Option<SortConfig>, key: SortKey) -> SortDirection {
        match current {
            Some(SortConfig {
                key: current_key,
                direction: SortDirection::Asc,
            }) if current_key == key => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

impl SortKey {
    /// Ascending comparison. Text columns compare their lowercased forms
    /// code point by code point; deadlines compare chronologically.
    pub fn compare(self, a: &Project, b: &Project) -> Ordering {
        match self {
            SortKey::Name => compare_text(&a.name, &b.name),
            SortKey::Client => compare_text(&a.client, &b.client),
            SortKey::Deadline => a.deadline.cmp(&b.deadline),
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Stable in-place sort. Equal keys keep their relative order in both
/// directions.
pub fn sort_projects(projects: &mut [Project], key: SortKey, direction: SortDirection) {
    match direction {
        SortDirection::Asc => projects.sort_by(|a, b| key.compare(a, b)),
        SortDirection::Desc => projects.sort_by(|a, b| key.compare(b, a)),
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown sort key '{0}', expected one of: name, client, deadline")]
pub struct UnknownSortKey(String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "client" => Ok(SortKey::Client),
            "deadline" => Ok(SortKey::Deadline),
            other => Err(UnknownSortKey(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SortKey::Name => "name",
            SortKey::Client => "client",
            SortKey::Deadline => "deadline",
        };
        f.write_str(label)
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("ascending"),
            SortDirection::Desc => f.write_str("descending"),
        }
    }
}
