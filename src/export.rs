//! Downloadable views of the ongoing or completed projects.
//!
//! Every row carries the same columns, in this order: `Project Name`,
//! `Deadline`, `Client`, `Description`, `Notes`, `Link`, `Status`. Missing
//! notes and links are written as `No notes` and `No link`.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use jiff::civil::Date;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::{models::project::Project, services::projects::ProjectStore, storage::Storage};

pub const COLUMNS: [&str; 7] = [
    "Project Name",
    "Deadline",
    "Client",
    "Description",
    "Notes",
    "Link",
    "Status",
];

pub const NO_NOTES: &str = "No notes";
pub const NO_LINK: &str = "No link";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to encode export: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write export to '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Pretty printed array of row objects.
    #[default]
    Json,
    /// One row object per line.
    JsonLines,
    /// Header line then one line per row.
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::JsonLines => "jsonl",
            ExportFormat::Csv => "csv",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown export format '{0}', expected one of: json, jsonl, csv")]
pub struct UnknownExportFormat(String);

impl FromStr for ExportFormat {
    type Err = UnknownExportFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "jsonl" | "ndjson" => Ok(ExportFormat::JsonLines),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(UnknownExportFormat(other.to_string())),
        }
    }
}

/// Which half of the table is exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Ongoing,
    Completed,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Ongoing => f.write_str("ongoing"),
            Section::Completed => f.write_str("completed"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown section '{0}', expected ongoing or completed")]
pub struct UnknownSection(String);

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ongoing" => Ok(Section::Ongoing),
            "completed" | "done" => Ok(Section::Completed),
            other => Err(UnknownSection(other.to_string())),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    #[serde(rename = "Project Name")]
    pub name: String,
    #[serde(rename = "Deadline")]
    pub deadline: String,
    #[serde(rename = "Client")]
    pub client: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Notes")]
    pub notes: String,
    #[serde(rename = "Link")]
    pub link: String,
    #[serde(rename = "Status")]
    pub status: String,
}

impl ExportRow {
    fn cells(&self) -> [&str; 7] {
        [
            self.name.as_str(),
            self.deadline.as_str(),
            self.client.as_str(),
            self.description.as_str(),
            self.notes.as_str(),
            self.link.as_str(),
            self.status.as_str(),
        ]
    }
}

impl From<&Project> for ExportRow {
    fn from(project: &Project) -> Self {
        let notes = match project.notes.as_deref() {
            Some(notes) if !notes.is_empty() => notes.to_string(),
            _ => NO_NOTES.to_string(),
        };
        let status = if project.is_completed {
            "Completed"
        } else {
            "Ongoing"
        };

        Self {
            name: project.name.clone(),
            deadline: format_deadline(project.deadline),
            client: project.client.clone(),
            description: project.description.clone(),
            notes,
            link: project
                .drive_link
                .clone()
                .unwrap_or_else(|| NO_LINK.to_string()),
            status: status.to_string(),
        }
    }
}

/// Formats a deadline as e.g. "May 15, 2024".
pub fn format_deadline(deadline: Date) -> String {
    deadline.strftime("%b %d, %Y").to_string()
}

pub fn encode(records: &[&Project], format: ExportFormat) -> Result<String, ExportError> {
    let rows: Vec<ExportRow> = records.iter().map(|p| ExportRow::from(*p)).collect();

    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(&rows)?),
        ExportFormat::JsonLines => {
            let mut out = String::new();
            for row in &rows {
                out.push_str(&serde_json::to_string(row)?);
                out.push('\n');
            }
            Ok(out)
        }
        ExportFormat::Csv => Ok(encode_csv(&rows)),
    }
}

fn encode_csv(rows: &[ExportRow]) -> String {
    let mut out = String::new();
    push_csv_line(&mut out, &COLUMNS);
    for row in rows {
        push_csv_line(&mut out, &row.cells());
    }
    out
}

fn push_csv_line(out: &mut String, cells: &[&str]) {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if cell.contains([',', '"', '\n', '\r']) {
            out.push('"');
            out.push_str(&cell.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(cell);
        }
    }
    out.push_str("\r\n");
}

/// `<ongoing|completed>-projects-<YYYY-MM-DD>.<ext>`
pub fn file_name(section: Section, format: ExportFormat, date: Date) -> String {
    format!("{}-projects-{}.{}", section, date, format.extension())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub file_name: String,
    pub content: String,
}

impl ExportDocument {
    /// Writes the document into `dir` and returns the full path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.content).map_err(|e| ExportError::Write {
            path: path.clone(),
            source: e,
        })?;
        info!(path = ?path, "Wrote export");
        Ok(path)
    }
}

/// Encodes one section of `store` as listed right now.
pub fn export<S: Storage>(
    store: &ProjectStore<S>,
    section: Section,
    format: ExportFormat,
    today: Date,
) -> Result<ExportDocument, ExportError> {
    let records = match section {
        Section::Ongoing => store.list_ongoing(),
        Section::Completed => store.list_completed(),
    };

    Ok(ExportDocument {
        file_name: file_name(section, format, today),
        content: encode(&records, format)?,
    })
}
