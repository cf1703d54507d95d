use std::fmt;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Opaque identifier of a project.
///
/// Fresh ids are UUID v4 strings so they are never reused, not even after a
/// delete. Ids read back from storage are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ProjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Identifier assigned at creation
    pub id: ProjectId,
    /// Display name of the project
    pub name: String,
    /// Calendar day the project is due
    pub deadline: Date,
    /// Client the project is for
    pub client: String,
    /// Free text description
    pub description: String,
    /// Optional notes, `Some("")` is kept apart from `None`
    pub notes: Option<String>,
    /// Optional link to the shared drive folder of the project
    pub drive_link: Option<String>,
    /// Whether the project was marked as done
    pub is_completed: bool,
}

impl Project {
    pub fn new(id: ProjectId, fields: ValidProject) -> Self {
        Self {
            id,
            name: fields.name,
            deadline: fields.deadline,
            client: fields.client,
            description: fields.description,
            notes: fields.notes,
            drive_link: fields.drive_link,
            is_completed: false,
        }
    }

    /// Returns a copy with every editable field replaced. Id and completion
    /// flag are carried over.
    pub fn replaced_with(&self, fields: ValidProject) -> Self {
        Self {
            is_completed: self.is_completed,
            ..Self::new(self.id.clone(), fields)
        }
    }

    pub fn with_completed(&self, is_completed: bool) -> Self {
        Self {
            is_completed,
            ..self.clone()
        }
    }

    /// Checks the field rules on a project that did not come through
    /// [`ProjectInput::validate`], such as one read back from storage.
    /// Nothing is trimmed or rewritten.
    pub fn check(&self) -> Result<(), ValidationError> {
        required("name", &self.name)?;
        required("client", &self.client)?;
        required("description", &self.description)?;
        if let Some(link) = self.drive_link.as_deref() {
            parse_link(link)?;
        }
        Ok(())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Project {0} must not be empty")]
    EmptyField(&'static str),

    #[error("Invalid deadline date '{value}': {reason}")]
    InvalidDeadline { value: String, reason: String },

    #[error("Invalid link '{0}': expected an http:// or https:// URL")]
    InvalidLink(String),

    #[error("Duplicate project id '{0}'")]
    DuplicateId(ProjectId),
}

/// Raw form payload for creating or editing a project.
#[derive(Debug, Clone, Default)]
pub struct ProjectInput {
    pub name: String,
    pub deadline: String,
    pub client: String,
    pub description: String,
    pub notes: Option<String>,
    pub drive_link: Option<String>,
}

/// Input that passed validation, with every string trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidProject {
    pub name: String,
    pub deadline: Date,
    pub client: String,
    pub description: String,
    pub notes: Option<String>,
    pub drive_link: Option<String>,
}

impl ProjectInput {
    pub fn validate(self) -> Result<ValidProject, ValidationError> {
        let name = required("name", &self.name)?;
        let deadline = parse_deadline(&self.deadline)?;
        let client = required("client", &self.client)?;
        let description = required("description", &self.description)?;
        let notes = self.notes.map(|notes| notes.trim().to_string());
        let drive_link = self.drive_link.as_deref().map(parse_link).transpose()?;

        Ok(ValidProject {
            name,
            deadline,
            client,
            description,
            notes,
            drive_link,
        })
    }
}

impl From<&Project> for ProjectInput {
    fn from(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            deadline: project.deadline.to_string(),
            client: project.client.clone(),
            description: project.description.clone(),
            notes: project.notes.clone(),
            drive_link: project.drive_link.clone(),
        }
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

/// Parses a `YYYY-MM-DD` deadline. Anything longer, a time of day included,
/// is rejected rather than truncated.
pub fn parse_deadline(raw: &str) -> Result<Date, ValidationError> {
    let trimmed = raw.trim();
    let invalid = |reason: String| ValidationError::InvalidDeadline {
        value: trimmed.to_string(),
        reason,
    };

    if !is_calendar_day(trimmed) {
        return Err(invalid(String::from("expected YYYY-MM-DD")));
    }
    trimmed.parse::<Date>().map_err(|e| invalid(e.to_string()))
}

fn is_calendar_day(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn parse_link(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    let has_host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty());
    if !has_host {
        return Err(ValidationError::InvalidLink(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ProjectInput {
        ProjectInput {
            name: "  Website  ".to_string(),
            deadline: " 2024-05-15 ".to_string(),
            client: "Acme".to_string(),
            description: "Landing page".to_string(),
            notes: None,
            drive_link: None,
        }
    }

    #[test]
    fn test_validate_trims_fields() {
        let valid = input().validate().unwrap();
        assert_eq!(valid.name, "Website");
        assert_eq!(valid.deadline, jiff::civil::date(2024, 5, 15));
        assert_eq!(valid.notes, None);
    }

    #[test]
    fn test_validate_keeps_empty_notes() {
        let valid = ProjectInput {
            notes: Some("   ".to_string()),
            ..input()
        }
        .validate()
        .unwrap();
        assert_eq!(valid.notes, Some(String::new()));
    }

    #[test]
    fn test_validate_rejects_blank_required_fields() {
        let result = ProjectInput {
            client: " \t".to_string(),
            ..input()
        }
        .validate();
        assert_eq!(result, Err(ValidationError::EmptyField("client")));

        let result = ProjectInput {
            name: String::new(),
            ..input()
        }
        .validate();
        assert_eq!(result, Err(ValidationError::EmptyField("name")));
    }

    #[test]
    fn test_validate_rejects_invalid_deadline() {
        for raw in [
            "2024-13-45",
            "tomorrow",
            "",
            "2024-05-15T23:59:00",
            "2024-5-15",
            "+2024-05-15",
        ] {
            let result = ProjectInput {
                deadline: raw.to_string(),
                ..input()
            }
            .validate();
            assert!(
                matches!(result, Err(ValidationError::InvalidDeadline { .. })),
                "'{}' should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_validate_link() {
        let valid = ProjectInput {
            drive_link: Some(" https://drive.example.com/x ".to_string()),
            ..input()
        }
        .validate()
        .unwrap();
        assert_eq!(
            valid.drive_link.as_deref(),
            Some("https://drive.example.com/x")
        );

        for raw in ["", "drive.example.com", "https://"] {
            let result = ProjectInput {
                drive_link: Some(raw.to_string()),
                ..input()
            }
            .validate();
            assert!(matches!(result, Err(ValidationError::InvalidLink(_))));
        }
    }

    #[test]
    fn test_invalid_deadline_reports_the_value() {
        let result = parse_deadline(" 2024-05-15T23:59:00 ");
        assert_eq!(
            result,
            Err(ValidationError::InvalidDeadline {
                value: "2024-05-15T23:59:00".to_string(),
                reason: "expected YYYY-MM-DD".to_string(),
            })
        );
        assert_eq!(
            parse_deadline("2024-02-29"),
            Ok(jiff::civil::date(2024, 2, 29))
        );
    }

    #[test]
    fn test_check_rejects_blank_fields_and_bad_links() {
        let project = Project::new(ProjectId::from("p1"), input().validate().unwrap());
        assert_eq!(project.check(), Ok(()));

        let blank_name = Project {
            name: "  ".to_string(),
            ..project.clone()
        };
        assert_eq!(blank_name.check(), Err(ValidationError::EmptyField("name")));

        let bad_link = Project {
            drive_link: Some("ftp://files.example.com".to_string()),
            ..project
        };
        assert!(matches!(
            bad_link.check(),
            Err(ValidationError::InvalidLink(_))
        ));
    }

    #[test]
    fn test_replaced_with_keeps_id_and_completion() {
        let project = Project::new(ProjectId::from("p1"), input().validate().unwrap())
            .with_completed(true);
        let replaced = project.replaced_with(
            ProjectInput {
                name: "Renamed".to_string(),
                ..input()
            }
            .validate()
            .unwrap(),
        );
        assert_eq!(replaced.id, project.id);
        assert!(replaced.is_completed);
        assert_eq!(replaced.name, "Renamed");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(ProjectId::generate(), ProjectId::generate());
    }

    #[test]
    fn test_input_from_project_round_trips() {
        let project = Project::new(ProjectId::from("p1"), input().validate().unwrap());
        let again = ProjectInput::from(&project).validate().unwrap();
        assert_eq!(Project::new(project.id.clone(), again), project);
    }
}
