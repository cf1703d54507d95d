use jiff::civil::date;

use crate::models::project::{Project, ProjectId};

/// Collection a session starts from when nothing usable is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Seed {
    /// No projects at all.
    #[default]
    Empty,
    /// Three ongoing sample projects with fixed ids.
    Sample,
}

impl Seed {
    pub fn projects(self) -> Vec<Project> {
        match self {
            Seed::Empty => vec![],
            Seed::Sample => sample_projects(),
        }
    }
}

fn sample_projects() -> Vec<Project> {
    vec![
        Project {
            id: ProjectId::from("sample-1"),
            name: String::from("E-commerce Platform"),
            deadline: date(2024, 5, 15),
            client: String::from("TechCorp Inc."),
            description: String::from(
                "Building a modern e-commerce platform with React and Node.js",
            ),
            notes: Some(String::from(
                "Initial planning phase completed. Waiting for design approval.",
            )),
            drive_link: None,
            is_completed: false,
        },
        Project {
            id: ProjectId::from("sample-2"),
            name: String::from("Analytics Dashboard"),
            deadline: date(2024, 4, 30),
            client: String::from("DataViz Solutions"),
            description: String::from("Real-time analytics dashboard for business metrics"),
            notes: Some(String::from("API integration in progress")),
            drive_link: None,
            is_completed: false,
        },
        Project {
            id: ProjectId::from("sample-3"),
            name: String::from("Mobile App"),
            deadline: date(2024, 6, 1),
            client: String::from("StartupX"),
            description: String::from("Cross-platform mobile application for task management"),
            notes: Some(String::from("UI/UX design phase")),
            drive_link: None,
            is_completed: false,
        },
    ]
}
