use colored::*;
use jiff::civil::Date;

use crate::{export::format_deadline, models::project::Project};

/// Get the terminal width, defaulting to 80 if unavailable
fn get_terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

/// Check if a project is past its deadline and still open
pub fn is_overdue(project: &Project, today: Date) -> bool {
    !project.is_completed && project.deadline < today
}

/// Get the appropriate status glyph for a project
pub fn get_status_glyph(project: &Project, is_overdue: bool) -> ColoredString {
    if project.is_completed {
        "✓".green()
    } else if is_overdue {
        "●".red()
    } else {
        "○".normal()
    }
}

/// Format a deadline relative to today (e.g., "Today", "Tomorrow", "May 15, 2024")
pub fn format_deadline_label(deadline: Date, today: Date) -> String {
    if deadline == today {
        "Today".to_string()
    } else if today.tomorrow().is_ok_and(|tomorrow| tomorrow == deadline) {
        "Tomorrow".to_string()
    } else {
        format_deadline(deadline)
    }
}

/// First characters of an id, enough to type it back
pub fn short_id(project: &Project) -> String {
    project.id.as_str().chars().take(8).collect()
}

/// Render a view header with title and count
pub fn render_view_header(title: &str, count: usize) {
    let project_word = if count == 1 { "project" } else { "projects" };
    println!("\n  {} ({} {})\n", title.cyan().bold(), count, project_word);
}

/// Render one project: id, glyph and name on the left, client and deadline
/// right-aligned, details indented below
pub fn render_project(project: &Project, today: Date) {
    let terminal_width = get_terminal_width();
    let overdue = is_overdue(project, today);

    let id_str = format!("{:<8}", short_id(project));
    let glyph = get_status_glyph(project, overdue);
    let left_section = format!("  {}  {}  {}", id_str, glyph, project.name);
    let styled_left = if project.is_completed {
        left_section.dimmed()
    } else {
        left_section.bold()
    };

    let deadline = format_deadline_label(project.deadline, today);
    let right_section = format!("{}  ·  {}", project.client, deadline);
    let styled_right = if overdue {
        right_section.red()
    } else {
        right_section.dimmed()
    };

    let left_visible_len = format!("  {}  {}  {}", id_str, " ", project.name)
        .chars()
        .count();
    let total_content = left_visible_len + right_section.chars().count();

    if total_content + 4 < terminal_width {
        let padding = terminal_width - total_content - 2;
        println!("{}{}{}", styled_left, " ".repeat(padding), styled_right);
    } else {
        println!("{}", styled_left);
        println!("{:>15}{}", "", styled_right);
    }

    println!("{:>15}{}", "", project.description.dimmed());
    if let Some(notes) = project.notes.as_deref().filter(|n| !n.is_empty()) {
        println!("{:>15}{} {}", "", "Notes:".bold(), notes.dimmed());
    }
    if let Some(link) = project.drive_link.as_deref() {
        println!("{:>15}{} {}", "", "Link:".bold(), link.underline());
    }
}

/// Render a titled section, or a placeholder line when it is empty
pub fn render_section(title: &str, projects: &[&Project], today: Date) {
    render_view_header(title, projects.len());
    if projects.is_empty() {
        println!("  {}", "Nothing here".dimmed());
        return;
    }
    for project in projects {
        render_project(project, today);
    }
}
