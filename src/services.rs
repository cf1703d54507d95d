pub mod events;
pub mod projects;
