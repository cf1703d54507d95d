pub mod project;
pub mod sort;
