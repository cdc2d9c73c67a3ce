//! Unit-scoped task lists and the study-plan generator

pub mod models;
pub mod plan;

pub use models::{Priority, Todo};
pub use plan::generate_plan;
