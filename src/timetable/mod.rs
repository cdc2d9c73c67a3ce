//! Dated study sessions and calendar grouping

pub mod models;

pub use models::{entries_for_month, sorted_agenda, TimetableEntry};
