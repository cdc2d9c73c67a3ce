//! Exam preparation: checklists, templates and the pinned-item pack

pub mod models;
pub mod pack;

pub use models::{find_template, ChecklistItem, ChecklistTemplate, TEMPLATES};
pub use pack::{build_pack, pack_filename};
