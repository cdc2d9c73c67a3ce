//! Study planner with spaced repetition and self-test generation
//!
//! The crate is organised as feature modules around a single controller:
//! [`app::AppState`] owns every collection, persists through
//! [`storage::JsonStore`], and routes all mutation. The algorithmic core is
//! [`flashcards::algorithm`] (Leitner scheduling) and [`quiz`] (heuristic
//! question generation and session scoring); everything else is list
//! management over the same state.

pub mod app;
pub mod exampack;
pub mod flashcards;
pub mod library;
pub mod mastery;
pub mod quiz;
pub mod storage;
pub mod tasks;
pub mod timetable;
pub mod units;

pub use app::{AppError, AppState};
