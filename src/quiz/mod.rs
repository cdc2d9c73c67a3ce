//! Self-test generation
//!
//! Heuristic question generation from library text plus the session
//! machinery that selects, presents and scores a test.

pub mod concepts;
pub mod generator;
pub mod models;
pub mod session;

pub use concepts::{extract_concepts, summarize};
pub use generator::{build_question_bank, make_cloze_cards, make_concept_cards};
pub use models::{Answer, Question, QuestionKind, QuestionMix, SourceProvider, SourceScope, SourceText};
pub use session::{select_questions, SessionReport, StepOutcome, TestSession};
