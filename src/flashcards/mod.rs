//! Flashcard decks with Leitner spaced repetition

pub mod algorithm;
pub mod models;

pub use algorithm::{box_histogram, bump_streak, due_cards, is_due, reschedule};
pub use models::{Card, CardStats, Deck, Streak};
