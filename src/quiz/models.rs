//! Data models for generated self-test sessions
//!
//! Questions are transient: they exist for one session and are never
//! persisted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One piece of source material fed to the question generator.
///
/// This is the canonical shape at the text-source boundary; whatever backs
/// it (the local library or a remote store) is adapted into it before the
/// generator ever sees it.
#[derive(Debug, Clone)]
pub struct SourceText {
    pub id: Option<Uuid>,
    pub title: String,
    pub tags: Vec<String>,
    pub content: String,
}

/// Scope of source material for a test session.
#[derive(Debug, Clone)]
pub enum SourceScope {
    /// Every item in a unit
    Unit(Uuid),
    /// Items in a unit carrying a tag
    Tag(Uuid, String),
    /// An explicit item selection within a unit
    Selected(Uuid, Vec<Uuid>),
}

impl SourceScope {
    pub fn unit_id(&self) -> Uuid {
        match self {
            SourceScope::Unit(u) | SourceScope::Tag(u, _) | SourceScope::Selected(u, _) => *u,
        }
    }
}

/// Pull-only supplier of source material for question generation.
pub trait SourceProvider {
    fn sources(&self, scope: &SourceScope) -> Vec<SourceText>;
}

/// A generated quiz question.
#[derive(Debug, Clone, PartialEq)]
pub enum Question {
    /// Pick the right option; binary credit on exact match
    Mcq {
        prompt: String,
        answer: String,
        options: Vec<String>,
        tags: Vec<String>,
    },
    /// Free-text prompt; self-marked, fixed partial credit
    Short {
        prompt: String,
        hint: String,
        tags: Vec<String>,
    },
    /// Fill-the-blank; binary credit on substring containment
    Cloze {
        prompt: String,
        answer: String,
        tags: Vec<String>,
    },
}

impl Question {
    pub fn kind(&self) -> QuestionKind {
        match self {
            Question::Mcq { .. } => QuestionKind::Mcq,
            Question::Short { .. } => QuestionKind::Short,
            Question::Cloze { .. } => QuestionKind::Cloze,
        }
    }

    pub fn tags(&self) -> &[String] {
        match self {
            Question::Mcq { tags, .. }
            | Question::Short { tags, .. }
            | Question::Cloze { tags, .. } => tags,
        }
    }

    pub fn prompt(&self) -> &str {
        match self {
            Question::Mcq { prompt, .. }
            | Question::Short { prompt, .. }
            | Question::Cloze { prompt, .. } => prompt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionKind {
    Mcq,
    Short,
    Cloze,
}

/// Question-type mix requested for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionMix {
    /// Roughly 45% MCQ, 25% short answer, 30% cloze
    #[default]
    Balanced,
    /// MCQ-heavy: 70/15/15
    Mcq,
    /// Short-answer-heavy: 25/60/15
    Short,
    /// Cloze-heavy: 25/15/60
    Cloze,
}

/// One user action on the current question.
#[derive(Debug, Clone)]
pub enum Answer {
    /// A chosen MCQ option
    Choice(String),
    /// Typed cloze text
    Typed(String),
    /// Short answer marked as done
    Done,
    /// Question skipped
    Skip,
}
