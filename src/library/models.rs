//! Library data models
//!
//! An item is one piece of source material: a pasted note, an extracted
//! lecture, a case summary or a tutorial handout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// At most this many tags are kept per item.
const MAX_TAGS: usize = 20;

/// Kind of library item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    #[default]
    Note,
    Lecture,
    Case,
    Tutorial,
}

impl ItemKind {
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Note => "note",
            ItemKind::Lecture => "lecture",
            ItemKind::Case => "case",
            ItemKind::Tutorial => "tutorial",
        }
    }
}

/// A library item scoped to a unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    pub unit_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub kind: ItemKind,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Pinned items make up the exam pack
    #[serde(default)]
    pub pinned: bool,
}

impl Item {
    pub fn new(unit_id: Uuid, title: String, kind: ItemKind, tags: Vec<String>, content: String) -> Self {
        let title = if title.trim().is_empty() {
            "Untitled".to_string()
        } else {
            title
        };
        Self {
            id: Uuid::new_v4(),
            unit_id,
            title,
            kind,
            tags,
            content,
            created_at: Utc::now(),
            pinned: false,
        }
    }
}

/// Split a comma-separated tag string into trimmed, non-empty tags, capped
/// at `MAX_TAGS`.
pub fn normalise_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .take(MAX_TAGS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalise_tags_trims_and_drops_empties() {
        let tags = normalise_tags(" Offer , , Consideration ,Mens rea,");
        assert_eq!(tags, vec!["Offer", "Consideration", "Mens rea"]);
    }

    #[test]
    fn test_normalise_tags_caps_count() {
        let input = (0..30).map(|n| format!("t{}", n)).collect::<Vec<_>>().join(",");
        assert_eq!(normalise_tags(&input).len(), 20);
    }

    #[test]
    fn test_blank_title_becomes_untitled() {
        let item = Item::new(Uuid::new_v4(), "  ".into(), ItemKind::Note, vec![], String::new());
        assert_eq!(item.title, "Untitled");
    }

    #[test]
    fn test_kind_serialises_lowercase() {
        let json = serde_json::to_string(&ItemKind::Lecture).unwrap();
        assert_eq!(json, "\"lecture\"");
    }
}
