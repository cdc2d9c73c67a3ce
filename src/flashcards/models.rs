//! Data models for decks, cards and the review streak

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A deck is an ordered collection of flashcards belonging to a unit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: Uuid,
    pub unit_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub cards: Vec<Card>,
    pub created_at: DateTime<Utc>,
}

impl Deck {
    pub fn new(unit_id: Uuid, name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            unit_id,
            name,
            cards: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// Review counters for a single card
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardStats {
    pub seen: u32,
    pub correct: u32,
}

/// A flashcard with its Leitner review state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: Uuid,
    pub front: String,
    pub back: String,
    /// Leitner box, 1 (daily) through 5 (fortnightly)
    #[serde(rename = "box", default = "default_box")]
    pub box_level: u8,
    /// Next review date; unset means due now. A stored value that fails to
    /// parse as `YYYY-MM-DD` also deserialises to unset.
    #[serde(default, deserialize_with = "lenient_date")]
    pub due: Option<NaiveDate>,
    #[serde(default)]
    pub stats: CardStats,
}

fn default_box() -> u8 {
    1
}

impl Card {
    /// New cards start in box 1 with no due date, so they are due immediately.
    pub fn new(front: String, back: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            front,
            back,
            box_level: 1,
            due: None,
            stats: CardStats::default(),
        }
    }
}

/// Day-based activity streak, bumped once per calendar day of review or
/// test activity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    #[serde(default, deserialize_with = "lenient_date")]
    pub last_day: Option<NaiveDate>,
    #[serde(default)]
    pub count: u32,
}

/// Deserialise an optional ISO date, mapping anything unparseable to `None`.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_card_starts_in_box_one_and_due() {
        let card = Card::new("Q".into(), "A".into());
        assert_eq!(card.box_level, 1);
        assert!(card.due.is_none());
        assert_eq!(card.stats.seen, 0);
    }

    #[test]
    fn test_malformed_due_date_deserialises_to_unset() {
        let raw = r#"{"id":"6e2cde6a-9b3f-4f70-b47c-2a27e3ddc6b5","front":"Q","back":"A","box":3,"due":"not-a-date"}"#;
        let card: Card = serde_json::from_str(raw).unwrap();
        assert!(card.due.is_none());
        assert_eq!(card.box_level, 3);
    }

    #[test]
    fn test_valid_due_date_round_trips() {
        let mut card = Card::new("Q".into(), "A".into());
        card.due = NaiveDate::from_ymd_opt(2026, 3, 14);
        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("\"2026-03-14\""));
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back.due, card.due);
    }

    #[test]
    fn test_missing_box_defaults_to_one() {
        let raw = r#"{"id":"6e2cde6a-9b3f-4f70-b47c-2a27e3ddc6b5","front":"Q","back":"A"}"#;
        let card: Card = serde_json::from_str(raw).unwrap();
        assert_eq!(card.box_level, 1);
    }
}
