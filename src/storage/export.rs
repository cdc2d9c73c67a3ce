//! Whole-state export and import
//!
//! A single versioned JSON payload carrying every collection, used for
//! backup and for moving data between machines. Import replaces the
//! current state wholesale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::exampack::ChecklistItem;
use crate::flashcards::{Deck, Streak};
use crate::library::Item;
use crate::mastery::MasteryMap;
use crate::tasks::Todo;
use crate::timetable::TimetableEntry;
use crate::units::Unit;

/// Current payload format version.
pub const EXPORT_VERSION: u32 = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub units: Vec<Unit>,
    pub items: Vec<Item>,
    pub decks: Vec<Deck>,
    pub todos: Vec<Todo>,
    pub timetable: Vec<TimetableEntry>,
    pub checklist: Vec<ChecklistItem>,
    pub mastery: MasteryMap,
    pub streak: Streak,
}

impl ExportPayload {
    /// Reject payloads from a newer format than this build understands.
    pub fn is_supported(&self) -> bool {
        self.version <= EXPORT_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_round_trips() {
        let payload = ExportPayload {
            version: EXPORT_VERSION,
            exported_at: Utc::now(),
            units: vec![Unit::new("Contracts".into())],
            items: Vec::new(),
            decks: Vec::new(),
            todos: Vec::new(),
            timetable: Vec::new(),
            checklist: Vec::new(),
            mastery: MasteryMap::default(),
            streak: Streak::default(),
        };

        let json = serde_json::to_string_pretty(&payload).unwrap();
        let back: ExportPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back.version, EXPORT_VERSION);
        assert_eq!(back.units.len(), 1);
        assert_eq!(back.units[0].name, "Contracts");
        assert!(back.is_supported());
    }

    #[test]
    fn test_newer_versions_are_unsupported() {
        let payload = ExportPayload {
            version: EXPORT_VERSION + 1,
            exported_at: Utc::now(),
            units: Vec::new(),
            items: Vec::new(),
            decks: Vec::new(),
            todos: Vec::new(),
            timetable: Vec::new(),
            checklist: Vec::new(),
            mastery: MasteryMap::default(),
            streak: Streak::default(),
        };
        assert!(!payload.is_supported());
    }
}
