//! Per-unit tag mastery tracking
//!
//! Each unit maps tag names to a 0-100 score. Scores only move through
//! [`MasteryMap::adjust`], which clamps on the way in and on the way out,
//! so stored out-of-range values can never escape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lowest possible mastery score.
pub const MIN_SCORE: i32 = 0;

/// Highest possible mastery score.
pub const MAX_SCORE: i32 = 100;

/// Tag scores for every unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MasteryMap {
    units: BTreeMap<Uuid, BTreeMap<String, i32>>,
}

impl MasteryMap {
    /// Current score for a tag, clamped into range. Unknown tags score 0.
    pub fn score(&self, unit_id: Uuid, tag: &str) -> i32 {
        self.units
            .get(&unit_id)
            .and_then(|scores| scores.get(tag))
            .copied()
            .unwrap_or(MIN_SCORE)
            .clamp(MIN_SCORE, MAX_SCORE)
    }

    /// All `(tag, score)` pairs for a unit, sorted by tag.
    pub fn scores(&self, unit_id: Uuid) -> Vec<(String, i32)> {
        self.units
            .get(&unit_id)
            .map(|scores| {
                scores
                    .iter()
                    .map(|(tag, score)| (tag.clone(), (*score).clamp(MIN_SCORE, MAX_SCORE)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Apply `delta` to every listed tag, clamping each result to 0..=100.
    pub fn adjust(&mut self, unit_id: Uuid, tags: &[String], delta: i32) {
        let scores = self.units.entry(unit_id).or_default();
        for tag in tags {
            let current = scores
                .get(tag)
                .copied()
                .unwrap_or(MIN_SCORE)
                .clamp(MIN_SCORE, MAX_SCORE);
            scores.insert(tag.clone(), (current + delta).clamp(MIN_SCORE, MAX_SCORE));
        }
    }

    /// Number of tracked tags for a unit.
    pub fn skill_count(&self, unit_id: Uuid) -> usize {
        self.units.get(&unit_id).map_or(0, BTreeMap::len)
    }

    /// Mean score across a unit's tracked tags, rounded. `None` when the
    /// unit tracks nothing yet.
    pub fn average(&self, unit_id: Uuid) -> Option<i32> {
        let scores = self.units.get(&unit_id)?;
        if scores.is_empty() {
            return None;
        }
        let total: i64 = scores
            .values()
            .map(|s| i64::from((*s).clamp(MIN_SCORE, MAX_SCORE)))
            .sum();
        Some((total as f64 / scores.len() as f64).round() as i32)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_scores_stay_in_range_under_any_delta_sequence() {
        let unit = Uuid::new_v4();
        let mut mastery = MasteryMap::default();
        let offer = tags(&["Offer"]);

        for delta in [50, 50, 50, -500, 7, -3, 1000, -1] {
            mastery.adjust(unit, &offer, delta);
            let score = mastery.score(unit, "Offer");
            assert!((MIN_SCORE..=MAX_SCORE).contains(&score), "score {}", score);
        }
    }

    #[test]
    fn test_adjust_applies_uniformly_to_all_tags() {
        let unit = Uuid::new_v4();
        let mut mastery = MasteryMap::default();
        mastery.adjust(unit, &tags(&["Offer", "Acceptance"]), 8);
        assert_eq!(mastery.score(unit, "Offer"), 8);
        assert_eq!(mastery.score(unit, "Acceptance"), 8);
        assert_eq!(mastery.score(unit, "Consideration"), 0);
    }

    #[test]
    fn test_units_are_isolated() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut mastery = MasteryMap::default();
        mastery.adjust(a, &tags(&["Offer"]), 10);
        assert_eq!(mastery.score(b, "Offer"), 0);
        assert_eq!(mastery.skill_count(b), 0);
    }

    #[test]
    fn test_average_rounds_and_handles_empty() {
        let unit = Uuid::new_v4();
        let mut mastery = MasteryMap::default();
        assert_eq!(mastery.average(unit), None);

        mastery.adjust(unit, &tags(&["A"]), 10);
        mastery.adjust(unit, &tags(&["B"]), 15);
        assert_eq!(mastery.average(unit), Some(13)); // 12.5 rounds up
    }

    #[test]
    fn test_serde_round_trip() {
        let unit = Uuid::new_v4();
        let mut mastery = MasteryMap::default();
        mastery.adjust(unit, &tags(&["Mens rea"]), 42);

        let json = serde_json::to_string(&mastery).unwrap();
        let back: MasteryMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back.score(unit, "Mens rea"), 42);
    }
}
