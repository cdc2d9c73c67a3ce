use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scheduled study session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    pub id: Uuid,
    pub unit_id: Uuid,
    pub date: NaiveDate,
    /// Wall-clock time as entered, `HH:MM`
    pub time: String,
    pub activity: String,
    pub created_at: DateTime<Utc>,
}

impl TimetableEntry {
    pub fn new(unit_id: Uuid, date: NaiveDate, time: String, activity: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            unit_id,
            date,
            time,
            activity,
            created_at: Utc::now(),
        }
    }
}

/// Entries for a unit sorted chronologically (date, then time string).
pub fn sorted_agenda<'a>(entries: &'a [TimetableEntry], unit_id: Uuid) -> Vec<&'a TimetableEntry> {
    let mut agenda: Vec<&TimetableEntry> =
        entries.iter().filter(|e| e.unit_id == unit_id).collect();
    agenda.sort_by(|a, b| (a.date, a.time.as_str()).cmp(&(b.date, b.time.as_str())));
    agenda
}

/// Entries for a unit falling within one calendar month, for the year view.
pub fn entries_for_month<'a>(
    entries: &'a [TimetableEntry],
    unit_id: Uuid,
    year: i32,
    month: u32,
) -> Vec<&'a TimetableEntry> {
    entries
        .iter()
        .filter(|e| e.unit_id == unit_id && e.date.year() == year && e.date.month() == month)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(unit_id: Uuid, date: (i32, u32, u32), time: &str, activity: &str) -> TimetableEntry {
        TimetableEntry::new(
            unit_id,
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            time.to_string(),
            activity.to_string(),
        )
    }

    #[test]
    fn test_agenda_sorts_by_date_then_time() {
        let unit = Uuid::new_v4();
        let entries = vec![
            entry(unit, (2026, 4, 2), "09:00", "b"),
            entry(unit, (2026, 4, 1), "14:00", "a2"),
            entry(unit, (2026, 4, 1), "08:30", "a1"),
            entry(Uuid::new_v4(), (2026, 3, 1), "07:00", "other unit"),
        ];
        let agenda = sorted_agenda(&entries, unit);
        let order: Vec<&str> = agenda.iter().map(|e| e.activity.as_str()).collect();
        assert_eq!(order, ["a1", "a2", "b"]);
    }

    #[test]
    fn test_month_filter() {
        let unit = Uuid::new_v4();
        let entries = vec![
            entry(unit, (2026, 4, 2), "09:00", "april"),
            entry(unit, (2026, 5, 2), "09:00", "may"),
            entry(unit, (2025, 4, 2), "09:00", "last year"),
        ];
        let april = entries_for_month(&entries, unit, 2026, 4);
        assert_eq!(april.len(), 1);
        assert_eq!(april[0].activity, "april");
    }
}
