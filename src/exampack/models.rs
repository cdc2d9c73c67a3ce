use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One entry on a unit's exam-prep checklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: Uuid,
    pub unit_id: Uuid,
    pub text: String,
    #[serde(default)]
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

impl ChecklistItem {
    pub fn new(unit_id: Uuid, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            unit_id,
            text,
            done: false,
            created_at: Utc::now(),
        }
    }
}

/// A named, built-in checklist template.
pub struct ChecklistTemplate {
    pub name: &'static str,
    pub entries: &'static [&'static str],
}

/// The built-in templates, in menu order.
pub const TEMPLATES: &[ChecklistTemplate] = &[
    ChecklistTemplate {
        name: "Case brief (generic)",
        entries: &[
            "Parties + court + date",
            "Material facts",
            "Issue(s)",
            "Holding",
            "Reasoning",
            "Rule / principle",
            "Ratio decidendi",
            "Obiter (if any)",
            "Disposition / order",
            "Relevance to unit",
        ],
    },
    ChecklistTemplate {
        name: "Problem question (IRAC)",
        entries: &[
            "Issues",
            "Relevant law (rules, tests)",
            "Application to facts",
            "Conclusion",
            "Counter-arguments",
            "Remedies / orders",
        ],
    },
];

/// Look up a template by exact name.
pub fn find_template(name: &str) -> Option<&'static ChecklistTemplate> {
    TEMPLATES.iter().find(|t| t.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_are_complete() {
        let brief = find_template("Case brief (generic)").unwrap();
        assert_eq!(brief.entries.len(), 10);

        let irac = find_template("Problem question (IRAC)").unwrap();
        assert_eq!(irac.entries.len(), 6);
        assert_eq!(irac.entries[0], "Issues");
    }

    #[test]
    fn test_unknown_template() {
        assert!(find_template("Mind map").is_none());
    }
}
