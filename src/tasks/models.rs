use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Priority {
    Low,
    #[default]
    Med,
    High,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Med => "MED",
            Priority::High => "HIGH",
        }
    }
}

/// A unit-scoped task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: Uuid,
    pub unit_id: Uuid,
    pub text: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Todo {
    pub fn new(unit_id: Uuid, text: String, priority: Priority, due: Option<NaiveDate>) -> Self {
        Self {
            id: Uuid::new_v4(),
            unit_id,
            text,
            done: false,
            priority,
            due,
            created_at: Utc::now(),
        }
    }
}
