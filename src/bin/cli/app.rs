use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use uuid::Uuid;

use swot_lib::app::AppState;

/// Shared application state for CLI commands
pub struct App {
    pub state: AppState,
    /// The unit every unit-scoped command operates on
    pub unit_id: Uuid,
}

impl App {
    /// Open the default data directory and resolve the working unit.
    ///
    /// With no `--unit` flag the first unit is used, seeding a "General"
    /// unit on first run.
    pub fn new(unit: Option<&str>) -> Result<Self> {
        let mut state = AppState::open_default().context("Failed to open data directory")?;
        let unit_id = match unit {
            Some(name) => state.find_unit(name)?.id,
            None => state.ensure_default_unit()?,
        };
        Ok(Self { state, unit_id })
    }

    pub fn unit_name(&self) -> String {
        self.state
            .unit_by_id(self.unit_id)
            .map(|u| u.name.clone())
            .unwrap_or_else(|_| "Unit".to_string())
    }

    /// Calendar day used for all due/streak computations this invocation.
    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }
}
