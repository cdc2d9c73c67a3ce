use anyhow::Result;

use crate::app::App;
use crate::render::{paint, Color};
use crate::OutputFormat;

pub fn run_overview(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let today = App::today();
    let overview = app.state.overview(today);

    match format {
        OutputFormat::Json => {
            let rows: Vec<serde_json::Value> = overview
                .iter()
                .map(|(unit, stats)| {
                    serde_json::json!({
                        "id": unit.id.to_string(),
                        "name": unit.name,
                        "items": stats.item_count,
                        "due": stats.due_count,
                        "skills": stats.skill_count,
                        "averageMastery": stats.average_mastery,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Plain => {
            if overview.is_empty() {
                println!("No units yet. Create one with `swot add-unit <name>`.");
                return Ok(());
            }
            for (unit, stats) in overview {
                let current = if unit.id == app.unit_id { "* " } else { "  " };
                let name = paint(&unit.name, Color::BOLD, use_color);
                println!(
                    "{}{}  {} items, {} due, {} skills{}",
                    current,
                    name,
                    stats.item_count,
                    stats.due_count,
                    stats.skill_count,
                    stats
                        .average_mastery
                        .map(|avg| format!(", avg {}%", avg))
                        .unwrap_or_default(),
                );
            }
        }
    }

    Ok(())
}

pub fn run_add(app: &mut App, name: &str) -> Result<()> {
    let unit = app.state.add_unit(name)?;
    println!("Created unit '{}'.", unit.name);
    Ok(())
}
