use std::fs;

use anyhow::{Context, Result};

use swot_lib::storage::ExportPayload;

use crate::app::App;
use crate::render::confirm;

pub fn run_export(app: &App, path: &str) -> Result<()> {
    let payload = app.state.export_payload();
    let json = serde_json::to_string_pretty(&payload)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path))?;
    println!("Exported to {}.", path);
    Ok(())
}

pub fn run_import(app: &mut App, path: &str) -> Result<()> {
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    let payload: ExportPayload =
        serde_json::from_str(&raw).context("Not a valid swot export file")?;

    if !confirm("Import will replace your current data. Continue?")? {
        return Ok(());
    }
    app.state.import_payload(payload)?;
    println!("Import complete.");
    Ok(())
}

pub fn run_wipe(app: &mut App) -> Result<()> {
    if !confirm("This wipes all study data on this machine. Continue?")? {
        return Ok(());
    }
    app.state.wipe()?;
    println!("All data removed.");
    Ok(())
}
