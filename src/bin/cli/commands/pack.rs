use std::fs;

use anyhow::{bail, Result};

use swot_lib::exampack::{self, TEMPLATES};

use crate::app::App;
use crate::render::{checkbox, paint, Color};

pub fn run_ls(app: &App, use_color: bool) -> Result<()> {
    let checklist = app.state.checklist_for_unit(app.unit_id);
    if checklist.is_empty() {
        println!("No checklist items yet. Try `swot pack template`.");
    } else {
        for (n, item) in checklist.iter().enumerate() {
            let line = format!("{:>2}. {} {}", n + 1, checkbox(item.done), item.text);
            if item.done {
                println!("{}", paint(&line, Color::DIM, use_color));
            } else {
                println!("{}", line);
            }
        }
    }

    let pinned = app.state.pinned_items(app.unit_id);
    if !pinned.is_empty() {
        println!();
        println!("Pinned for the pack:");
        for item in pinned {
            println!("  {} [{}]", item.title, item.kind.label());
        }
    }
    Ok(())
}

pub fn run_add(app: &mut App, text: &str) -> Result<()> {
    app.state.add_checklist_item(app.unit_id, text)?;
    println!("Checklist item added.");
    Ok(())
}

pub fn run_done(app: &mut App, position: usize) -> Result<()> {
    let item_id = checklist_at(app, position)?;
    let done = app.state.toggle_checklist_item(item_id)?;
    println!("{}", if done { "Checked." } else { "Unchecked." });
    Ok(())
}

pub fn run_rm(app: &mut App, position: usize) -> Result<()> {
    let item_id = checklist_at(app, position)?;
    app.state.remove_checklist_item(item_id)?;
    println!("Removed.");
    Ok(())
}

pub fn run_template(app: &mut App, name: Option<&str>) -> Result<()> {
    let Some(name) = name else {
        println!("Available templates:");
        for template in TEMPLATES {
            println!("  - {}", template.name);
        }
        return Ok(());
    };
    let added = app.state.apply_checklist_template(app.unit_id, name)?;
    println!("Added {} checklist item(s) from '{}'.", added, name);
    Ok(())
}

pub fn run_export(app: &App, out: Option<&str>) -> Result<()> {
    let pack = app.state.export_pack(app.unit_id)?;
    let path = out
        .map(str::to_string)
        .unwrap_or_else(|| exampack::pack_filename(&app.unit_name()));
    fs::write(&path, pack)?;
    println!("Wrote {}.", path);
    Ok(())
}

fn checklist_at(app: &App, position: usize) -> Result<uuid::Uuid> {
    let checklist = app.state.checklist_for_unit(app.unit_id);
    if position == 0 || position > checklist.len() {
        bail!("No checklist item at position {} (run `swot pack ls`)", position);
    }
    Ok(checklist[position - 1].id)
}
