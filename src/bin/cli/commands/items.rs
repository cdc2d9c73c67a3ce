use anyhow::Result;

use swot_lib::library::{normalise_tags, ItemKind};

use crate::app::App;
use crate::render::{paint, truncate_chars, Color};
use crate::OutputFormat;

/// Resolve `--content`, treating "-" as a stdin read.
fn resolve_content(content: Option<String>) -> Result<String> {
    match content {
        Some(text) if text == "-" => {
            let mut buf = String::new();
            std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)?;
            Ok(buf)
        }
        Some(text) => Ok(text),
        None => Ok(String::new()),
    }
}

pub fn run_add(
    app: &mut App,
    title: &str,
    kind: ItemKind,
    tags: Option<&str>,
    content: Option<String>,
) -> Result<()> {
    let tags = tags.map(normalise_tags).unwrap_or_default();
    let content = resolve_content(content)?;
    let item = app
        .state
        .add_item(app.unit_id, title, kind, tags, content)?;
    println!("Added {} '{}' to {}.", item.kind.label(), item.title, app.unit_name());
    Ok(())
}

pub fn run_ls(
    app: &App,
    kind: Option<ItemKind>,
    tag: Option<&str>,
    format: &OutputFormat,
) -> Result<()> {
    let items = app.state.filtered_items(app.unit_id, kind, tag);

    match format {
        OutputFormat::Json => {
            let rows: Vec<serde_json::Value> = items
                .iter()
                .map(|item| {
                    serde_json::json!({
                        "id": item.id.to_string(),
                        "title": item.title,
                        "kind": item.kind.label(),
                        "tags": item.tags,
                        "pinned": item.pinned,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Plain => {
            if items.is_empty() {
                println!("No items yet. Add a lecture, case, tutorial or note.");
                return Ok(());
            }
            for item in items {
                let pin = if item.pinned { " [pinned]" } else { "" };
                let tags = if item.tags.is_empty() {
                    String::new()
                } else {
                    format!("  ({})", item.tags.join(", "))
                };
                println!("{} [{}]{}{}", item.title, item.kind.label(), tags, pin);
            }
        }
    }

    Ok(())
}

pub fn run_show(app: &App, title: &str, use_color: bool) -> Result<()> {
    let item = app.state.find_item(app.unit_id, title)?;
    println!("{}", paint(&item.title, Color::BOLD, use_color));
    let meta = format!(
        "{} • {} • {}",
        item.kind.label().to_uppercase(),
        if item.tags.is_empty() { "No tags".to_string() } else { item.tags.join(", ") },
        item.created_at.format("%Y-%m-%d %H:%M"),
    );
    println!("{}", paint(&meta, Color::GRAY, use_color));
    println!();
    println!("{}", item.content);
    Ok(())
}

pub fn run_rm(app: &mut App, title: &str) -> Result<()> {
    let item_id = app.state.find_item(app.unit_id, title)?.id;
    app.state.delete_item(item_id)?;
    println!("Deleted.");
    Ok(())
}

pub fn run_pin(app: &mut App, title: &str) -> Result<()> {
    let item_id = app.state.find_item(app.unit_id, title)?.id;
    let pinned = app.state.toggle_pin(item_id)?;
    println!("{}", if pinned { "Pinned to exam pack." } else { "Unpinned." });
    Ok(())
}

pub fn run_select(app: &mut App, title: &str) -> Result<()> {
    let item_id = app.state.find_item(app.unit_id, title)?.id;
    let selected = app.state.toggle_selected(item_id)?;
    println!(
        "{} ({} item(s) selected for quizzes).",
        if selected { "Selected" } else { "Unselected" },
        app.state.selected_ids().len(),
    );
    Ok(())
}

pub fn run_summary(app: &App, title: &str) -> Result<()> {
    let item_id = app.state.find_item(app.unit_id, title)?.id;
    let summary = app.state.summarize_item(item_id, 4)?;
    if summary.is_empty() {
        println!("Not enough text to summarise.");
        return Ok(());
    }
    for (n, sentence) in summary.iter().enumerate() {
        println!("{}. {}", n + 1, truncate_chars(sentence, 200));
    }
    Ok(())
}

pub fn run_concepts(app: &App, title: &str) -> Result<()> {
    let item = app.state.find_item(app.unit_id, title)?;
    let concepts = swot_lib::quiz::extract_concepts(&item.content, 14);
    if concepts.is_empty() {
        println!("No concepts found.");
        return Ok(());
    }
    println!("{}", concepts.join(", "));
    Ok(())
}

pub fn run_tags(app: &App) -> Result<()> {
    let tags = app.state.unit_tags(app.unit_id);
    if tags.is_empty() {
        println!("No tags yet. Tag items when adding them (e.g. Offer, Mens rea).");
        return Ok(());
    }
    for tag in tags {
        println!("{}", tag);
    }
    Ok(())
}
