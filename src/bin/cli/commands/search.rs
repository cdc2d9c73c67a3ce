use anyhow::Result;

use crate::app::App;
use crate::render::{paint, Color};

pub fn run(app: &App, query: &str, use_color: bool) -> Result<()> {
    let hits = app.state.search(query);
    if hits.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for hit in hits {
        let unit = app
            .state
            .unit_by_id(hit.item.unit_id)
            .map(|u| u.name.clone())
            .unwrap_or_default();
        println!("{}", paint(&hit.item.title, Color::BOLD, use_color));
        println!(
            "{}",
            paint(&format!("{} • {}", hit.item.kind.label().to_uppercase(), unit), Color::GRAY, use_color),
        );
        println!("  {}", hit.snippet);
        println!();
    }
    Ok(())
}
