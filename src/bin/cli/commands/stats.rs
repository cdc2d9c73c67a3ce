use anyhow::Result;

use crate::app::App;
use crate::render::{bar, paint, Color};
use crate::OutputFormat;

/// Skill comment for a mastery score band.
fn skill_label(score: i32) -> &'static str {
    if score < 40 {
        "Needs practice"
    } else if score < 75 {
        "Developing"
    } else {
        "Strong"
    }
}

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let today = App::today();
    let stats = app.state.unit_stats(app.unit_id, today);
    let skills = app.state.mastery().scores(app.unit_id);
    let streak = app.state.streak();

    match format {
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "unit": app.unit_name(),
                "items": stats.item_count,
                "dueToday": stats.due_count,
                "streak": streak.count,
                "skills": skills
                    .iter()
                    .map(|(tag, score)| serde_json::json!({ "tag": tag, "score": score }))
                    .collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        OutputFormat::Plain => {
            println!("{}", paint(&app.unit_name(), Color::BOLD, use_color));
            println!(
                "{} item(s) • {} card(s) due today • streak {} day(s)",
                stats.item_count, stats.due_count, streak.count,
            );

            if skills.is_empty() {
                println!();
                println!("No skills yet. Add tags to library items (e.g. Offer, Mens rea).");
                return Ok(());
            }

            println!();
            for (tag, score) in skills {
                println!(
                    "{:<24} {} {:>3}%  {}",
                    tag,
                    bar(score, 20),
                    score,
                    paint(skill_label(score), Color::GRAY, use_color),
                );
            }
        }
    }
    Ok(())
}
