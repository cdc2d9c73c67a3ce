use anyhow::Result;
use chrono::NaiveDate;

use crate::app::App;

pub fn run_add(app: &mut App, date: &str, time: &str, activity: &str) -> Result<()> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid date '{}' (expected YYYY-MM-DD)", date))?;
    app.state
        .add_timetable_entry(app.unit_id, date, time, activity)?;
    println!("Session added.");
    Ok(())
}

pub fn run_ls(app: &App) -> Result<()> {
    let agenda = app.state.agenda(app.unit_id);
    if agenda.is_empty() {
        println!("No sessions yet.");
        return Ok(());
    }
    for entry in agenda {
        println!("{} {}  {}", entry.date, entry.time, entry.activity);
    }
    Ok(())
}

pub fn run_month(app: &App, year: i32, month: u32) -> Result<()> {
    let mut entries = app.state.month_entries(app.unit_id, year, month);
    entries.sort_by(|a, b| (a.date, a.time.as_str()).cmp(&(b.date, b.time.as_str())));
    if entries.is_empty() {
        println!("Nothing scheduled in {}-{:02}.", year, month);
        return Ok(());
    }
    for entry in entries {
        println!("{} {}  {}", entry.date, entry.time, entry.activity);
    }
    Ok(())
}
