use anyhow::{bail, Result};
use chrono::NaiveDate;

use swot_lib::tasks::Priority;

use crate::app::App;
use crate::render::{checkbox, paint, Color};

pub fn run_add(app: &mut App, text: &str, priority: Priority, due: Option<&str>) -> Result<()> {
    let due = match due {
        Some(raw) => Some(parse_date(raw)?),
        None => None,
    };
    app.state.add_todo(app.unit_id, text, priority, due)?;
    println!("Task added.");
    Ok(())
}

pub fn run_ls(app: &App, use_color: bool) -> Result<()> {
    let todos = app.state.todos_for_unit(app.unit_id);
    if todos.is_empty() {
        println!("No tasks yet.");
        return Ok(());
    }
    for (n, todo) in todos.iter().enumerate() {
        let due = todo
            .due
            .map(|d| format!("  due {}", d))
            .unwrap_or_default();
        let line = format!(
            "{:>2}. {} {} [{}]{}",
            n + 1,
            checkbox(todo.done),
            todo.text,
            todo.priority.label(),
            due,
        );
        if todo.done {
            println!("{}", paint(&line, Color::DIM, use_color));
        } else {
            println!("{}", line);
        }
    }
    Ok(())
}

pub fn run_done(app: &mut App, position: usize) -> Result<()> {
    let todo_id = todo_at(app, position)?;
    let done = app.state.toggle_todo(todo_id)?;
    println!("{}", if done { "Done." } else { "Reopened." });
    Ok(())
}

pub fn run_rm(app: &mut App, position: usize) -> Result<()> {
    let todo_id = todo_at(app, position)?;
    app.state.remove_todo(todo_id)?;
    println!("Removed.");
    Ok(())
}

pub fn run_plan(app: &App, days: usize) -> Result<()> {
    let plan = app.state.plan_for_unit(app.unit_id, days);
    if plan.is_empty() {
        println!("No pending tasks — schedule revision blocks or practice tests.");
        return Ok(());
    }
    for line in plan {
        println!("{}", line);
    }
    Ok(())
}

fn todo_at(app: &App, position: usize) -> Result<uuid::Uuid> {
    let todos = app.state.todos_for_unit(app.unit_id);
    if position == 0 || position > todos.len() {
        bail!("No task at position {} (run `swot todo ls`)", position);
    }
    Ok(todos[position - 1].id)
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid date '{}' (expected YYYY-MM-DD)", raw))
}
