//! Interactive self-test session

use anyhow::Result;

use swot_lib::quiz::{Answer, Question, QuestionMix, SourceScope};

use crate::app::App;
use crate::render::{paint, read_line, Color};

pub fn run(
    app: &mut App,
    tag: Option<&str>,
    selected: bool,
    count: usize,
    mix: QuestionMix,
    use_color: bool,
) -> Result<()> {
    let scope = if selected {
        SourceScope::Selected(app.unit_id, app.state.selected_ids().to_vec())
    } else if let Some(tag) = tag {
        SourceScope::Tag(app.unit_id, tag.to_string())
    } else {
        SourceScope::Unit(app.unit_id)
    };

    let mut rng = rand::thread_rng();
    let mut session = app.state.start_test(&scope, count, mix, &mut rng)?;
    println!("{} question(s). Off you go.", session.len());

    while let Some(question) = session.current().cloned() {
        println!();
        println!(
            "{}",
            paint(&format!("Question {}/{}", session.position() + 1, session.len()), Color::GRAY, use_color),
        );

        let answer = match &question {
            Question::Mcq { prompt, options, .. } => {
                println!("{}", paint(prompt, Color::BOLD, use_color));
                for (n, option) in options.iter().enumerate() {
                    println!("  {}. {}", n + 1, option);
                }
                let picked = loop {
                    let raw = read_line("Option number (or s to skip): ")?;
                    if raw.eq_ignore_ascii_case("s") {
                        break None;
                    }
                    match raw.parse::<usize>() {
                        Ok(n) if (1..=options.len()).contains(&n) => break Some(options[n - 1].clone()),
                        _ => println!("Pick 1-{}.", options.len()),
                    }
                };
                match picked {
                    Some(option) => Answer::Choice(option),
                    None => Answer::Skip,
                }
            }
            Question::Cloze { prompt, .. } => {
                println!("{}", paint("Fill the blank:", Color::BOLD, use_color));
                println!("{}", prompt);
                let typed = read_line("Your answer: ")?;
                Answer::Typed(typed)
            }
            Question::Short { prompt, hint, .. } => {
                println!("{}", paint(prompt, Color::BOLD, use_color));
                println!("{}", paint(hint, Color::GRAY, use_color));
                let raw = read_line("Write your answer, then [d]one or [s]kip: ")?;
                if raw.eq_ignore_ascii_case("s") {
                    Answer::Skip
                } else {
                    Answer::Done
                }
            }
        };

        let outcome = session.submit(answer);
        match outcome.correct {
            Some(true) => println!("{}", paint("Correct.", Color::GREEN, use_color)),
            Some(false) => {
                let expected = outcome.expected.unwrap_or_default();
                println!("{}", paint(&format!("Not quite. Expected: {}", expected), Color::RED, use_color));
            }
            None => {}
        }
    }

    let report = session.report();
    app.state.finish_test(scope.unit_id(), &report, App::today())?;

    println!();
    println!("Finished. Score: {}%.", report.percent);
    if report.touched_tags.is_empty() {
        println!("No tagged material this round, so skills are unchanged.");
    } else {
        println!(
            "Skills updated (+{}): {}",
            report.mastery_delta,
            report.touched_tags.join(", "),
        );
    }
    println!("Streak: {} day(s).", app.state.streak().count);
    Ok(())
}
