//! Interactive flashcard review loop

use anyhow::Result;

use swot_lib::flashcards::{self, Card, Deck};

use crate::app::App;
use crate::render::{paint, read_line, Color};

pub fn run(app: &mut App, deck: Option<&str>, due_only: bool, use_color: bool) -> Result<()> {
    let deck: Deck = match deck {
        Some(name) => app.state.find_deck(app.unit_id, name)?.clone(),
        None => {
            let deck_id = app.state.ensure_default_deck(app.unit_id)?;
            app.state.deck_by_id(deck_id)?.clone()
        }
    };

    let today = App::today();
    let pool: Vec<Card> = if due_only {
        flashcards::due_cards(&deck, today).into_iter().cloned().collect()
    } else {
        deck.cards.clone()
    };

    if pool.is_empty() {
        println!("No cards (or none due).");
        return Ok(());
    }

    println!(
        "{} • {} • {} card(s)",
        paint(&deck.name, Color::BOLD, use_color),
        if due_only { "Due" } else { "All" },
        pool.len(),
    );

    for (n, card) in pool.iter().enumerate() {
        println!();
        println!(
            "{} {}",
            paint(&format!("[{}/{}] Box {}", n + 1, pool.len(), card.box_level), Color::GRAY, use_color),
            card.front,
        );
        read_line("(enter to reveal) ")?;
        println!("{}", paint(&card.back, Color::CYAN, use_color));

        let action = loop {
            let answer = read_line("[y] knew it  [n] again  [s] skip  [q] quit: ")?;
            match answer.to_lowercase().as_str() {
                "y" | "n" | "s" | "q" => break answer.to_lowercase(),
                _ => println!("Please answer y, n, s or q."),
            }
        };

        match action.as_str() {
            "y" => {
                let updated = app.state.review_card(deck.id, card.id, true, today)?;
                println!(
                    "{}",
                    paint(&format!("Box {} • due {}", updated.box_level, due_label(&updated)), Color::GREEN, use_color),
                );
            }
            "n" => {
                let updated = app.state.review_card(deck.id, card.id, false, today)?;
                println!(
                    "{}",
                    paint(&format!("Back to box 1 • due {}", due_label(&updated)), Color::RED, use_color),
                );
            }
            "s" => continue,
            _ => break,
        }
    }

    println!();
    println!("Streak: {} day(s).", app.state.streak().count);
    Ok(())
}

fn due_label(card: &Card) -> String {
    card.due
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "today".to_string())
}
