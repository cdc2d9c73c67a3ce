use anyhow::Result;

use swot_lib::flashcards;

use crate::app::App;
use crate::render::{confirm, paint, Color};

pub fn run_ls(app: &App, use_color: bool) -> Result<()> {
    let decks = app.state.decks_for_unit(app.unit_id);
    if decks.is_empty() {
        println!("No decks yet. Create one with `swot deck new <name>`.");
        return Ok(());
    }

    let today = App::today();
    for deck in decks {
        let due = flashcards::due_cards(deck, today).len();
        let boxes = flashcards::box_histogram(deck);
        let name = paint(&deck.name, Color::BOLD, use_color);
        let histogram = boxes
            .iter()
            .enumerate()
            .map(|(i, n)| format!("B{}: {}", i + 1, n))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{} ({} cards, {} due)  {}", name, deck.cards.len(), due, histogram);
    }
    Ok(())
}

pub fn run_new(app: &mut App, name: &str) -> Result<()> {
    let deck = app.state.add_deck(app.unit_id, name)?;
    println!("Created deck '{}'.", deck.name);
    Ok(())
}

pub fn run_rm(app: &mut App, name: &str) -> Result<()> {
    let deck = app.state.find_deck(app.unit_id, name)?;
    let (deck_id, deck_name, card_count) = (deck.id, deck.name.clone(), deck.cards.len());
    if !confirm(&format!("Delete deck '{}' and its {} card(s)?", deck_name, card_count))? {
        return Ok(());
    }
    app.state.delete_deck(deck_id)?;
    println!("Deleted deck '{}'.", deck_name);
    Ok(())
}

pub fn run_add_card(app: &mut App, deck: &str, front: &str, back: &str) -> Result<()> {
    let deck_id = app.state.find_deck(app.unit_id, deck)?.id;
    app.state.add_card(deck_id, front, back)?;
    println!("Card added.");
    Ok(())
}

pub fn run_from_item(app: &mut App, title: &str, name: Option<&str>) -> Result<()> {
    let item_id = app.state.find_item(app.unit_id, title)?.id;
    let deck = app.state.create_deck_from_item(item_id, name)?;
    println!("Created deck '{}' with {} cloze card(s).", deck.name, deck.cards.len());
    Ok(())
}

pub fn run_concept_cards(app: &mut App, deck: &str, title: &str) -> Result<()> {
    let deck_id = app.state.find_deck(app.unit_id, deck)?.id;
    let item_id = app.state.find_item(app.unit_id, title)?.id;
    let added = app.state.add_concept_cards(deck_id, item_id)?;
    println!("Added {} concept card(s). Fill in the answers as you revise.", added);
    Ok(())
}
