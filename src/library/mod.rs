//! Document library: source material for decks and tests

pub mod models;
pub mod search;

pub use models::{normalise_tags, Item, ItemKind};
pub use search::{search_items, snippet_of, SearchHit};
