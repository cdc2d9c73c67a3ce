//! Substring search over library items
//!
//! A deliberately simple scan: case-insensitive containment over title,
//! content and tags, with a character-window snippet around the first
//! content hit. Good enough for a single user's library.

use super::models::Item;

/// Results are capped at this many items.
const MAX_RESULTS: usize = 40;

/// Snippet body length in characters.
const SNIPPET_LEN: usize = 220;

/// Characters of context kept before the hit.
const SNIPPET_LEAD: usize = 50;

/// A matching item plus a content snippet for display.
#[derive(Debug, Clone)]
pub struct SearchHit<'a> {
    pub item: &'a Item,
    pub snippet: String,
}

/// Case-insensitive search across titles, content and tags.
pub fn search_items<'a>(items: &'a [Item], query: &str) -> Vec<SearchHit<'a>> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    items
        .iter()
        .filter(|item| {
            item.title.to_lowercase().contains(&needle)
                || item.content.to_lowercase().contains(&needle)
                || item.tags.iter().any(|t| t.to_lowercase().contains(&needle))
        })
        .take(MAX_RESULTS)
        .map(|item| SearchHit {
            item,
            snippet: snippet_of(&item.content, query),
        })
        .collect()
}

/// A short window of collapsed text around the first case-insensitive hit,
/// with ellipses marking truncation. Falls back to the start of the text
/// when the query only matched title or tags.
pub fn snippet_of(text: &str, query: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let chars: Vec<char> = collapsed.chars().collect();
    let needle: Vec<char> = query.to_lowercase().chars().collect();

    let Some(hit) = find_ci(&chars, &needle) else {
        return chars.iter().take(160).collect();
    };

    let start = hit.saturating_sub(SNIPPET_LEAD);
    let body: String = chars.iter().skip(start).take(SNIPPET_LEN).collect();
    let lead = if start > 0 { "…" } else { "" };
    let tail = if chars.len() > start + SNIPPET_LEN { "…" } else { "" };
    format!("{}{}{}", lead, body, tail)
}

/// First case-insensitive occurrence of `needle` in `hay`, by char index.
fn find_ci(hay: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() || needle.len() > hay.len() {
        return None;
    }
    (0..=hay.len() - needle.len()).find(|&i| {
        hay[i..i + needle.len()]
            .iter()
            .zip(needle)
            .all(|(a, b)| a.to_lowercase().eq(b.to_lowercase()))
    })
}
