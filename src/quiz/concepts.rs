//! Concept extraction and sentence heuristics
//!
//! Free-text study material is mined with simple word-frequency and
//! capitalisation heuristics: frequent long tokens are treated as candidate
//! key terms, and capitalised multi-word phrases as likely proper-noun or
//! doctrine names. No model and no grammar, just enough signal to seed
//! cloze blanks and quiz prompts.

use std::collections::HashMap;

use regex::Regex;

/// Stopwords ignored by concept ranking.
const STOPWORDS: &[&str] = &[
    "the", "and", "of", "to", "a", "in", "is", "for", "that", "on", "with", "as", "by", "an",
    "are", "this", "it", "be", "or", "from", "at",
];

/// Larger stopword set used when scoring sentences for the summariser.
const SUMMARY_STOPWORDS: &[&str] = &[
    "the", "and", "of", "to", "a", "in", "is", "for", "that", "on", "with", "as", "by", "an",
    "are", "this", "it", "be", "or", "from", "at", "was", "were", "can", "may", "must", "should",
    "not", "but", "if", "into", "their", "there", "which", "also",
];

/// Minimum token length considered a concept candidate.
const MIN_TOKEN_LEN: usize = 5;

/// Capitalised phrases shorter than this are too generic to keep.
const MIN_PHRASE_LEN: usize = 8;

/// Split text into trimmed sentences, dropping any at or below `min_len` chars.
///
/// Sentence boundaries are `.`, `!` or `?` followed by whitespace, matching
/// how the source material is typically punctuated.
pub fn split_sentences(text: &str, min_len: usize) -> Vec<String> {
    let boundary = Regex::new(r"[.!?]\s+").unwrap();
    boundary
        .split(text)
        .map(str::trim)
        .filter(|s| s.chars().count() > min_len)
        .map(str::to_string)
        .collect()
}

/// Extract up to `max` candidate concepts from free text.
///
/// Two passes feed the result: capitalised phrases (1-4 words, at least
/// `MIN_PHRASE_LEN` chars) in order of first appearance, then lowercase
/// tokens of length >= `MIN_TOKEN_LEN` ranked by frequency with ties broken
/// by first appearance. The union is deduplicated, capitalised phrases
/// first, and truncated to `max`.
pub fn extract_concepts(text: &str, max: usize) -> Vec<String> {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return Vec::new();
    }

    let mut first_seen: Vec<String> = Vec::new();
    let mut freq: HashMap<String, usize> = HashMap::new();
    for token in collapsed
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|t| !t.is_empty())
    {
        let token = token.to_lowercase();
        if token.chars().count() < MIN_TOKEN_LEN || STOPWORDS.contains(&token.as_str()) {
            continue;
        }
        if !freq.contains_key(&token) {
            first_seen.push(token.clone());
        }
        *freq.entry(token).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize)> = first_seen
        .into_iter()
        .map(|t| {
            let count = freq[&t];
            (t, count)
        })
        .collect();
    // Stable sort keeps first-seen order among equal frequencies
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    let ranked: Vec<String> = ranked.into_iter().take(max * 2).map(|(t, _)| t).collect();

    let phrase_re = Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,3}\b").unwrap();
    let mut phrases: Vec<String> = Vec::new();
    for m in phrase_re.find_iter(&collapsed) {
        let phrase = m.as_str().to_string();
        if !phrases.contains(&phrase) {
            phrases.push(phrase);
        }
    }
    let phrases: Vec<String> = phrases
        .into_iter()
        .filter(|p| p.chars().count() >= MIN_PHRASE_LEN && p.split(' ').count() <= 4)
        .take(max)
        .collect();

    let mut mixed: Vec<String> = Vec::new();
    for candidate in phrases.into_iter().chain(ranked) {
        if !mixed.contains(&candidate) {
            mixed.push(candidate);
        }
    }
    mixed.truncate(max);
    mixed
}

/// Pick the `top_n` highest-scoring sentences as a crude extractive summary.
///
/// Sentences are scored by summed corpus frequency of their non-stopword
/// tokens. Short texts (at most `top_n` sentences) are returned whole.
pub fn summarize(text: &str, top_n: usize) -> Vec<String> {
    let sentences = split_sentences(text, 20);
    if sentences.len() <= top_n {
        return sentences;
    }

    let mut freq: HashMap<String, usize> = HashMap::new();
    for sentence in &sentences {
        for token in sentence
            .split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|t| !t.is_empty())
        {
            let token = token.to_lowercase();
            if SUMMARY_STOPWORDS.contains(&token.as_str()) {
                continue;
            }
            *freq.entry(token).or_insert(0) += 1;
        }
    }

    let mut scored: Vec<(String, usize)> = sentences
        .into_iter()
        .map(|s| {
            let score = s
                .split(|c: char| !c.is_alphanumeric() && c != '_')
                .filter(|t| !t.is_empty())
                .map(|t| freq.get(&t.to_lowercase()).copied().unwrap_or(0))
                .sum();
            (s, score)
        })
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().take(top_n).map(|(s, _)| s).collect()
}

/// Find the first case-insensitive whole-word occurrence of `term`,
/// returning its byte range.
pub fn whole_word_match(haystack: &str, term: &str) -> Option<(usize, usize)> {
    if term.is_empty() {
        return None;
    }
    let pattern = format!(r"(?i)\b{}\b", regex::escape(term));
    Regex::new(&pattern)
        .ok()?
        .find(haystack)
        .map(|m| (m.start(), m.end()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTRACT_TEXT: &str = "Offer and acceptance form the basis of contract formation. \
        Consideration must also be present for an enforceable contract.";

    #[test]
    fn test_extract_surfaces_capitalised_and_frequent_terms() {
        let concepts = extract_concepts(CONTRACT_TEXT, 12);
        assert!(concepts.iter().any(|c| c == "Consideration"));
        assert!(concepts.iter().any(|c| c == "contract"));
    }

    #[test]
    fn test_capitalised_phrases_rank_first() {
        let concepts = extract_concepts(CONTRACT_TEXT, 12);
        let cap_pos = concepts.iter().position(|c| c == "Consideration").unwrap();
        let freq_pos = concepts.iter().position(|c| c == "contract").unwrap();
        assert!(cap_pos < freq_pos);
    }

    #[test]
    fn test_extract_respects_max_and_dedupes() {
        let concepts = extract_concepts(CONTRACT_TEXT, 3);
        assert!(concepts.len() <= 3);
        let mut unique = concepts.clone();
        unique.dedup();
        assert_eq!(unique.len(), concepts.len());
    }

    #[test]
    fn test_extract_empty_text() {
        assert!(extract_concepts("", 10).is_empty());
        assert!(extract_concepts("   \n  ", 10).is_empty());
    }

    #[test]
    fn test_stopwords_and_short_tokens_excluded() {
        let concepts = extract_concepts("the cat sat on the mat with the cat", 10);
        // every token is either a stopword or shorter than five chars
        assert!(concepts.is_empty());
    }

    #[test]
    fn test_split_sentences_honours_min_len() {
        let sents = split_sentences("Short. This sentence is comfortably over twenty chars.", 20);
        assert_eq!(sents.len(), 1);
        assert!(sents[0].starts_with("This sentence"));
    }

    #[test]
    fn test_summarize_short_text_returned_whole() {
        let sents = summarize(CONTRACT_TEXT, 4);
        assert_eq!(sents.len(), 2);
    }

    #[test]
    fn test_summarize_prefers_high_frequency_sentences() {
        let text = "Negligence requires duty, breach, causation and damage to be shown. \
            Negligence and breach and causation recur throughout the negligence cases. \
            The weather was unremarkable on the day in question generally.";
        let top = summarize(text, 2);
        assert_eq!(top.len(), 2);
        assert!(top.iter().all(|s| s.to_lowercase().contains("negligence")));
    }

    #[test]
    fn test_whole_word_match_is_case_insensitive() {
        let (start, end) = whole_word_match("Consideration must be present", "consideration").unwrap();
        assert_eq!((start, end), (0, "Consideration".len()));
    }

    #[test]
    fn test_whole_word_match_rejects_substrings() {
        assert!(whole_word_match("reconsideration of terms", "consideration").is_none());
    }
}
