//! Question bank generation
//!
//! Turns source material into a pool of candidate questions: cloze blanks
//! punched out of long sentences, "Explain:" prompts for extracted
//! concepts, and multiple-choice questions drawn from the concept pool
//! across all sources.

use rand::seq::SliceRandom;
use rand::Rng;

use super::concepts::{extract_concepts, split_sentences, whole_word_match};
use super::models::{Question, SourceText};

/// Sentences shorter than this never become quiz cloze questions.
const MIN_QUESTION_SENTENCE_LEN: usize = 40;

/// Sentences shorter than this never become cloze flashcards.
const MIN_CARD_SENTENCE_LEN: usize = 35;

/// Cloze questions taken per source.
const CLOZE_PER_SOURCE: usize = 14;

/// Short-answer prompts taken per source.
const SHORT_PER_SOURCE: usize = 10;

/// Cap on multiple-choice questions across the whole bank.
const MCQ_LIMIT: usize = 25;

/// Placeholder text standing in for the blanked term.
pub const BLANK: &str = "_____";

/// Build the candidate question bank for a set of sources.
///
/// Sources with no text contribute nothing. The bank can legitimately come
/// back empty; callers decide whether that rejects the session.
pub fn build_question_bank(sources: &[SourceText], rng: &mut impl Rng) -> Vec<Question> {
    let mut bank = Vec::new();

    for source in sources {
        if source.content.trim().is_empty() {
            continue;
        }

        let concepts = extract_concepts(&source.content, 20);
        let sentences = split_sentences(&source.content, MIN_QUESTION_SENTENCE_LEN);

        for sentence in sentences.iter().take(CLOZE_PER_SOURCE) {
            let Some((start, end)) = pick_pivot(sentence, &concepts) else {
                continue;
            };
            let answer = sentence[start..end].to_string();
            let prompt = format!("{}{}{}", &sentence[..start], BLANK, &sentence[end..]);
            bank.push(Question::Cloze {
                prompt,
                answer,
                tags: source.tags.clone(),
            });
        }

        for concept in concepts.iter().take(SHORT_PER_SOURCE) {
            bank.push(Question::Short {
                prompt: format!("Explain: {}", concept),
                hint: format!("Look for mentions of \"{}\" in {}.", concept, source.title),
                tags: source.tags.clone(),
            });
        }
    }

    // MCQs come from one concept pool spanning every source
    let mut pool: Vec<String> = Vec::new();
    for source in sources {
        for concept in extract_concepts(&source.content, 16) {
            if !pool.contains(&concept) {
                pool.push(concept);
            }
        }
    }
    pool.retain(|c| c.chars().count() >= 4);

    for answer in pool.iter().take(MCQ_LIMIT) {
        let distractor_pool: Vec<String> =
            pool.iter().filter(|c| *c != answer).cloned().collect();
        let mut options = sample_without_replacement(&distractor_pool, 3, rng);
        options.push(answer.clone());
        options.shuffle(rng);
        bank.push(Question::Mcq {
            prompt: "Which option best matches this key term?".to_string(),
            answer: answer.clone(),
            options,
            tags: Vec::new(),
        });
    }

    bank
}

/// Generate `(front, back)` cloze card pairs from free text.
///
/// Unlike quiz cloze questions, the back of a cloze card is the whole
/// sentence, so the card reads as a self-contained fact once flipped.
pub fn make_cloze_cards(text: &str, limit: usize) -> Vec<(String, String)> {
    let sentences: Vec<String> = split_sentences(text, MIN_CARD_SENTENCE_LEN)
        .into_iter()
        .take(200)
        .collect();
    let concepts: Vec<String> = extract_concepts(text, 40)
        .iter()
        .filter_map(|c| c.split_whitespace().next().map(str::to_string))
        .collect();

    sentences
        .iter()
        .take(limit)
        .filter_map(|sentence| {
            let mut pivot = longest_word_match(sentence);
            for concept in &concepts {
                if concept.chars().count() < 5 {
                    continue;
                }
                if let Some(range) = whole_word_match(sentence, concept) {
                    pivot = Some(range);
                    break;
                }
            }
            let (start, end) = pivot?;
            let front = format!("{}{}{}", &sentence[..start], BLANK, &sentence[end..]);
            Some((front, sentence.clone()))
        })
        .collect()
}

/// Turn up to `limit` extracted concepts into definition card pairs.
pub fn make_concept_cards(text: &str, limit: usize) -> Vec<(String, String)> {
    extract_concepts(text, limit)
        .into_iter()
        .map(|concept| {
            (
                format!("Define: {}", concept),
                format!("Definition / rule / authority for: {}", concept),
            )
        })
        .collect()
}

/// Find the blank position for a sentence: the first extracted concept whose
/// leading word occurs in the sentence, falling back to the sentence's
/// longest word. Returns `None` when nothing qualifies, in which case the
/// sentence is skipped.
fn pick_pivot(sentence: &str, concepts: &[String]) -> Option<(usize, usize)> {
    for concept in concepts {
        let term = concept.split_whitespace().next().unwrap_or(concept.as_str());
        if let Some(range) = whole_word_match(sentence, term) {
            return Some(range);
        }
    }
    longest_word_match(sentence)
}

fn longest_word_match(sentence: &str) -> Option<(usize, usize)> {
    let longest = sentence
        .split_whitespace()
        .max_by_key(|w| w.chars().count())?;
    whole_word_match(sentence, longest)
}

/// Draw up to `n` distinct elements, mirroring a splice-style random pick:
/// remaining order is preserved between draws.
pub(crate) fn sample_without_replacement<T: Clone>(
    pool: &[T],
    n: usize,
    rng: &mut impl Rng,
) -> Vec<T> {
    let mut remaining: Vec<T> = pool.to_vec();
    let mut picked = Vec::new();
    while picked.len() < n && !remaining.is_empty() {
        let i = rng.gen_range(0..remaining.len());
        picked.push(remaining.remove(i));
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::models::QuestionKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const CONTRACT_TEXT: &str = "Offer and acceptance form the basis of contract formation. \
        Consideration must also be present for an enforceable contract.";

    fn source(title: &str, tags: &[&str], content: &str) -> SourceText {
        SourceText {
            id: None,
            title: title.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_cloze_reconstruction_matches_original_sentence() {
        let mut rng = StdRng::seed_from_u64(7);
        let sources = vec![source("Contract notes", &["Contract"], CONTRACT_TEXT)];
        let bank = build_question_bank(&sources, &mut rng);

        let concepts = extract_concepts(CONTRACT_TEXT, 20);
        let clozes: Vec<_> = bank
            .iter()
            .filter_map(|q| match q {
                Question::Cloze { prompt, answer, .. } => Some((prompt, answer)),
                _ => None,
            })
            .collect();
        assert!(!clozes.is_empty());

        let mut matched_concept = false;
        for (prompt, answer) in clozes {
            let rebuilt = prompt.replacen(BLANK, answer, 1);
            assert!(CONTRACT_TEXT.contains(&rebuilt));
            if concepts.iter().any(|c| c.eq_ignore_ascii_case(answer)) {
                matched_concept = true;
            }
        }
        assert!(matched_concept);
    }

    #[test]
    fn test_short_prompts_reference_source_title() {
        let mut rng = StdRng::seed_from_u64(7);
        let sources = vec![source("Contract notes", &["Contract"], CONTRACT_TEXT)];
        let bank = build_question_bank(&sources, &mut rng);

        let shorts: Vec<_> = bank
            .iter()
            .filter(|q| q.kind() == QuestionKind::Short)
            .collect();
        assert!(!shorts.is_empty());
        for q in shorts {
            assert!(q.prompt().starts_with("Explain: "));
            if let Question::Short { hint, .. } = q {
                assert!(hint.contains("Contract notes"));
            }
        }
    }

    #[test]
    fn test_mcq_options_contain_answer_and_no_duplicates() {
        let mut rng = StdRng::seed_from_u64(11);
        let text = "Negligence duty breach causation remoteness damages liability standard \
            foreseeability proximity volenti contributory negligence occupiers trespass nuisance. \
            These doctrines together structure liability analysis in tort disputes generally.";
        let sources = vec![source("Tort outline", &["Tort"], text)];
        let bank = build_question_bank(&sources, &mut rng);

        let mcqs: Vec<_> = bank
            .iter()
            .filter_map(|q| match q {
                Question::Mcq { answer, options, .. } => Some((answer, options)),
                _ => None,
            })
            .collect();
        assert!(!mcqs.is_empty());
        for (answer, options) in mcqs {
            assert!(options.contains(answer));
            assert_eq!(options.len(), 4);
            let mut sorted = options.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), 4);
        }
    }

    #[test]
    fn test_empty_sources_yield_empty_bank() {
        let mut rng = StdRng::seed_from_u64(1);
        let sources = vec![source("Blank", &[], "   ")];
        assert!(build_question_bank(&sources, &mut rng).is_empty());
    }

    #[test]
    fn test_distractor_sampling_is_deterministic_with_seed() {
        let pool: Vec<String> = ["alpha", "beta", "gamma", "delta", "epsilon"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let a = sample_without_replacement(&pool, 3, &mut StdRng::seed_from_u64(42));
        let b = sample_without_replacement(&pool, 3, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn test_sampling_caps_at_pool_size() {
        let pool = vec![1, 2];
        let picked = sample_without_replacement(&pool, 5, &mut StdRng::seed_from_u64(3));
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn test_make_cloze_cards_back_is_full_sentence() {
        let cards = make_cloze_cards(CONTRACT_TEXT, 10);
        assert!(!cards.is_empty());
        for (front, back) in &cards {
            assert!(front.contains(BLANK));
            assert!(CONTRACT_TEXT.contains(back.as_str()));
            assert_ne!(front, back);
        }
    }

    #[test]
    fn test_make_concept_cards_define_prompts() {
        let cards = make_concept_cards(CONTRACT_TEXT, 5);
        assert!(!cards.is_empty());
        assert!(cards.len() <= 5);
        assert!(cards[0].0.starts_with("Define: "));
    }
}
