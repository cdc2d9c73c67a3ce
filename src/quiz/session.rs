//! Test session selection and scoring
//!
//! A session draws a typed mix of questions from the bank, walks them in
//! order, and accumulates credit plus the set of touched tags. Completion
//! produces a report whose mastery delta the controller applies.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;

use super::generator::sample_without_replacement;
use super::models::{Answer, Question, QuestionKind, QuestionMix};

/// Credit awarded for a self-marked short answer. Free text cannot be
/// auto-graded, so marking it done earns a flat fraction regardless of
/// content.
const SHORT_ANSWER_CREDIT: f64 = 0.6;

/// Target counts `(mcq, short, cloze)` for a requested size and mix.
///
/// The last computed type absorbs the rounding remainder, so the three
/// targets always sum to `count`.
fn mix_targets(count: usize, mix: QuestionMix) -> (usize, usize, usize) {
    let part = |ratio: f64| (count as f64 * ratio).round() as usize;
    match mix {
        QuestionMix::Balanced => {
            let mcq = part(0.45);
            let short = part(0.25);
            (mcq, short, count.saturating_sub(mcq + short))
        }
        QuestionMix::Mcq => {
            let mcq = part(0.70);
            let short = part(0.15);
            (mcq, short, count.saturating_sub(mcq + short))
        }
        QuestionMix::Short => {
            let short = part(0.60);
            let mcq = part(0.25);
            (mcq, short, count.saturating_sub(mcq + short))
        }
        QuestionMix::Cloze => {
            let cloze = part(0.60);
            let mcq = part(0.25);
            (mcq, count.saturating_sub(mcq + cloze), cloze)
        }
    }
}

/// Sample a session's worth of questions from the bank.
///
/// Each type is sampled without replacement up to its target; a shortfall
/// in one type is not backfilled from another, so the result may be smaller
/// than `count`. The final order is shuffled.
pub fn select_questions(
    bank: &[Question],
    count: usize,
    mix: QuestionMix,
    rng: &mut impl Rng,
) -> Vec<Question> {
    let of_kind = |kind: QuestionKind| -> Vec<Question> {
        bank.iter().filter(|q| q.kind() == kind).cloned().collect()
    };
    let (mcq_n, short_n, cloze_n) = mix_targets(count, mix);

    let mut selected = Vec::new();
    selected.extend(sample_without_replacement(&of_kind(QuestionKind::Mcq), mcq_n, rng));
    selected.extend(sample_without_replacement(&of_kind(QuestionKind::Short), short_n, rng));
    selected.extend(sample_without_replacement(&of_kind(QuestionKind::Cloze), cloze_n, rng));
    selected.shuffle(rng);
    selected
}

/// Outcome of answering one question.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// Whether a gradeable answer was right; `None` for short answers and
    /// skips
    pub correct: Option<bool>,
    pub credit: f64,
    /// The expected answer, for feedback display
    pub expected: Option<String>,
}

/// Summary handed back once every question has been answered.
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub question_count: usize,
    pub credit: f64,
    pub percent: i32,
    pub touched_tags: Vec<String>,
    pub mastery_delta: i32,
}

/// An in-flight test session. Abandoning it mid-way simply drops the value;
/// nothing is persisted until the controller applies the final report.
#[derive(Debug)]
pub struct TestSession {
    questions: Vec<Question>,
    position: usize,
    credit: f64,
    touched: BTreeSet<String>,
}

impl TestSession {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            position: 0,
            credit: 0.0,
            touched: BTreeSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Zero-based index of the current question.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn credit(&self) -> f64 {
        self.credit
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.questions.len()
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.position)
    }

    /// Grade the current question and advance.
    ///
    /// An answer variant that does not fit the current question type is
    /// treated as a skip.
    pub fn submit(&mut self, answer: Answer) -> StepOutcome {
        let Some(question) = self.questions.get(self.position).cloned() else {
            return StepOutcome { correct: None, credit: 0.0, expected: None };
        };

        let outcome = match (&question, &answer) {
            (Question::Mcq { answer: expected, tags, .. }, Answer::Choice(chosen)) => {
                let correct = chosen == expected;
                self.touch(tags.clone());
                StepOutcome {
                    correct: Some(correct),
                    credit: if correct { 1.0 } else { 0.0 },
                    expected: Some(expected.clone()),
                }
            }
            (Question::Cloze { answer: expected, tags, .. }, Answer::Typed(typed)) => {
                let correct = cloze_matches(typed, expected);
                self.touch(tags.clone());
                StepOutcome {
                    correct: Some(correct),
                    credit: if correct { 1.0 } else { 0.0 },
                    expected: Some(expected.clone()),
                }
            }
            (Question::Short { tags, .. }, Answer::Done) => {
                self.touch(tags.clone());
                StepOutcome {
                    correct: None,
                    credit: SHORT_ANSWER_CREDIT,
                    expected: None,
                }
            }
            _ => StepOutcome { correct: None, credit: 0.0, expected: None },
        };

        self.credit += outcome.credit;
        self.position += 1;
        outcome
    }

    /// Build the completion report. Valid once `is_finished`.
    pub fn report(&self) -> SessionReport {
        let count = self.questions.len();
        let percent = if count == 0 {
            0
        } else {
            (self.credit / count as f64 * 100.0).round() as i32
        };
        SessionReport {
            question_count: count,
            credit: self.credit,
            percent,
            touched_tags: self.touched.iter().cloned().collect(),
            mastery_delta: mastery_delta(percent),
        }
    }

    fn touch(&mut self, tags: Vec<String>) {
        self.touched.extend(tags);
    }
}

/// Cloze answers match on case-insensitive substring containment in either
/// direction, so "rea" passes against "mens rea". Empty input never matches.
fn cloze_matches(typed: &str, expected: &str) -> bool {
    let typed = typed.trim().to_lowercase();
    let expected = expected.to_lowercase();
    !typed.is_empty() && (expected.contains(&typed) || typed.contains(&expected))
}

/// Mastery points earned for a session score band.
pub fn mastery_delta(percent: i32) -> i32 {
    if percent >= 80 {
        8
    } else if percent >= 60 {
        4
    } else {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mcq(n: usize) -> Question {
        Question::Mcq {
            prompt: format!("mcq {}", n),
            answer: "right".into(),
            options: vec!["right".into(), "wrong".into()],
            tags: vec!["Offer".into()],
        }
    }

    fn short(n: usize) -> Question {
        Question::Short {
            prompt: format!("short {}", n),
            hint: String::new(),
            tags: vec!["Consideration".into()],
        }
    }

    fn cloze(n: usize) -> Question {
        Question::Cloze {
            prompt: format!("cloze {} _____", n),
            answer: "mens rea".into(),
            tags: vec!["Mens rea".into()],
        }
    }

    fn full_bank() -> Vec<Question> {
        let mut bank = Vec::new();
        for n in 0..12 {
            bank.push(mcq(n));
            bank.push(short(n));
            bank.push(cloze(n));
        }
        bank
    }

    #[test]
    fn test_balanced_selection_counts() {
        let mut rng = StdRng::seed_from_u64(5);
        let selected = select_questions(&full_bank(), 12, QuestionMix::Balanced, &mut rng);
        assert_eq!(selected.len(), 12);

        let count = |k: QuestionKind| selected.iter().filter(|q| q.kind() == k).count();
        assert_eq!(count(QuestionKind::Mcq), 5);
        assert_eq!(count(QuestionKind::Short), 3);
        assert_eq!(count(QuestionKind::Cloze), 4);
    }

    #[test]
    fn test_selection_never_duplicates() {
        let mut rng = StdRng::seed_from_u64(5);
        let selected = select_questions(&full_bank(), 12, QuestionMix::Balanced, &mut rng);
        let mut prompts: Vec<&str> = selected.iter().map(|q| q.prompt()).collect();
        prompts.sort();
        prompts.dedup();
        assert_eq!(prompts.len(), selected.len());
    }

    #[test]
    fn test_mix_targets_sum_to_count() {
        for count in [1, 2, 3, 5, 10, 12, 20, 50] {
            for mix in [
                QuestionMix::Balanced,
                QuestionMix::Mcq,
                QuestionMix::Short,
                QuestionMix::Cloze,
            ] {
                let (m, s, c) = mix_targets(count, mix);
                assert_eq!(m + s + c, count, "count {} mix {:?}", count, mix);
            }
        }
    }

    #[test]
    fn test_shortfall_is_not_backfilled() {
        // Only cloze questions available; a balanced request yields just the
        // cloze share
        let bank: Vec<Question> = (0..20).map(cloze).collect();
        let mut rng = StdRng::seed_from_u64(9);
        let selected = select_questions(&bank, 12, QuestionMix::Balanced, &mut rng);
        assert_eq!(selected.len(), 4);
    }

    #[test]
    fn test_selection_is_deterministic_with_seed() {
        let bank = full_bank();
        let a = select_questions(&bank, 12, QuestionMix::Balanced, &mut StdRng::seed_from_u64(1));
        let b = select_questions(&bank, 12, QuestionMix::Balanced, &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_mcq_scoring_exact_match() {
        let mut session = TestSession::new(vec![
            Question::Mcq {
                prompt: "pick".into(),
                answer: "Consideration".into(),
                options: vec!["Consideration".into(), "Offer".into()],
                tags: vec!["Contract".into()],
            },
            Question::Mcq {
                prompt: "pick again".into(),
                answer: "Consideration".into(),
                options: vec!["Consideration".into(), "Offer".into()],
                tags: vec![],
            },
        ]);

        let first = session.submit(Answer::Choice("Consideration".into()));
        assert_eq!(first.correct, Some(true));
        assert_eq!(first.credit, 1.0);

        let second = session.submit(Answer::Choice("Offer".into()));
        assert_eq!(second.correct, Some(false));
        assert_eq!(second.credit, 0.0);

        assert!(session.is_finished());
        assert_eq!(session.credit(), 1.0);
    }

    #[test]
    fn test_cloze_substring_scoring() {
        let mut session = TestSession::new(vec![cloze(0), cloze(1), cloze(2)]);
        assert_eq!(session.submit(Answer::Typed("rea".into())).correct, Some(true));
        assert_eq!(
            session.submit(Answer::Typed("  MENS REA  ".into())).correct,
            Some(true)
        );
        assert_eq!(session.submit(Answer::Typed("actus".into())).correct, Some(false));
    }

    #[test]
    fn test_short_answer_flat_credit_and_skip() {
        let mut session = TestSession::new(vec![short(0), short(1)]);
        let done = session.submit(Answer::Done);
        assert_eq!(done.credit, SHORT_ANSWER_CREDIT);

        let skipped = session.submit(Answer::Skip);
        assert_eq!(skipped.credit, 0.0);

        let report = session.report();
        assert_eq!(report.question_count, 2);
        assert!((report.credit - 0.6).abs() < f64::EPSILON);
        // skips never touch tags, so only the answered question's tag shows
        assert_eq!(report.touched_tags, vec!["Consideration".to_string()]);
    }

    #[test]
    fn test_wrong_answers_still_touch_tags() {
        let mut session = TestSession::new(vec![mcq(0)]);
        session.submit(Answer::Choice("wrong".into()));
        assert_eq!(session.report().touched_tags, vec!["Offer".to_string()]);
    }

    #[test]
    fn test_report_percent_and_delta_bands() {
        // 12 questions, 10 correct MCQs -> 83% -> +8
        let mut session = TestSession::new((0..12).map(mcq).collect());
        for n in 0..12 {
            let choice = if n < 10 { "right" } else { "wrong" };
            session.submit(Answer::Choice(choice.into()));
        }
        let report = session.report();
        assert_eq!(report.percent, 83);
        assert_eq!(report.mastery_delta, 8);

        assert_eq!(mastery_delta(80), 8);
        assert_eq!(mastery_delta(79), 4);
        assert_eq!(mastery_delta(60), 4);
        assert_eq!(mastery_delta(59), 2);
        assert_eq!(mastery_delta(0), 2);
    }
}
