//! Leitner spaced repetition
//!
//! Five boxes with fixed review intervals. A correct answer promotes the
//! card one box (saturating at box 5); a miss sends it back to box 1. The
//! box determines how many days until the card is due again:
//!
//! - Box 1: same day
//! - Box 2: 1 day
//! - Box 3: 3 days
//! - Box 4: 7 days
//! - Box 5: 14 days
//!
//! There is no exit state; box 5 cards keep cycling every fortnight.

use chrono::{Duration, NaiveDate};

use super::models::{Card, Deck, Streak};

/// Days until the next review, indexed by box - 1.
const BOX_DAYS: [i64; 5] = [0, 1, 3, 7, 14];

/// Apply one review outcome to a card.
///
/// Promotes or resets the box, stamps the next due date relative to
/// `today`, and updates the seen/correct counters. Out-of-range stored box
/// values are clamped into 1..=5 rather than rejected.
pub fn reschedule(card: &mut Card, correct: bool, today: NaiveDate) {
    let current = card.box_level.clamp(1, 5);
    card.box_level = if correct { (current + 1).min(5) } else { 1 };
    let days = BOX_DAYS[(card.box_level - 1) as usize];
    card.due = Some(today + Duration::days(days));
    card.stats.seen += 1;
    if correct {
        card.stats.correct += 1;
    }
}

/// A card is due when it has no due date or its due date has passed.
pub fn is_due(card: &Card, today: NaiveDate) -> bool {
    card.due.map_or(true, |due| due <= today)
}

/// All due cards of a deck, in deck order.
pub fn due_cards(deck: &Deck, today: NaiveDate) -> Vec<&Card> {
    deck.cards.iter().filter(|c| is_due(c, today)).collect()
}

/// Card counts per box, for the deck statistics display.
pub fn box_histogram(deck: &Deck) -> [usize; 5] {
    let mut histogram = [0usize; 5];
    for card in &deck.cards {
        let b = card.box_level.clamp(1, 5) as usize;
        histogram[b - 1] += 1;
    }
    histogram
}

/// Record activity for `today` on the streak counter.
///
/// First ever activity starts the streak at 1; repeat activity on the same
/// day is a no-op; activity exactly one day after the last extends the
/// streak; any longer gap restarts it at 1.
pub fn bump_streak(streak: &mut Streak, today: NaiveDate) {
    match streak.last_day {
        None => {
            streak.last_day = Some(today);
            streak.count = 1;
        }
        Some(last) if last == today => {}
        Some(last) => {
            let gap = (today - last).num_days();
            streak.count = if gap == 1 { streak.count + 1 } else { 1 };
            streak.last_day = Some(today);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn card() -> Card {
        Card::new("front".into(), "back".into())
    }

    #[test]
    fn test_correct_answers_climb_boxes_until_saturation() {
        let mut c = card();
        let today = day(1);
        for expected in [2, 3, 4, 5, 5, 5] {
            reschedule(&mut c, true, today);
            assert_eq!(c.box_level, expected);
        }
        assert_eq!(c.stats.seen, 6);
        assert_eq!(c.stats.correct, 6);
    }

    #[test]
    fn test_miss_resets_to_box_one() {
        let mut c = card();
        c.box_level = 4;
        reschedule(&mut c, false, day(1));
        assert_eq!(c.box_level, 1);
        assert_eq!(c.due, Some(day(1)));
        assert_eq!(c.stats.seen, 1);
        assert_eq!(c.stats.correct, 0);
    }

    #[test]
    fn test_due_date_matches_box_interval_exactly() {
        // After a correct answer from box b, the card sits in box b+1 and is
        // due in BOX_DAYS[b+1] days
        let expected = [(1u8, 1i64), (2, 3), (3, 7), (4, 14), (5, 14)];
        for (start_box, days) in expected {
            let mut c = card();
            c.box_level = start_box;
            reschedule(&mut c, true, day(1));
            assert_eq!(c.due, Some(day(1) + Duration::days(days)));
        }
    }

    #[test]
    fn test_invalid_box_is_clamped_not_rejected() {
        let mut c = card();
        c.box_level = 0;
        reschedule(&mut c, true, day(1));
        assert_eq!(c.box_level, 2);

        c.box_level = 9;
        reschedule(&mut c, false, day(1));
        assert_eq!(c.box_level, 1);
    }

    #[test]
    fn test_due_cards_returns_exact_subset_in_order() {
        let mut deck = Deck::new(Uuid::new_v4(), "General".into());
        let mut a = card();
        a.front = "a".into(); // due: unset
        let mut b = card();
        b.front = "b".into();
        b.due = Some(day(10)); // not yet due
        let mut c = card();
        c.front = "c".into();
        c.due = Some(day(2)); // overdue
        deck.cards = vec![a, b, c];

        let due = due_cards(&deck, day(5));
        let fronts: Vec<&str> = due.iter().map(|c| c.front.as_str()).collect();
        assert_eq!(fronts, ["a", "c"]);

        // idempotent for a fixed today
        let again = due_cards(&deck, day(5));
        assert_eq!(again.len(), due.len());
    }

    #[test]
    fn test_box_histogram_counts_all_cards() {
        let mut deck = Deck::new(Uuid::new_v4(), "General".into());
        for b in [1u8, 1, 3, 5, 5, 5] {
            let mut c = card();
            c.box_level = b;
            deck.cards.push(c);
        }
        assert_eq!(box_histogram(&deck), [2, 0, 1, 0, 3]);
    }

    #[test]
    fn test_streak_scenario() {
        let mut streak = Streak::default();

        bump_streak(&mut streak, day(10));
        assert_eq!(streak.count, 1);

        // same day is a no-op
        bump_streak(&mut streak, day(10));
        assert_eq!(streak.count, 1);
        assert_eq!(streak.last_day, Some(day(10)));

        // consecutive day extends
        bump_streak(&mut streak, day(11));
        assert_eq!(streak.count, 2);

        // skipping a day resets
        bump_streak(&mut streak, day(13));
        assert_eq!(streak.count, 1);
        assert_eq!(streak.last_day, Some(day(13)));
    }
}
