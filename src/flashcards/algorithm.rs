//! Bin-based spaced repetition scheduler
//!
//! Every card sits in a bin. A correct answer moves it one bin up, a wrong
//! answer sends it back to bin 1. Each bin has a fixed review interval:
//!
//! | bin | interval  |
//! |-----|-----------|
//! | 0   | new       |
//! | 1   | 5 seconds |
//! | 2   | 25 seconds|
//! | 3   | 2 minutes |
//! | 4   | 10 minutes|
//! | 5   | 1 hour    |
//! | 6   | 5 hours   |
//! | 7   | 1 day     |
//! | 8   | 5 days    |
//! | 9   | 25 days   |
//! | 10  | 4 months  |
//! | 11  | never     |
//!
//! All functions here are pure: the current time is always passed in.

use std::cmp::Ordering;

use chrono::{DateTime, Duration, Utc};

use super::models::{Card, ReviewStats, SessionState, MASTERED_BIN};

/// First bin a studied card can be in
pub const FIRST_ACTIVE_BIN: u8 = 1;

/// Last bin that is still scheduled for review
pub const LAST_ACTIVE_BIN: u8 = 10;

/// Review interval in seconds for bins 0 through 10
const INTERVAL_SECONDS: [i64; 11] = [
    0,                 // bin 0 - now
    5,                 // bin 1 - 5 seconds
    25,                // bin 2 - 25 seconds
    2 * 60,            // bin 3 - 2 minutes
    10 * 60,           // bin 4 - 10 minutes
    60 * 60,           // bin 5 - 1 hour
    5 * 60 * 60,       // bin 6 - 5 hours
    24 * 60 * 60,      // bin 7 - 1 day
    5 * 24 * 60 * 60,  // bin 8 - 5 days
    25 * 24 * 60 * 60, // bin 9 - 25 days
    120 * 24 * 60 * 60, // bin 10 - 4 months
];

const BIN_LABELS: [&str; 12] = [
    "New", "5 sec", "25 sec", "2 min", "10 min", "1 hour", "5 hours", "1 day", "5 days",
    "25 days", "4 months", "Never",
];

/// Scheduling state produced by answering a card.
///
/// Only [`record_answer`] can build one, so a store applying it can never
/// write a bin, mistake count and due date that disagree with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewResult {
    bin: u8,
    incorrect_count: u32,
    next_review: Option<DateTime<Utc>>,
}

impl ReviewResult {
    pub fn bin(&self) -> u8 {
        self.bin
    }

    pub fn incorrect_count(&self) -> u32 {
        self.incorrect_count
    }

    pub fn next_review(&self) -> Option<DateTime<Utc>> {
        self.next_review
    }
}

/// Review interval for a bin, or `None` when the bin is never reviewed
pub fn interval_for_bin(bin: u8) -> Option<Duration> {
    INTERVAL_SECONDS
        .get(usize::from(bin))
        .map(|secs| Duration::seconds(*secs))
}

/// Compute the next state of a card after an answer
pub fn record_answer(card: &Card, correct: bool, now: DateTime<Utc>) -> ReviewResult {
    let (bin, incorrect_count) = if correct {
        (
            card.bin.saturating_add(1).min(MASTERED_BIN),
            card.incorrect_count,
        )
    } else {
        // A wrong answer restarts the card at the first active bin, never at "new"
        (FIRST_ACTIVE_BIN, card.incorrect_count.saturating_add(1))
    };

    let next_review = interval_for_bin(bin).map(|interval| now + interval);

    log::debug!(
        "Card {} answered {}: bin {} -> {}, next review {:?}",
        card.id,
        if correct { "correctly" } else { "incorrectly" },
        card.bin,
        bin,
        next_review
    );

    ReviewResult {
        bin,
        incorrect_count,
        next_review,
    }
}

/// Check if a card is ready for review
pub fn is_due(card: &Card, now: DateTime<Utc>) -> bool {
    (FIRST_ACTIVE_BIN..=LAST_ACTIVE_BIN).contains(&card.bin)
        && !card.is_difficult()
        && card.next_review.map_or(true, |due| due <= now)
}

/// Higher bins first, then cards without a due date, then oldest due date
fn compare_ready(a: &Card, b: &Card) -> Ordering {
    b.bin
        .cmp(&a.bin)
        .then_with(|| a.next_review.cmp(&b.next_review))
}

/// Build the ordered list of cards to study.
///
/// Due cards come first; when none are due, new cards are offered in the
/// order they were given.
pub fn build_study_queue(cards: &[Card], now: DateTime<Utc>) -> Vec<Card> {
    let mut ready: Vec<Card> = cards.iter().filter(|c| is_due(c, now)).cloned().collect();

    if !ready.is_empty() {
        ready.sort_by(compare_ready);
        return ready;
    }

    cards.iter().filter(|c| c.is_new()).cloned().collect()
}

/// The card to present next, if any
pub fn next_card(cards: &[Card], now: DateTime<Utc>) -> Option<Card> {
    build_study_queue(cards, now).into_iter().next()
}

/// Classify the study screen for a card set
pub fn session_state(cards: &[Card], now: DateTime<Utc>) -> SessionState {
    if cards.is_empty() {
        return SessionState::Empty;
    }

    let queue = build_study_queue(cards, now);
    let remaining = queue.len();
    if let Some(next) = queue.into_iter().next() {
        return SessionState::Studying { next, remaining };
    }

    if cards.iter().all(|c| c.is_mastered() || c.is_difficult()) {
        return SessionState::Finished;
    }

    let next_due = cards
        .iter()
        .filter(|c| (FIRST_ACTIVE_BIN..=LAST_ACTIVE_BIN).contains(&c.bin) && !c.is_difficult())
        .filter_map(|c| c.next_review)
        .filter(|due| *due > now)
        .min();

    SessionState::CaughtUp { next_due }
}

/// Count cards per learning stage
pub fn review_stats(cards: &[Card], now: DateTime<Utc>) -> ReviewStats {
    let mut stats = ReviewStats {
        total_cards: cards.len(),
        ..ReviewStats::default()
    };

    for card in cards {
        if card.is_new() {
            stats.new_cards += 1;
        } else if card.is_mastered() {
            stats.mastered_cards += 1;
        } else {
            stats.learning_cards += 1;
        }

        if card.is_difficult() {
            stats.difficult_cards += 1;
        }

        if is_due(card, now) {
            stats.due_cards += 1;
        }
    }

    stats
}

/// Human-readable name of a bin's interval
pub fn bin_label(bin: u8) -> &'static str {
    BIN_LABELS.get(usize::from(bin)).copied().unwrap_or("Unknown")
}

/// Format the time left until a card's review, e.g. "3d" or "Ready now"
pub fn format_time_until_review(next_review: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(due) = next_review else {
        return "Ready now".to_string();
    };

    let diff = due - now;
    if diff <= Duration::zero() {
        return "Ready now".to_string();
    }

    let seconds = diff.num_seconds();
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{}d", days)
    } else if hours > 0 {
        format!("{}h", hours)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap()
    }

    fn card_in_bin(bin: u8) -> Card {
        let mut card = Card::new("word".to_string(), "definition".to_string(), None);
        card.bin = bin;
        card
    }

    fn due_card(bin: u8, next_review: Option<DateTime<Utc>>) -> Card {
        let mut card = card_in_bin(bin);
        card.next_review = next_review;
        card
    }

    #[test]
    fn test_new_card_correct() {
        let card = card_in_bin(0);
        let result = record_answer(&card, true, now());

        assert_eq!(result.bin(), 1);
        assert_eq!(result.incorrect_count(), 0);
        assert_eq!(result.next_review(), Some(now() + Duration::seconds(5)));
    }

    #[test]
    fn test_new_card_incorrect() {
        let card = card_in_bin(0);
        let result = record_answer(&card, false, now());

        assert_eq!(result.bin(), 1);
        assert_eq!(result.incorrect_count(), 1);
        assert_eq!(result.next_review(), Some(now() + Duration::seconds(5)));
    }

    #[test]
    fn test_correct_moves_up_one_bin() {
        for bin in 0..MASTERED_BIN {
            let result = record_answer(&card_in_bin(bin), true, now());
            assert_eq!(result.bin(), bin + 1);
        }
    }

    #[test]
    fn test_correct_saturates_at_mastered() {
        let mut card = card_in_bin(MASTERED_BIN);
        card.incorrect_count = 3;
        let result = record_answer(&card, true, now());

        assert_eq!(result.bin(), MASTERED_BIN);
        assert_eq!(result.incorrect_count(), 3);
        assert_eq!(result.next_review(), None);
    }

    #[test]
    fn test_incorrect_resets_to_first_bin() {
        for bin in 0..=MASTERED_BIN {
            let mut card = card_in_bin(bin);
            card.incorrect_count = 4;
            let result = record_answer(&card, false, now());

            assert_eq!(result.bin(), FIRST_ACTIVE_BIN);
            assert_eq!(result.incorrect_count(), 5);
        }
    }

    #[test]
    fn test_next_review_matches_interval_table() {
        let expected = [
            (1, Duration::seconds(5)),
            (2, Duration::seconds(25)),
            (3, Duration::minutes(2)),
            (4, Duration::minutes(10)),
            (5, Duration::hours(1)),
            (6, Duration::hours(5)),
            (7, Duration::days(1)),
            (8, Duration::days(5)),
            (9, Duration::days(25)),
            (10, Duration::days(120)),
        ];

        for (bin, interval) in expected {
            let result = record_answer(&card_in_bin(bin - 1), true, now());
            assert_eq!(result.bin(), bin);
            assert_eq!(result.next_review(), Some(now() + interval));
        }
    }

    #[test]
    fn test_bin_ten_correct_is_mastered() {
        let mut card = card_in_bin(10);
        card.next_review = Some(now());
        let result = record_answer(&card, true, now());

        assert_eq!(result.bin(), MASTERED_BIN);
        assert_eq!(result.next_review(), None);

        card.apply_review(&result);
        assert!(!is_due(&card, now()));
        assert!(!is_due(&card, now() + Duration::days(10_000)));
    }

    #[test]
    fn test_interval_for_bin() {
        assert_eq!(interval_for_bin(0), Some(Duration::zero()));
        assert_eq!(interval_for_bin(10), Some(Duration::days(120)));
        assert_eq!(interval_for_bin(MASTERED_BIN), None);
        assert_eq!(interval_for_bin(12), None);
    }

    #[test]
    fn test_due_predicate() {
        assert!(!is_due(&due_card(0, None), now()));
        assert!(!is_due(&due_card(MASTERED_BIN, None), now()));
        assert!(is_due(&due_card(1, None), now()));
        assert!(is_due(&due_card(5, Some(now())), now()));
        assert!(is_due(&due_card(5, Some(now() - Duration::seconds(1))), now()));
        assert!(!is_due(&due_card(5, Some(now() + Duration::seconds(1))), now()));
    }

    #[test]
    fn test_difficult_cards_never_due() {
        for bin in 0..=MASTERED_BIN {
            let mut card = due_card(bin, None);
            card.incorrect_count = 11;
            assert!(!is_due(&card, now()));
        }

        let mut card = due_card(3, None);
        card.incorrect_count = 10;
        assert!(is_due(&card, now()));
    }

    #[test]
    fn test_queue_orders_by_bin_then_due_date() {
        let t1 = now() - Duration::minutes(10);
        let t2 = now() - Duration::minutes(5);
        let bin3 = due_card(3, Some(t1));
        let late = due_card(7, Some(t2));
        let early = due_card(7, Some(t1));

        let queue = build_study_queue(&[bin3.clone(), late.clone(), early.clone()], now());
        let ids: Vec<_> = queue.iter().map(|c| c.id).collect();

        assert_eq!(ids, vec![early.id, late.id, bin3.id]);
    }

    #[test]
    fn test_queue_puts_missing_due_date_first_within_bin() {
        let dated = due_card(4, Some(now() - Duration::hours(1)));
        let undated = due_card(4, None);

        let queue = build_study_queue(&[dated.clone(), undated.clone()], now());

        assert_eq!(queue[0].id, undated.id);
        assert_eq!(queue[1].id, dated.id);
    }

    #[test]
    fn test_queue_falls_back_to_new_cards() {
        let first = card_in_bin(0);
        let waiting = due_card(2, Some(now() + Duration::minutes(1)));
        let second = card_in_bin(0);
        let mastered = card_in_bin(MASTERED_BIN);

        let queue = build_study_queue(
            &[first.clone(), waiting, second.clone(), mastered],
            now(),
        );
        let ids: Vec<_> = queue.iter().map(|c| c.id).collect();

        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[test]
    fn test_queue_ignores_new_cards_while_reviews_are_due() {
        let new_card = card_in_bin(0);
        let review = due_card(1, None);

        let queue = build_study_queue(&[new_card, review.clone()], now());

        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].id, review.id);
    }

    #[test]
    fn test_queue_empty_without_due_or_new_cards() {
        let cards = vec![
            card_in_bin(MASTERED_BIN),
            due_card(6, Some(now() + Duration::hours(2))),
        ];

        assert!(build_study_queue(&cards, now()).is_empty());
        assert!(build_study_queue(&[], now()).is_empty());
    }

    #[test]
    fn test_wrong_answer_reenters_queue_after_interval() {
        let mut card = due_card(8, None);
        let result = record_answer(&card, false, now());
        card.apply_review(&result);

        assert!(build_study_queue(&[card.clone()], now()).is_empty());
        let later = build_study_queue(&[card.clone()], now() + Duration::seconds(5));
        assert_eq!(later.len(), 1);
        assert_eq!(later[0].bin, 1);
    }

    #[test]
    fn test_session_state() {
        assert_eq!(session_state(&[], now()), SessionState::Empty);

        let new_card = card_in_bin(0);
        match session_state(&[new_card.clone()], now()) {
            SessionState::Studying { next, remaining } => {
                assert_eq!(next.id, new_card.id);
                assert_eq!(remaining, 1);
            }
            other => panic!("expected Studying, got {:?}", other),
        }

        let mut difficult = due_card(1, None);
        difficult.incorrect_count = 11;
        let mastered = card_in_bin(MASTERED_BIN);
        assert_eq!(
            session_state(&[difficult.clone(), mastered], now()),
            SessionState::Finished
        );

        let soon = now() + Duration::minutes(2);
        let later = now() + Duration::days(1);
        let cards = vec![
            due_card(3, Some(later)),
            due_card(2, Some(soon)),
            difficult,
        ];
        assert_eq!(
            session_state(&cards, now()),
            SessionState::CaughtUp {
                next_due: Some(soon)
            }
        );
    }

    #[test]
    fn test_review_stats() {
        let mut difficult = due_card(2, None);
        difficult.incorrect_count = 11;
        let cards = vec![
            card_in_bin(0),
            card_in_bin(0),
            due_card(1, None),
            due_card(9, Some(now() + Duration::days(3))),
            difficult,
            card_in_bin(MASTERED_BIN),
        ];

        let stats = review_stats(&cards, now());

        assert_eq!(stats.total_cards, 6);
        assert_eq!(stats.new_cards, 2);
        assert_eq!(stats.learning_cards, 3);
        assert_eq!(stats.mastered_cards, 1);
        assert_eq!(stats.difficult_cards, 1);
        assert_eq!(stats.due_cards, 1);
    }

    #[test]
    fn test_bin_label() {
        assert_eq!(bin_label(0), "New");
        assert_eq!(bin_label(1), "5 sec");
        assert_eq!(bin_label(7), "1 day");
        assert_eq!(bin_label(10), "4 months");
        assert_eq!(bin_label(11), "Never");
        assert_eq!(bin_label(12), "Unknown");
    }

    #[test]
    fn test_format_time_until_review() {
        assert_eq!(format_time_until_review(None, now()), "Ready now");
        assert_eq!(format_time_until_review(Some(now()), now()), "Ready now");
        assert_eq!(
            format_time_until_review(Some(now() - Duration::hours(3)), now()),
            "Ready now"
        );
        assert_eq!(
            format_time_until_review(Some(now() + Duration::seconds(25)), now()),
            "25s"
        );
        assert_eq!(
            format_time_until_review(Some(now() + Duration::seconds(150)), now()),
            "2m"
        );
        assert_eq!(
            format_time_until_review(Some(now() + Duration::hours(5)), now()),
            "5h"
        );
        assert_eq!(
            format_time_until_review(Some(now() + Duration::days(120)), now()),
            "120d"
        );
    }
}
