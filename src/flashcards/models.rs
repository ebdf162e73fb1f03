//! Data models for the flashcard system

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::algorithm::ReviewResult;

/// Identifier of the user owning a card
pub type OwnerId = Uuid;

/// Bin of a card that has never been studied
pub const NEW_BIN: u8 = 0;

/// Terminal bin: the card is never scheduled again
pub const MASTERED_BIN: u8 = 11;

/// Number of wrong answers after which a card is considered hard to remember
pub const DIFFICULT_THRESHOLD: u32 = 11;

/// A word/definition pair with its spaced repetition state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: Uuid,
    /// The prompt
    pub word: String,
    /// The answer
    pub definition: String,
    /// Spaced repetition stage (0 = new, 1-10 = active, 11 = mastered)
    #[serde(default)]
    pub bin: u8,
    /// Total wrong answers ever recorded
    #[serde(default, alias = "incorrect_count")]
    pub incorrect_count: u32,
    /// When the card is next due; `None` for new and mastered cards
    #[serde(default, alias = "next_review")]
    pub next_review: Option<DateTime<Utc>>,
    /// `None` marks a shared demo card
    #[serde(default, alias = "user_id")]
    pub owner_id: Option<OwnerId>,
    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(default, alias = "updated_at")]
    pub updated_at: DateTime<Utc>,
}

impl Card {
    pub fn new(word: String, definition: String, owner_id: Option<OwnerId>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            word,
            definition,
            bin: NEW_BIN,
            incorrect_count: 0,
            next_review: None,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_new(&self) -> bool {
        self.bin == NEW_BIN
    }

    pub fn is_mastered(&self) -> bool {
        self.bin >= MASTERED_BIN
    }

    /// Hard to remember: too many wrong answers to keep scheduling it
    pub fn is_difficult(&self) -> bool {
        self.incorrect_count >= DIFFICULT_THRESHOLD
    }

    /// Apply a scheduling decision produced by [`super::algorithm::record_answer`]
    pub fn apply_review(&mut self, review: &ReviewResult) {
        self.bin = review.bin();
        self.incorrect_count = review.incorrect_count();
        self.next_review = review.next_review();
    }

    /// Apply a patch, stamping `updated_at`
    pub fn apply_patch(&mut self, patch: CardPatch, now: DateTime<Utc>) {
        if let Some(word) = patch.word {
            self.word = word;
        }
        if let Some(definition) = patch.definition {
            self.definition = definition;
        }
        if let Some(review) = patch.review {
            self.apply_review(&review);
        }
        self.updated_at = now;
    }
}

/// Fields needed to create a card
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCard {
    pub word: String,
    pub definition: String,
    #[serde(default)]
    pub owner_id: Option<OwnerId>,
}

/// Partial update persisted by a card store.
///
/// Scheduling fields can only change through a [`ReviewResult`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardPatch {
    pub word: Option<String>,
    pub definition: Option<String>,
    pub review: Option<ReviewResult>,
}

impl CardPatch {
    pub fn text(word: Option<String>, definition: Option<String>) -> Self {
        Self {
            word,
            definition,
            review: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_none() && self.definition.is_none() && self.review.is_none()
    }
}

impl From<ReviewResult> for CardPatch {
    fn from(review: ReviewResult) -> Self {
        Self {
            word: None,
            definition: None,
            review: Some(review),
        }
    }
}

/// Counts shown on the card management screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub total_cards: usize,
    /// Bin 0
    pub new_cards: usize,
    /// Bins 1-10
    pub learning_cards: usize,
    /// Bin 11
    pub mastered_cards: usize,
    /// Hard to remember, regardless of bin
    pub difficult_cards: usize,
    pub due_cards: usize,
}

/// What the study screen should show for a card set at a given time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum SessionState {
    /// No cards exist at all
    Empty,
    /// There is a card to present
    #[serde(rename_all = "camelCase")]
    Studying { next: Card, remaining: usize },
    /// Nothing to study right now, but some cards will become due later
    #[serde(rename_all = "camelCase")]
    CaughtUp {
        #[serde(skip_serializing_if = "Option::is_none")]
        next_due: Option<DateTime<Utc>>,
    },
    /// Every card is mastered or hard to remember
    Finished,
}
