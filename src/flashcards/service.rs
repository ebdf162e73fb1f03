//! Study operations on top of a card store
//!
//! Authorization and input validation run before the store is touched, and
//! the scheduler only ever sees a snapshot loaded for the current owner.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use super::algorithm::{self, record_answer};
use super::models::*;
use super::storage::{CardStore, StoreError};
use crate::auth::Session;

#[derive(Error, Debug)]
pub enum FlashcardError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Card not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid card: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for FlashcardError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::CardNotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, FlashcardError>;

/// Trim a required text field, rejecting it when nothing is left
fn required_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FlashcardError::Validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Card management and study sessions for one store
pub struct StudyService<S: CardStore> {
    store: S,
}

impl<S: CardStore> StudyService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ==================== Card Operations ====================

    /// List the session's cards, or the demo cards for anonymous sessions
    pub fn list_cards(&self, session: &Session) -> Result<Vec<Card>> {
        Ok(self.store.list(session.owner_id())?)
    }

    /// Get a single accessible card
    pub fn get_card(&self, session: &Session, card_id: Uuid) -> Result<Card> {
        self.store
            .get(session.owner_id(), card_id)?
            .ok_or(FlashcardError::NotFound(card_id))
    }

    /// Create a new card owned by the session's user
    pub fn create_card(&self, session: &Session, word: &str, definition: &str) -> Result<Card> {
        let owner_id = session.require_owner()?;
        let word = required_text("word", word)?;
        let definition = required_text("definition", definition)?;

        let card = self.store.create(NewCard {
            word,
            definition,
            owner_id: Some(owner_id),
        })?;
        Ok(card)
    }

    /// Change the word and/or definition of a card; scheduling state is kept
    pub fn edit_card(
        &self,
        session: &Session,
        card_id: Uuid,
        word: Option<&str>,
        definition: Option<&str>,
    ) -> Result<Card> {
        let owner_id = session.require_owner()?;
        let word = word.map(|w| required_text("word", w)).transpose()?;
        let definition = definition
            .map(|d| required_text("definition", d))
            .transpose()?;

        let card = self
            .store
            .update(Some(owner_id), card_id, CardPatch::text(word, definition))?;
        Ok(card)
    }

    /// Permanently delete a card
    pub fn delete_card(&self, session: &Session, card_id: Uuid) -> Result<()> {
        let owner_id = session.require_owner()?;

        if !self.store.delete(Some(owner_id), card_id)? {
            return Err(FlashcardError::NotFound(card_id));
        }
        Ok(())
    }

    // ==================== Study Operations ====================

    /// Cards to study right now, in presentation order
    pub fn study_queue(&self, session: &Session, now: DateTime<Utc>) -> Result<Vec<Card>> {
        let cards = self.list_cards(session)?;
        Ok(algorithm::build_study_queue(&cards, now))
    }

    /// The card to present next, if any
    pub fn next_card(&self, session: &Session, now: DateTime<Utc>) -> Result<Option<Card>> {
        let cards = self.list_cards(session)?;
        Ok(algorithm::next_card(&cards, now))
    }

    /// What the study screen should show
    pub fn session_state(&self, session: &Session, now: DateTime<Utc>) -> Result<SessionState> {
        let cards = self.list_cards(session)?;
        Ok(algorithm::session_state(&cards, now))
    }

    /// Submit an answer for a card and persist its new schedule
    pub fn answer(
        &self,
        session: &Session,
        card_id: Uuid,
        correct: bool,
        now: DateTime<Utc>,
    ) -> Result<Card> {
        let owner_id = session.require_owner()?;

        let cards = self.store.list(Some(owner_id))?;
        let card = cards
            .iter()
            .find(|c| c.id == card_id)
            .ok_or(FlashcardError::NotFound(card_id))?;

        let review = record_answer(card, correct, now);
        let updated = self.store.update(Some(owner_id), card_id, review.into())?;
        Ok(updated)
    }

    /// Review statistics for the session's cards
    pub fn stats(&self, session: &Session, now: DateTime<Utc>) -> Result<ReviewStats> {
        let cards = self.list_cards(session)?;
        Ok(algorithm::review_stats(&cards, now))
    }
}
