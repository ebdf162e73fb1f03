//! Storage operations for flashcards
//!
//! Directory structure:
//! ```text
//! {data-dir}/
//! └── cards/
//!     └── {card-id}.json   # Individual card files
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use super::models::*;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Card not found: {0}")]
    CardNotFound(Uuid),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistence backend for cards.
///
/// Every operation is scoped by owner: a card is only visible to the owner
/// recorded on it, and `None` addresses the owner-less demo cards.
pub trait CardStore {
    /// List cards belonging to `owner`, newest first
    fn list(&self, owner: Option<OwnerId>) -> Result<Vec<Card>>;

    /// Get a single card belonging to `owner`
    fn get(&self, owner: Option<OwnerId>, id: Uuid) -> Result<Option<Card>>;

    /// Create a new, never studied card
    fn create(&self, new_card: NewCard) -> Result<Card>;

    /// Apply a patch to a card belonging to `owner`
    fn update(&self, owner: Option<OwnerId>, id: Uuid, patch: CardPatch) -> Result<Card>;

    /// Delete a card belonging to `owner`, returning whether anything was removed
    fn delete(&self, owner: Option<OwnerId>, id: Uuid) -> Result<bool>;
}

/// Card store keeping one JSON file per card
pub struct FileCardStore {
    /// Base path for app data (e.g., ~/.local/share/cognition)
    data_path: PathBuf,
}

impl FileCardStore {
    pub fn new(data_path: PathBuf) -> Self {
        Self { data_path }
    }

    /// Get the cards directory
    fn cards_dir(&self) -> PathBuf {
        self.data_path.join("cards")
    }

    /// Get the path for a specific card
    fn card_path(&self, card_id: Uuid) -> PathBuf {
        self.cards_dir().join(format!("{}.json", card_id))
    }

    /// Initialize storage directories
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(self.cards_dir())?;
        Ok(())
    }

    /// Read every card on disk, skipping files that cannot be parsed
    fn read_all(&self) -> Result<Vec<Card>> {
        let cards_dir = self.cards_dir();
        if !cards_dir.exists() {
            return Ok(Vec::new());
        }

        let mut cards = Vec::new();
        for entry in fs::read_dir(&cards_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                match read_card(&path) {
                    Ok(card) => cards.push(card),
                    Err(e) => log::warn!("Failed to load card from {:?}: {}", path, e),
                }
            }
        }

        Ok(cards)
    }

    /// Load a card file regardless of owner
    fn load(&self, card_id: Uuid) -> Result<Option<Card>> {
        let card_path = self.card_path(card_id);
        if !card_path.exists() {
            return Ok(None);
        }
        read_card(&card_path).map(Some)
    }

    /// Write a card through a temporary file so a failed write never leaves a partial record
    fn save(&self, card: &Card) -> Result<()> {
        self.init()?;

        let card_path = self.card_path(card.id);
        let tmp_path = card_path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_string_pretty(card)?)?;
        fs::rename(&tmp_path, &card_path)?;
        Ok(())
    }
}

fn read_card(path: &Path) -> Result<Card> {
    let content = fs::read_to_string(path)?;
    let card: Card = serde_json::from_str(&content)?;
    Ok(card)
}

impl CardStore for FileCardStore {
    fn list(&self, owner: Option<OwnerId>) -> Result<Vec<Card>> {
        let mut cards: Vec<Card> = self
            .read_all()?
            .into_iter()
            .filter(|c| c.owner_id == owner)
            .collect();

        cards.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(cards)
    }

    fn get(&self, owner: Option<OwnerId>, id: Uuid) -> Result<Option<Card>> {
        Ok(self.load(id)?.filter(|c| c.owner_id == owner))
    }

    fn create(&self, new_card: NewCard) -> Result<Card> {
        let card = Card::new(new_card.word, new_card.definition, new_card.owner_id);
        self.save(&card)?;

        log::info!("Created card {} ({:?})", card.id, card.word);
        Ok(card)
    }

    fn update(&self, owner: Option<OwnerId>, id: Uuid, patch: CardPatch) -> Result<Card> {
        let mut card = self
            .get(owner, id)?
            .ok_or(StoreError::CardNotFound(id))?;

        card.apply_patch(patch, Utc::now());
        self.save(&card)?;

        log::info!(
            "Updated card {} (bin {}, mistakes {})",
            card.id,
            card.bin,
            card.incorrect_count
        );
        Ok(card)
    }

    fn delete(&self, owner: Option<OwnerId>, id: Uuid) -> Result<bool> {
        if self.get(owner, id)?.is_none() {
            return Ok(false);
        }

        fs::remove_file(self.card_path(id))?;

        log::info!("Deleted card {}", id);
        Ok(true)
    }
}
