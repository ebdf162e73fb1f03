use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use uuid::Uuid;

use cognition_lib::flashcards::{Card, FileCardStore, StudyService};
use cognition_lib::{Config, Session};

/// Shared application state for CLI commands
pub struct App {
    pub service: StudyService<FileCardStore>,
    pub session: Session,
}

impl App {
    /// Initialize from the config file, with command line overrides
    pub fn new(config_path: Option<&Path>, data_dir: Option<PathBuf>, user: Option<Uuid>) -> Result<Self> {
        let mut config = Config::load_or_default(config_path)
            .context("Failed to load config")?;
        if data_dir.is_some() {
            config.data_dir = data_dir;
        }
        if user.is_some() {
            config.user_id = user;
        }

        let data_dir = config.data_dir()
            .context("Failed to get data directory")?;
        let store = FileCardStore::new(data_dir);
        store.init()
            .context("Failed to initialize card storage")?;

        Ok(Self {
            service: StudyService::new(store),
            session: config.session(),
        })
    }

    /// Fail early with a hint when no user is configured
    pub fn require_user(&self) -> Result<()> {
        if !self.session.is_authenticated() {
            bail!("Authentication required: pass --user <uuid> or set user_id in the config file");
        }
        Ok(())
    }

    /// Find a card by ID or unique ID prefix
    pub fn find_card(&self, id: &str) -> Result<Card> {
        if let Ok(card_id) = Uuid::parse_str(id) {
            return self.service.get_card(&self.session, card_id)
                .context(format!("Card '{}' not found", id));
        }

        let cards = self.list_cards()?;
        let prefix = id.to_lowercase();
        let matches: Vec<&Card> = cards.iter()
            .filter(|c| c.id.to_string().starts_with(&prefix))
            .collect();

        match matches.len() {
            0 => bail!("No card matching '{}'", id),
            1 => Ok(matches[0].clone()),
            _ => bail!("Ambiguous card ID '{}'. Matches:\n{}", id,
                matches.iter().map(|c| format!("  - {} {}", c.id, c.word)).collect::<Vec<_>>().join("\n")),
        }
    }

    /// List cards visible to the session
    pub fn list_cards(&self) -> Result<Vec<Card>> {
        self.service.list_cards(&self.session).context("Failed to list cards")
    }
}
