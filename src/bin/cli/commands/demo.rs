use anyhow::{Context, Result};

use cognition_lib::flashcards::{CardStore, NewCard};

use crate::app::App;
use crate::OutputFormat;

const DEMO_CARDS: [(&str, &str); 5] = [
    ("ephemeral", "Lasting for a very short time"),
    ("laconic", "Using very few words"),
    ("ubiquitous", "Present, appearing, or found everywhere"),
    ("sanguine", "Optimistic, especially in a difficult situation"),
    ("obfuscate", "To make something obscure or unclear"),
];

/// Write the demo cards unless some already exist
pub fn run(app: &App, format: &OutputFormat) -> Result<()> {
    let store = app.service.store();
    let existing = store.list(None).context("Failed to list demo cards")?;

    let mut created = Vec::new();
    if existing.is_empty() {
        for (word, definition) in DEMO_CARDS {
            let card = store.create(NewCard {
                word: word.to_string(),
                definition: definition.to_string(),
                owner_id: None,
            }).context("Failed to create demo card")?;
            created.push(card);
        }
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&created)?);
        }
        OutputFormat::Plain => {
            if created.is_empty() {
                println!("Demo cards already present ({} cards)", existing.len());
            } else {
                println!("Created {} demo cards", created.len());
            }
        }
    }

    Ok(())
}
