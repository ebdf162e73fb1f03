use anyhow::{bail, Context, Result};
use chrono::Utc;

use cognition_lib::flashcards::algorithm::{bin_label, format_time_until_review};

use crate::app::App;
use crate::render;
use crate::OutputFormat;

pub fn run_add(app: &App, word: &str, definition: &str, format: &OutputFormat) -> Result<()> {
    app.require_user()?;
    let card = app.service.create_card(&app.session, word, definition)
        .context("Failed to create flashcard")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&card)?);
        }
        OutputFormat::Plain => {
            println!("Created flashcard \"{}\"", card.word);
            println!("  ID: {}", card.id);
        }
    }

    Ok(())
}

pub fn run_list(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let cards = app.list_cards()?;
    let now = Utc::now();

    match format {
        OutputFormat::Json => {
            let output: Vec<_> = cards.iter().map(|card| {
                serde_json::json!({
                    "card": card,
                    "binLabel": bin_label(card.bin),
                    "difficult": card.is_difficult(),
                    "nextReviewIn": format_time_until_review(card.next_review, now),
                })
            }).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if cards.is_empty() {
                println!("No cards yet. Create your first flashcard to get started!");
            }
            for card in &cards {
                println!("{}", render::card_line(card, now, use_color));
            }
        }
    }

    Ok(())
}

pub fn run_edit(
    app: &App,
    id: &str,
    word: Option<&str>,
    definition: Option<&str>,
    format: &OutputFormat,
) -> Result<()> {
    app.require_user()?;
    if word.is_none() && definition.is_none() {
        bail!("Nothing to change: pass --word and/or --definition");
    }

    let card = app.find_card(id)?;
    let card = app.service.edit_card(&app.session, card.id, word, definition)
        .context("Failed to update flashcard")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&card)?);
        }
        OutputFormat::Plain => {
            println!("Updated flashcard \"{}\"", card.word);
            println!("  Definition: {}", card.definition);
        }
    }

    Ok(())
}

pub fn run_delete(app: &App, id: &str, format: &OutputFormat) -> Result<()> {
    app.require_user()?;
    let card = app.find_card(id)?;
    app.service.delete_card(&app.session, card.id)
        .context("Failed to delete flashcard")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": card.id.to_string(),
                "deleted": true,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Deleted flashcard \"{}\"", card.word);
        }
    }

    Ok(())
}
