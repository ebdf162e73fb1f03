use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use chrono::Utc;

use cognition_lib::flashcards::algorithm::bin_label;
use cognition_lib::flashcards::{Card, SessionState};

use crate::app::App;
use crate::render::{self, paint, Color};
use crate::OutputFormat;

pub fn run_next(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let now = Utc::now();
    let state = app.service.session_state(&app.session, now)
        .context("Failed to build study queue")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        OutputFormat::Plain => match &state {
            SessionState::Studying { next, remaining } => {
                println!("{}", render::state_message(&state, now, use_color));
                print_card_header(next, *remaining, use_color);
                println!("  ID: {}", next.id);
            }
            other => println!("{}", render::state_message(other, now, use_color)),
        },
    }

    Ok(())
}

pub fn run_answer(app: &App, id: &str, correct: bool, format: &OutputFormat) -> Result<()> {
    app.require_user()?;
    let card = app.find_card(id)?;
    let now = Utc::now();
    let card = app.service.answer(&app.session, card.id, correct, now)
        .context("Failed to update flashcard")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&card)?);
        }
        OutputFormat::Plain => {
            println!(
                "\"{}\" moved to bin {} ({})",
                card.word,
                card.bin,
                bin_label(card.bin)
            );
        }
    }

    Ok(())
}

/// Interactive session: reveal each card, ask for the result, recompute the queue
pub fn run_study(app: &App, use_color: bool) -> Result<()> {
    app.require_user()?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let now = Utc::now();
        let state = app.service.session_state(&app.session, now)
            .context("Failed to build study queue")?;

        let (card, remaining) = match state {
            SessionState::Studying { next, remaining } => (next, remaining),
            other => {
                println!("{}", render::state_message(&other, now, use_color));
                return Ok(());
            }
        };

        println!();
        print_card_header(&card, remaining, use_color);
        prompt("Press Enter to reveal the definition (q to quit) ")?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        if line?.trim().eq_ignore_ascii_case("q") {
            return Ok(());
        }
        println!("  {}", card.definition);

        let correct = loop {
            prompt("Did you get it right? [y/n/q] ")?;
            let Some(line) = lines.next() else {
                return Ok(());
            };
            match line?.trim().to_lowercase().as_str() {
                "y" | "yes" => break true,
                "n" | "no" => break false,
                "q" | "quit" => return Ok(()),
                _ => continue,
            }
        };

        let updated = app.service.answer(&app.session, card.id, correct, Utc::now())
            .context("Failed to update flashcard")?;
        let verdict = if correct {
            paint("Correct", Color::GREEN, use_color)
        } else {
            paint("Incorrect", Color::RED, use_color)
        };
        println!("{}: now in bin {} ({})", verdict, updated.bin, bin_label(updated.bin));
    }
}

fn print_card_header(card: &Card, remaining: usize, use_color: bool) {
    let bin = if card.is_new() {
        "New".to_string()
    } else {
        card.bin.to_string()
    };
    println!(
        "{}  {}",
        paint(&card.word, Color::BOLD, use_color),
        paint(
            &format!("(bin: {}, mistakes: {}, {} remaining)", bin, card.incorrect_count, remaining),
            Color::DIM,
            use_color
        )
    );
}

fn prompt(text: &str) -> Result<()> {
    print!("{}", text);
    io::stdout().flush()?;
    Ok(())
}
