use chrono::{DateTime, Utc};

use cognition_lib::flashcards::algorithm::{bin_label, format_time_until_review};
use cognition_lib::flashcards::{Card, SessionState};

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
}

/// Wrap text in a color when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Color of a bin badge: early bins red, middle yellow, late green
fn bin_color(bin: u8) -> &'static str {
    match bin {
        0 => Color::DIM,
        1..=3 => Color::RED,
        4..=6 => Color::YELLOW,
        7..=10 => Color::GREEN,
        _ => Color::BLUE,
    }
}

/// One line summary of a card for listings
pub fn card_line(card: &Card, now: DateTime<Utc>, use_color: bool) -> String {
    let id = card.id.to_string();
    let mistakes = if card.is_difficult() {
        paint("hard to remember", Color::RED, use_color)
    } else {
        format!("{} mistakes", card.incorrect_count)
    };

    format!(
        "{}  {:<24} {:<10} {:<18} next: {}",
        paint(&id[..8], Color::DIM, use_color),
        card.word,
        paint(bin_label(card.bin), bin_color(card.bin), use_color),
        mistakes,
        format_time_until_review(card.next_review, now),
    )
}

/// Message shown when there is no card to present
pub fn state_message(state: &SessionState, now: DateTime<Utc>, use_color: bool) -> String {
    match state {
        SessionState::Empty => {
            "No cards yet. Create your first flashcard with `cognition-cli add <word> <definition>`."
                .to_string()
        }
        SessionState::Studying { next, remaining } => format!(
            "{} card{} remaining. Next: {}",
            remaining,
            if *remaining == 1 { "" } else { "s" },
            paint(&next.word, Color::BOLD, use_color)
        ),
        SessionState::CaughtUp { next_due } => {
            let mut message = paint("All caught up!", Color::YELLOW, use_color)
                + " You are temporarily done; please come back later to review more words.";
            if next_due.is_some() {
                message.push_str(&format!(
                    "\nNext review in {}.",
                    format_time_until_review(*next_due, now)
                ));
            }
            message
        }
        SessionState::Finished => {
            paint("Congratulations!", Color::GREEN, use_color)
                + " You have no more words to review; you are permanently done!"
        }
    }
}
