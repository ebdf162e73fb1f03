use anyhow::{Context, Result};
use chrono::Utc;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat) -> Result<()> {
    let stats = app.service.stats(&app.session, Utc::now())
        .context("Failed to compute statistics")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Plain => {
            println!("Total cards: {}", stats.total_cards);
            println!("  New:       {}", stats.new_cards);
            println!("  Learning:  {}", stats.learning_cards);
            println!("  Mastered:  {}", stats.mastered_cards);
            println!("  Difficult: {}", stats.difficult_cards);
            println!("Due now:     {}", stats.due_cards);
        }
    }

    Ok(())
}
