mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "cognition-cli", about = "Flashcards with spaced repetition", version)]
struct Cli {
    /// Config file (default: <config dir>/cognition/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the card files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Act as this user (default: user_id from the config file)
    #[arg(long, global = true)]
    user: Option<Uuid>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new flashcard
    Add {
        /// Word or term to learn
        word: String,
        /// Definition or explanation
        definition: String,
    },

    /// List cards with their review state
    List,

    /// Change the word or definition of a card
    Edit {
        /// Card ID (or unique prefix)
        id: String,
        /// New word
        #[arg(long)]
        word: Option<String>,
        /// New definition
        #[arg(long)]
        definition: Option<String>,
    },

    /// Delete a card permanently
    Delete {
        /// Card ID (or unique prefix)
        id: String,
    },

    /// Show the next card to study
    Next,

    /// Record an answer for a card
    Answer {
        /// Card ID (or unique prefix)
        id: String,
        /// The answer was right
        #[arg(long, conflicts_with = "incorrect", required_unless_present = "incorrect")]
        correct: bool,
        /// The answer was wrong
        #[arg(long)]
        incorrect: bool,
    },

    /// Study due cards interactively
    Study,

    /// Show review statistics
    Stats,

    /// Add the built-in demo cards visible without a user
    SeedDemo,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let app = app::App::new(cli.config.as_deref(), cli.data_dir, cli.user)?;

    match cli.command {
        Command::Add { word, definition } => {
            commands::cards::run_add(&app, &word, &definition, &cli.format)?;
        }
        Command::List => {
            commands::cards::run_list(&app, &cli.format, use_color)?;
        }
        Command::Edit { id, word, definition } => {
            commands::cards::run_edit(&app, &id, word.as_deref(), definition.as_deref(), &cli.format)?;
        }
        Command::Delete { id } => {
            commands::cards::run_delete(&app, &id, &cli.format)?;
        }
        Command::Next => {
            commands::study::run_next(&app, &cli.format, use_color)?;
        }
        Command::Answer { id, correct, .. } => {
            commands::study::run_answer(&app, &id, correct, &cli.format)?;
        }
        Command::Study => {
            commands::study::run_study(&app, use_color)?;
        }
        Command::Stats => {
            commands::stats::run(&app, &cli.format)?;
        }
        Command::SeedDemo => {
            commands::demo::run(&app, &cli.format)?;
        }
    }

    Ok(())
}
