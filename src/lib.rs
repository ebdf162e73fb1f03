//! Cognition Cards: flashcard study with bin-based spaced repetition

pub mod auth;
pub mod config;
pub mod flashcards;

pub use auth::Session;
pub use config::{Config, ConfigError};
