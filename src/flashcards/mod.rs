//! Flashcards with bin-based spaced repetition
//!
//! This module provides:
//! - Card model and patches (word/definition pairs with a review state)
//! - The bin scheduler: due cards, study queue, answer transitions
//! - Card storage behind the `CardStore` trait, with a JSON file backend
//! - `StudyService`, which checks sessions and input before touching storage

pub mod algorithm;
pub mod models;
pub mod service;
pub mod storage;

pub use algorithm::ReviewResult;
pub use models::*;
pub use service::{FlashcardError, StudyService};
pub use storage::{CardStore, FileCardStore, StoreError};
