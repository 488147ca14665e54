//! Remora: flashcard sets, study progress and local accounts, persisted as
//! JSON files in a data directory.

pub mod config;
pub mod controller;
pub mod flashcards;
pub mod profiles;
pub mod storage;

pub use config::Config;
pub use controller::{ControllerError, FlashcardController};
