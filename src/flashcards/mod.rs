//! Flashcard sets and study progress for Remora
//!
//! This module provides:
//! - Set management (named, ordered question/answer collections)
//! - Per-card progress tracking (learned flag, correct/wrong tallies)
//! - Study sessions with shuffling and an unlearned-only filter
//! - Multiple choice quizzes
//! - CSV, JSON and plain-text import/export

pub mod models;
pub mod quiz;
pub mod storage;
pub mod study;
pub mod transfer;

pub use models::*;
pub use quiz::{build_quiz, QuizQuestion};
pub use storage::{FlashcardStorage, FlashcardStorageError};
pub use study::StudySession;
pub use transfer::{TransferError, TransferFormat};
