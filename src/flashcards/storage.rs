//! Storage operations for flashcard sets
//!
//! All sets live in a single file in the data directory:
//! ```text
//! {data-dir}/
//! └── flashcards.json   # { "<set name>": { set_name, created_date, cards: [...] } }
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

use super::models::*;
use crate::storage::{self, StorageError};

const FLASHCARDS_FILE: &str = "flashcards.json";

#[derive(Error, Debug)]
pub enum FlashcardStorageError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Flashcard set not found: {0}")]
    SetNotFound(String),

    #[error("A flashcard set named '{0}' already exists")]
    SetAlreadyExists(String),

    #[error("Please enter a name for your flashcard set")]
    EmptySetName,

    #[error("Please fill in at least one flashcard")]
    NoCards,

    #[error("Card {index} is out of range (set has {len} cards)")]
    CardIndexOutOfRange { index: usize, len: usize },
}

impl From<std::io::Error> for FlashcardStorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(StorageError::Io(err))
    }
}

impl From<serde_json::Error> for FlashcardStorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(StorageError::Json(err))
    }
}

pub type Result<T> = std::result::Result<T, FlashcardStorageError>;

type SetMap = BTreeMap<String, FlashcardSet>;

/// Storage manager for flashcard sets
pub struct FlashcardStorage {
    data_dir: PathBuf,
}

impl FlashcardStorage {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Path to flashcards.json
    pub fn sets_file(&self) -> PathBuf {
        self.data_dir.join(FLASHCARDS_FILE)
    }

    fn load(&self) -> Result<SetMap> {
        Ok(storage::read_json_or_default(&self.sets_file())?)
    }

    fn save(&self, sets: &SetMap) -> Result<()> {
        storage::write_json_atomic(&self.sets_file(), sets)?;
        Ok(())
    }

    /// Load the store, apply `f` to one set, and write the store back
    fn modify_set<T>(
        &self,
        set_name: &str,
        f: impl FnOnce(&mut FlashcardSet) -> Result<T>,
    ) -> Result<T> {
        let mut sets = self.load()?;
        let set = sets
            .get_mut(set_name)
            .ok_or_else(|| FlashcardStorageError::SetNotFound(set_name.to_string()))?;

        set.touch();
        let out = f(set)?;
        self.save(&sets)?;
        Ok(out)
    }

    // ==================== Set Operations ====================

    /// List all sets, oldest first
    pub fn list_sets(&self) -> Result<Vec<FlashcardSet>> {
        let mut sets: Vec<FlashcardSet> = self.load()?.into_values().collect();
        sets.sort_by(|a, b| {
            a.created_date
                .cmp(&b.created_date)
                .then_with(|| a.set_name.cmp(&b.set_name))
        });
        log::debug!("Loaded {} flashcard sets", sets.len());
        Ok(sets)
    }

    /// Get a specific set
    pub fn get_set(&self, set_name: &str) -> Result<FlashcardSet> {
        self.load()?
            .remove(set_name)
            .ok_or_else(|| FlashcardStorageError::SetNotFound(set_name.to_string()))
    }

    /// Create a new set. Blank cards are dropped; at least one must remain.
    pub fn create_set(&self, set_name: &str, cards: &[NewCard]) -> Result<FlashcardSet> {
        let set_name = validate_name(set_name)?;
        let cards = normalize_cards(cards)?;

        let mut sets = self.load()?;
        if sets.contains_key(&set_name) {
            return Err(FlashcardStorageError::SetAlreadyExists(set_name));
        }

        let set = FlashcardSet::new(set_name.clone(), cards);
        sets.insert(set_name, set.clone());
        self.save(&sets)?;

        log::info!("Created flashcard set '{}' with {} cards", set.set_name, set.cards.len());
        Ok(set)
    }

    /// Delete a set
    pub fn delete_set(&self, set_name: &str) -> Result<()> {
        let mut sets = self.load()?;
        if sets.remove(set_name).is_none() {
            return Err(FlashcardStorageError::SetNotFound(set_name.to_string()));
        }
        self.save(&sets)?;

        log::info!("Deleted flashcard set '{}'", set_name);
        Ok(())
    }

    /// Rename a set, keeping its cards and progress
    pub fn rename_set(&self, old_name: &str, new_name: &str) -> Result<FlashcardSet> {
        let new_name = validate_name(new_name)?;

        let mut sets = self.load()?;
        if new_name != old_name && sets.contains_key(&new_name) {
            return Err(FlashcardStorageError::SetAlreadyExists(new_name));
        }

        let mut set = sets
            .remove(old_name)
            .ok_or_else(|| FlashcardStorageError::SetNotFound(old_name.to_string()))?;
        set.set_name = new_name.clone();
        set.touch();
        sets.insert(new_name, set.clone());
        self.save(&sets)?;

        log::info!("Renamed flashcard set '{}' to '{}'", old_name, set.set_name);
        Ok(set)
    }

    // ==================== Card Operations ====================

    /// Append cards to an existing set
    pub fn add_cards(&self, set_name: &str, cards: &[NewCard]) -> Result<FlashcardSet> {
        let cards = normalize_cards(cards)?;
        let added = cards.len();

        let set = self.modify_set(set_name, |set| {
            set.cards.extend(cards);
            Ok(set.clone())
        })?;

        log::info!("Added {} cards to '{}'", added, set_name);
        Ok(set)
    }

    /// Remove the card at `index`
    pub fn remove_card(&self, set_name: &str, index: usize) -> Result<Card> {
        let card = self.modify_set(set_name, |set| {
            check_index(set, index)?;
            Ok(set.cards.remove(index))
        })?;

        log::info!("Removed card {} from '{}'", index, set_name);
        Ok(card)
    }

    // ==================== Progress Operations ====================

    /// Record an answer for the card at `index`
    pub fn update_card_progress(
        &self,
        set_name: &str,
        index: usize,
        learned: bool,
        correct: bool,
    ) -> Result<CardProgress> {
        let progress = self.modify_set(set_name, |set| {
            check_index(set, index)?;
            let progress = set.cards[index].progress.get_or_insert_with(CardProgress::default);
            progress.record(learned, correct);
            Ok(*progress)
        })?;

        log::debug!(
            "Card {} in '{}': learned={} correct={} wrong={}",
            index,
            set_name,
            progress.learned,
            progress.times_correct,
            progress.times_wrong
        );
        Ok(progress)
    }

    /// Zero the progress of every card in a set
    pub fn reset_progress(&self, set_name: &str) -> Result<FlashcardSet> {
        let set = self.modify_set(set_name, |set| {
            for card in &mut set.cards {
                if card.progress.is_some() {
                    card.progress = Some(CardProgress::default());
                }
            }
            Ok(set.clone())
        })?;

        log::info!("Reset progress for '{}'", set_name);
        Ok(set)
    }

    /// Get study statistics for a set
    pub fn set_stats(&self, set_name: &str) -> Result<SetStats> {
        Ok(self.get_set(set_name)?.stats())
    }
}

fn validate_name(set_name: &str) -> Result<String> {
    let trimmed = set_name.trim();
    if trimmed.is_empty() {
        return Err(FlashcardStorageError::EmptySetName);
    }
    Ok(trimmed.to_string())
}

fn normalize_cards(cards: &[NewCard]) -> Result<Vec<Card>> {
    let cards: Vec<Card> = cards.iter().filter_map(NewCard::normalized).collect();
    if cards.is_empty() {
        return Err(FlashcardStorageError::NoCards);
    }
    Ok(cards)
}

fn check_index(set: &FlashcardSet, index: usize) -> Result<()> {
    if index >= set.cards.len() {
        return Err(FlashcardStorageError::CardIndexOutOfRange {
            index,
            len: set.cards.len(),
        });
    }
    Ok(())
}
