//! Controller between the front end and the two stores
//!
//! Front ends call into `FlashcardController` rather than the stores
//! directly. It owns both stores and remembers which account is signed in.

use std::io::{Read, Write};
use std::path::PathBuf;

use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::flashcards::{
    self, transfer, CardProgress, FlashcardSet, FlashcardStorage, FlashcardStorageError, NewCard,
    QuizQuestion, SetStats, StudySession, TransferError, TransferFormat,
};
use crate::profiles::{ProfileError, ProfileStorage, ProfileUpdate, UserProfile};

#[derive(Error, Debug)]
pub enum ControllerError {
    #[error(transparent)]
    Flashcards(#[from] FlashcardStorageError),

    #[error(transparent)]
    Profiles(#[from] ProfileError),

    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("No account is signed in")]
    NotSignedIn,
}

pub type Result<T> = std::result::Result<T, ControllerError>;

pub struct FlashcardController {
    data_dir: PathBuf,
    flashcards: FlashcardStorage,
    profiles: ProfileStorage,
    current_user: Option<String>,
}

impl FlashcardController {
    /// Open both stores in `data_dir`
    pub fn open(data_dir: PathBuf) -> Self {
        log::debug!("Opening stores in {:?}", data_dir);
        Self {
            flashcards: FlashcardStorage::new(data_dir.clone()),
            profiles: ProfileStorage::new(data_dir.clone()),
            data_dir,
            current_user: None,
        }
    }

    /// Open the stores in the configured (or default) data directory
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::open(config.resolve_data_dir()?))
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    // ==================== Flashcard Sets ====================

    pub fn get_all_sets(&self) -> Result<Vec<FlashcardSet>> {
        Ok(self.flashcards.list_sets()?)
    }

    pub fn get_set(&self, set_name: &str) -> Result<FlashcardSet> {
        Ok(self.flashcards.get_set(set_name)?)
    }

    pub fn create_flashcard_set(&self, set_name: &str, cards: &[NewCard]) -> Result<FlashcardSet> {
        Ok(self.flashcards.create_set(set_name, cards)?)
    }

    pub fn delete_flashcard_set(&self, set_name: &str) -> Result<()> {
        Ok(self.flashcards.delete_set(set_name)?)
    }

    pub fn rename_set(&self, old_name: &str, new_name: &str) -> Result<FlashcardSet> {
        Ok(self.flashcards.rename_set(old_name, new_name)?)
    }

    pub fn add_cards(&self, set_name: &str, cards: &[NewCard]) -> Result<FlashcardSet> {
        Ok(self.flashcards.add_cards(set_name, cards)?)
    }

    pub fn remove_card(&self, set_name: &str, index: usize) -> Result<()> {
        self.flashcards.remove_card(set_name, index)?;
        Ok(())
    }

    pub fn set_stats(&self, set_name: &str) -> Result<SetStats> {
        Ok(self.flashcards.set_stats(set_name)?)
    }

    // ==================== Progress ====================

    pub fn update_card_progress(
        &self,
        set_name: &str,
        index: usize,
        learned: bool,
        correct: bool,
    ) -> Result<CardProgress> {
        Ok(self
            .flashcards
            .update_card_progress(set_name, index, learned, correct)?)
    }

    /// Record a study answer: correct marks the card learned, wrong clears it
    pub fn record_answer(&self, set_name: &str, index: usize, correct: bool) -> Result<CardProgress> {
        self.update_card_progress(set_name, index, correct, correct)
    }

    pub fn reset_progress(&self, set_name: &str) -> Result<FlashcardSet> {
        Ok(self.flashcards.reset_progress(set_name)?)
    }

    // ==================== Study ====================

    pub fn start_session(
        &self,
        set_name: &str,
        shuffle: bool,
        only_unlearned: bool,
    ) -> Result<StudySession> {
        let mut session = StudySession::new(self.get_set(set_name)?);
        if only_unlearned {
            session.only_unlearned(true);
        }
        if shuffle {
            session.shuffle();
        }
        Ok(session)
    }

    /// Persist the answer for the session's current card, then advance the
    /// session. A failed save leaves the session untouched.
    /// Returns `None` when the session was already complete.
    pub fn answer(&self, session: &mut StudySession, correct: bool) -> Result<Option<CardProgress>> {
        let Some((index, _)) = session.current() else {
            return Ok(None);
        };
        let progress = self.record_answer(&session.set().set_name, index, correct)?;
        session.record(correct);
        Ok(Some(progress))
    }

    pub fn build_quiz(&self, set_name: &str, choices: usize) -> Result<Vec<QuizQuestion>> {
        let set = self.get_set(set_name)?;
        Ok(flashcards::build_quiz(&set, choices))
    }

    // ==================== Import / Export ====================

    /// Parse cards from `reader` and add them to `set_name`, creating the set
    /// if it does not exist yet
    pub fn import_cards<R: Read>(
        &self,
        set_name: &str,
        mut reader: R,
        format: TransferFormat,
        term_delimiter: &str,
        line_delimiter: &str,
    ) -> Result<FlashcardSet> {
        let cards = match format {
            TransferFormat::Csv => transfer::import_csv(reader)?,
            TransferFormat::Json => {
                let mut content = String::new();
                reader.read_to_string(&mut content).map_err(TransferError::from)?;
                let set = transfer::import_json(&content)?;
                set.cards.iter().map(NewCard::from).collect()
            }
            TransferFormat::Text => {
                let mut content = String::new();
                reader.read_to_string(&mut content).map_err(TransferError::from)?;
                transfer::parse_delimited(&content, term_delimiter, line_delimiter)?
            }
        };

        match self.flashcards.get_set(set_name) {
            Ok(_) => self.add_cards(set_name, &cards),
            Err(FlashcardStorageError::SetNotFound(_)) => self.create_flashcard_set(set_name, &cards),
            Err(e) => Err(e.into()),
        }
    }

    /// Write a set in CSV or JSON form
    pub fn export_set<W: Write>(&self, set_name: &str, mut writer: W, format: TransferFormat) -> Result<()> {
        let set = self.get_set(set_name)?;
        match format {
            TransferFormat::Json => {
                let json = transfer::export_json(&set)?;
                writer.write_all(json.as_bytes()).map_err(TransferError::from)?;
                writer.write_all(b"\n").map_err(TransferError::from)?;
            }
            TransferFormat::Csv | TransferFormat::Text => transfer::export_csv(&set, writer)?,
        }
        Ok(())
    }

    // ==================== Accounts ====================

    pub fn list_accounts(&self) -> Result<Vec<String>> {
        Ok(self.profiles.list_usernames()?)
    }

    /// Create an account and sign in as it
    pub fn register(
        &mut self,
        username: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<UserProfile> {
        let profile = self.profiles.register(username, password, full_name)?;
        self.current_user = Some(username.trim().to_string());
        Ok(profile)
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<UserProfile> {
        let profile = self.profiles.authenticate(username, password)?;
        self.current_user = Some(username.trim().to_string());
        Ok(profile)
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.current_user.take() {
            log::info!("{} signed out", user);
        }
    }

    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    /// Switch to another existing account without a password, as the
    /// accounts page does
    pub fn switch_account(&mut self, username: &str) -> Result<UserProfile> {
        let profile = self
            .profiles
            .get_profile(username)?
            .ok_or_else(|| ProfileError::AccountNotFound(username.trim().to_string()))?;
        self.current_user = Some(username.trim().to_string());
        log::info!("Switched to account {}", username.trim());
        Ok(profile)
    }

    /// Load a profile; an unknown username yields an empty profile
    pub fn load_profile(&self, username: &str) -> Result<UserProfile> {
        Ok(self.profiles.get_profile(username)?.unwrap_or_default())
    }

    pub fn save_profile(&self, username: &str, profile: &UserProfile) -> Result<()> {
        Ok(self.profiles.save_profile(username, profile)?)
    }

    pub fn update_profile(&self, username: &str, update: ProfileUpdate) -> Result<UserProfile> {
        Ok(self.profiles.update_profile(username, update)?)
    }

    /// Update the signed-in account's profile
    pub fn update_current_profile(&self, update: ProfileUpdate) -> Result<UserProfile> {
        let username = self.current_user().ok_or(ControllerError::NotSignedIn)?;
        self.update_profile(username, update)
    }

    pub fn delete_account(&mut self, username: &str) -> Result<()> {
        self.profiles.delete_account(username)?;
        if self.current_user.as_deref() == Some(username.trim()) {
            self.current_user = None;
        }
        Ok(())
    }
}
