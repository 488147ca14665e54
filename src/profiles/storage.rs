//! Profile storage implementation
//!
//! Every account lives in `user_profiles.json`, a JSON object keyed by
//! username.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::Utc;

use super::errors::{ProfileError, ProfileResult as Result};
use super::models::*;
use super::password;
use crate::storage;

const PROFILES_FILE: &str = "user_profiles.json";

type ProfileMap = BTreeMap<String, UserProfile>;

/// Storage for local accounts and their profiles
pub struct ProfileStorage {
    data_dir: PathBuf,
}

impl ProfileStorage {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    // ===== File paths =====

    pub fn profiles_file(&self) -> PathBuf {
        self.data_dir.join(PROFILES_FILE)
    }

    fn load(&self) -> Result<ProfileMap> {
        Ok(storage::read_json_or_default(&self.profiles_file())?)
    }

    fn save(&self, profiles: &ProfileMap) -> Result<()> {
        storage::write_json_atomic(&self.profiles_file(), profiles)?;
        Ok(())
    }

    // ===== Profile CRUD =====

    /// List all usernames, sorted
    pub fn list_usernames(&self) -> Result<Vec<String>> {
        Ok(self.load()?.into_keys().collect())
    }

    /// Get a user's profile, if the account exists
    pub fn get_profile(&self, username: &str) -> Result<Option<UserProfile>> {
        Ok(self.load()?.remove(username.trim()))
    }

    /// Insert or replace a user's profile
    pub fn save_profile(&self, username: &str, profile: &UserProfile) -> Result<()> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ProfileError::MissingCredentials);
        }

        let mut profiles = self.load()?;
        profiles.insert(username.to_string(), profile.clone());
        self.save(&profiles)?;

        log::info!("Saved profile for {}", username);
        Ok(())
    }

    /// Update profile fields of an existing account
    pub fn update_profile(&self, username: &str, update: ProfileUpdate) -> Result<UserProfile> {
        let username = username.trim();
        let mut profiles = self.load()?;
        let profile = profiles
            .get_mut(username)
            .ok_or_else(|| ProfileError::AccountNotFound(username.to_string()))?;

        update.apply(profile);
        let updated = profile.clone();
        self.save(&profiles)?;

        log::info!("Updated profile for {}", username);
        Ok(updated)
    }

    /// Delete an account
    pub fn delete_account(&self, username: &str) -> Result<()> {
        let username = username.trim();
        let mut profiles = self.load()?;
        if profiles.remove(username).is_none() {
            return Err(ProfileError::AccountNotFound(username.to_string()));
        }
        self.save(&profiles)?;

        log::info!("Deleted account {}", username);
        Ok(())
    }

    // ===== Registration and login =====

    /// Create a new account. The full name defaults to the username.
    pub fn register(
        &self,
        username: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<UserProfile> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ProfileError::MissingCredentials);
        }

        let mut profiles = self.load()?;
        if profiles.contains_key(username) {
            return Err(ProfileError::UsernameTaken(username.to_string()));
        }

        let full_name = full_name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(username);

        let profile = UserProfile::new(full_name.to_string(), password::hash_password(password)?);
        profiles.insert(username.to_string(), profile.clone());
        self.save(&profiles)?;

        log::info!("Created account {}", username);
        Ok(profile)
    }

    /// Check credentials and stamp the login time.
    /// Unknown users and wrong passwords fail the same way.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<UserProfile> {
        let username = username.trim();
        let password = password.trim();

        let mut profiles = self.load()?;
        let profile = profiles
            .get_mut(username)
            .ok_or(ProfileError::InvalidCredentials)?;

        let verified = match password::verify_password(password, &profile.password_hash) {
            Ok(verified) => verified,
            Err(ProfileError::MalformedHash(reason)) => {
                log::warn!("Stored password hash for {} is unreadable: {}", username, reason);
                false
            }
            Err(e) => return Err(e),
        };
        if !verified {
            log::debug!("Rejected login for {}", username);
            return Err(ProfileError::InvalidCredentials);
        }

        if password::needs_rehash(&profile.password_hash) {
            log::warn!("Upgrading legacy password hash for {}", username);
            profile.password_hash = password::hash_password(password)?;
        }
        profile.last_login = Some(Utc::now());

        let profile = profile.clone();
        self.save(&profiles)?;

        log::info!("{} signed in", username);
        Ok(profile)
    }
}
