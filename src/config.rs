//! User configuration stored as TOML
//!
//! ```toml
//! data_dir = "/home/me/flashcards"   # optional
//! theme = "dark"                      # light | dark | auto
//!
//! [study]
//! shuffle = true
//! only_unlearned = false
//! quiz_choices = 4
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flashcards::quiz::MIN_CHOICES;
use crate::storage::{self, StorageError};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config directory not found")]
    ConfigDirNotFound,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Preferred color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Auto,
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "auto" => Ok(Self::Auto),
            other => Err(format!("Unknown theme '{}' (expected light, dark or auto)", other)),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Auto => "auto",
        };
        f.write_str(name)
    }
}

/// Defaults applied when starting a study session or quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyDefaults {
    pub shuffle: bool,
    pub only_unlearned: bool,
    pub quiz_choices: usize,
}

impl Default for StudyDefaults {
    fn default() -> Self {
        Self {
            shuffle: false,
            only_unlearned: false,
            quiz_choices: 4,
        }
    }
}

impl StudyDefaults {
    pub fn quiz_choices(&self) -> usize {
        self.quiz_choices.max(MIN_CHOICES)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub theme: Theme,
    pub study: StudyDefaults,
}

impl Config {
    /// Default location of config.toml
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("remora").join("config.toml"))
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    /// Load a config file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        log::info!("Wrote config to {:?}", path);
        Ok(())
    }

    /// The configured data directory, or the platform default
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(storage::default_data_dir()?),
        }
    }
}
