use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use remora_lib::config::Config;
use remora_lib::flashcards::{FlashcardSet, NewCard};
use remora_lib::FlashcardController;

/// Shared application state for CLI commands
pub struct App {
    pub config: Config,
    pub config_path: PathBuf,
    pub controller: FlashcardController,
}

impl App {
    /// Load the config and open the stores
    pub fn new(data_dir: Option<&Path>, config_path: Option<&Path>) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path.to_path_buf(),
            None => Config::default_path().context("Failed to locate config directory")?,
        };

        let config = Config::load(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

        // --data-dir applies to this run only and never reaches config.toml
        let controller = match data_dir {
            Some(dir) => FlashcardController::open(dir.to_path_buf()),
            None => FlashcardController::from_config(&config)
                .context("Failed to get data directory")?,
        };

        Ok(Self {
            config,
            config_path,
            controller,
        })
    }

    /// Find a set by name (case-insensitive prefix match)
    pub fn find_set(&self, name: &str) -> Result<FlashcardSet> {
        let sets = self.controller.get_all_sets()
            .context("Failed to list flashcard sets")?;

        if let Some(set) = sets.iter().find(|s| s.set_name == name) {
            return Ok(set.clone());
        }

        let name_lower = name.to_lowercase();

        if let Some(set) = sets.iter().find(|s| s.set_name.to_lowercase() == name_lower) {
            return Ok(set.clone());
        }

        let matches: Vec<&FlashcardSet> = sets.iter()
            .filter(|s| s.set_name.to_lowercase().starts_with(&name_lower))
            .collect();

        match matches.len() {
            0 if sets.is_empty() => bail!("No flashcard sets found. Create some flashcards first!"),
            0 => bail!("No set matching '{}'. Available sets:\n{}", name,
                sets.iter().map(|s| format!("  - {}", s.set_name)).collect::<Vec<_>>().join("\n")),
            1 => Ok(matches[0].clone()),
            _ => bail!("Ambiguous set name '{}'. Matches:\n{}", name,
                matches.iter().map(|s| format!("  - {}", s.set_name)).collect::<Vec<_>>().join("\n")),
        }
    }

    /// Convert a 1-based card number into an index
    pub fn card_index(set: &FlashcardSet, card: usize) -> Result<usize> {
        if card == 0 || card > set.cards.len() {
            bail!("Card {} does not exist; '{}' has cards 1-{}", card, set.set_name, set.cards.len());
        }
        Ok(card - 1)
    }

    /// Parse "question::answer" arguments
    pub fn parse_cards(args: &[String]) -> Result<Vec<NewCard>> {
        args.iter()
            .map(|arg| match arg.split_once("::") {
                Some((question, answer)) => Ok(NewCard::new(question, answer)),
                None => bail!("Card '{}' must look like \"question::answer\"", arg),
            })
            .collect()
    }

    /// Read a password from REMORA_PASSWORD, or the first line of stdin
    pub fn read_password() -> Result<String> {
        if let Ok(password) = std::env::var("REMORA_PASSWORD") {
            return Ok(password);
        }

        eprint!("Password: ");
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)
            .context("Failed to read password")?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
