mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use remora_lib::config::Theme;

#[derive(Parser)]
#[command(name = "remora", about = "Flashcard sets, study sessions and local accounts", version)]
struct Cli {
    /// Store data in this directory instead of the configured one
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Path to config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

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

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Outcome {
    Correct,
    Wrong,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum FileFormat {
    Csv,
    Json,
    Text,
}

#[derive(Subcommand)]
enum Command {
    /// Manage flashcard sets
    #[command(subcommand)]
    Sets(SetsCommand),

    /// Study a set interactively
    Study {
        /// Set name (case-insensitive prefix match)
        set: String,
        /// Visit cards in random order
        #[arg(long)]
        shuffle: bool,
        /// Only show cards not yet learned
        #[arg(long)]
        unlearned: bool,
    },

    /// Take a multiple choice quiz built from a set
    Quiz {
        /// Set name
        set: String,
        /// Number of choices per question
        #[arg(long)]
        choices: Option<usize>,
    },

    /// Record an answer for one card
    Mark {
        /// Set name
        set: String,
        /// Card number as shown by `sets show` (starting at 1)
        card: usize,
        outcome: Outcome,
    },

    /// Clear study progress for a set
    Reset {
        /// Set name
        set: String,
    },

    /// Show study statistics
    Stats {
        /// Limit to one set
        set: Option<String>,
    },

    /// Import cards into a set (created if missing)
    Import {
        /// Set name
        set: String,
        /// File to read ("-" for stdin)
        file: PathBuf,
        /// Input format (guessed from the extension when omitted)
        #[arg(long = "as")]
        file_format: Option<FileFormat>,
        /// Separator between question and answer for text input
        #[arg(long, default_value = "\t")]
        term_delimiter: String,
        /// Separator between cards for text input
        #[arg(long, default_value = "\n")]
        line_delimiter: String,
    },

    /// Export a set
    Export {
        /// Set name
        set: String,
        /// Output format
        #[arg(long = "as", default_value = "csv")]
        file_format: FileFormat,
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Local accounts and profiles
    #[command(subcommand)]
    Account(AccountCommand),

    /// Show or change configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand)]
enum SetsCommand {
    /// List all sets
    List,

    /// Show the cards of a set
    Show {
        /// Set name
        set: String,
    },

    /// Create a set
    Create {
        /// Set name
        name: String,
        /// A card as "question::answer" (repeatable)
        #[arg(long = "card")]
        cards: Vec<String>,
    },

    /// Delete a set
    Delete {
        /// Set name (exact)
        name: String,
    },

    /// Rename a set
    Rename {
        /// Current name
        set: String,
        /// New name
        new_name: String,
    },

    /// Append cards to a set
    Add {
        /// Set name
        set: String,
        /// A card as "question::answer" (repeatable)
        #[arg(long = "card", required = true)]
        cards: Vec<String>,
    },

    /// Remove one card from a set
    RemoveCard {
        /// Set name
        set: String,
        /// Card number (starting at 1)
        card: usize,
    },
}

#[derive(Subcommand)]
enum AccountCommand {
    /// Create an account (password from REMORA_PASSWORD or stdin)
    Register {
        username: String,
        #[arg(long)]
        full_name: Option<String>,
    },

    /// Check a username and password
    Login { username: String },

    /// List accounts
    List,

    /// Show a profile
    Show { username: String },

    /// Change profile fields
    Update {
        username: String,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        age: Option<u32>,
    },

    /// Delete an account
    Delete { username: String },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Store the preferred theme
    SetTheme { theme: Theme },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let app = app::App::new(cli.data_dir.as_deref(), cli.config.as_deref())?;

    match cli.command {
        Command::Sets(subcmd) => match subcmd {
            SetsCommand::List => commands::sets::run_list(&app, &cli.format, use_color)?,
            SetsCommand::Show { set } => commands::sets::run_show(&app, &set, &cli.format, use_color)?,
            SetsCommand::Create { name, cards } => {
                commands::sets::run_create(&app, &name, &cards, &cli.format)?
            }
            SetsCommand::Delete { name } => commands::sets::run_delete(&app, &name)?,
            SetsCommand::Rename { set, new_name } => {
                commands::sets::run_rename(&app, &set, &new_name)?
            }
            SetsCommand::Add { set, cards } => commands::sets::run_add(&app, &set, &cards)?,
            SetsCommand::RemoveCard { set, card } => {
                commands::sets::run_remove_card(&app, &set, card)?
            }
        },
        Command::Study { set, shuffle, unlearned } => {
            commands::study::run(&app, &set, shuffle, unlearned, use_color)?;
        }
        Command::Quiz { set, choices } => {
            commands::quiz::run(&app, &set, choices, use_color)?;
        }
        Command::Mark { set, card, outcome } => {
            commands::progress::run_mark(&app, &set, card, outcome, &cli.format)?;
        }
        Command::Reset { set } => commands::progress::run_reset(&app, &set)?,
        Command::Stats { set } => {
            commands::progress::run_stats(&app, set.as_deref(), &cli.format, use_color)?;
        }
        Command::Import { set, file, file_format, term_delimiter, line_delimiter } => {
            commands::transfer::run_import(
                &app,
                &set,
                &file,
                file_format,
                &term_delimiter,
                &line_delimiter,
            )?;
        }
        Command::Export { set, file_format, output } => {
            commands::transfer::run_export(&app, &set, file_format, output.as_deref())?;
        }
        Command::Account(subcmd) => {
            let mut app = app;
            match subcmd {
                AccountCommand::Register { username, full_name } => {
                    commands::account::run_register(&mut app, &username, full_name.as_deref(), &cli.format)?
                }
                AccountCommand::Login { username } => {
                    commands::account::run_login(&mut app, &username, &cli.format)?
                }
                AccountCommand::List => commands::account::run_list(&app, &cli.format)?,
                AccountCommand::Show { username } => {
                    commands::account::run_show(&app, &username, &cli.format)?
                }
                AccountCommand::Update { username, full_name, email, age } => {
                    commands::account::run_update(&app, &username, full_name, email, age, &cli.format)?
                }
                AccountCommand::Delete { username } => {
                    commands::account::run_delete(&mut app, &username)?
                }
            }
        }
        Command::Config(subcmd) => {
            let mut app = app;
            match subcmd {
                ConfigCommand::Show => commands::config::run_show(&app, &cli.format)?,
                ConfigCommand::Path => commands::config::run_path(&app),
                ConfigCommand::SetTheme { theme } => commands::config::run_set_theme(&mut app, theme)?,
            }
        }
    }

    Ok(())
}
