use anyhow::{Context, Result};

use crate::app::App;
use crate::render::terminal;
use crate::{Outcome, OutputFormat};

pub fn run_mark(app: &App, name: &str, card: usize, outcome: Outcome, format: &OutputFormat) -> Result<()> {
    let set = app.find_set(name)?;
    let index = App::card_index(&set, card)?;
    let correct = matches!(outcome, Outcome::Correct);

    let progress = app.controller.record_answer(&set.set_name, index, correct)
        .context("Failed to save progress")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "setName": set.set_name,
                "card": card,
                "progress": progress,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Card {} of '{}': {} (correct {}, wrong {})",
                card,
                set.set_name,
                if progress.learned { "learned" } else { "not learned" },
                progress.times_correct,
                progress.times_wrong);
        }
    }

    Ok(())
}

pub fn run_reset(app: &App, name: &str) -> Result<()> {
    let set = app.find_set(name)?;
    app.controller.reset_progress(&set.set_name)
        .context("Failed to reset progress")?;
    println!("Progress reset for '{}'", set.set_name);
    Ok(())
}

pub fn run_stats(app: &App, name: Option<&str>, format: &OutputFormat, use_color: bool) -> Result<()> {
    let stats = match name {
        Some(name) => vec![app.find_set(name)?.stats()],
        None => app.controller.get_all_sets()
            .context("Failed to load flashcard sets")?
            .iter()
            .map(|set| set.stats())
            .collect(),
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Plain => {
            if stats.is_empty() {
                println!("No flashcard sets found.");
                return Ok(());
            }
            let blocks: Vec<String> = stats.iter()
                .map(|s| terminal::render_stats(s, use_color))
                .collect();
            println!("{}", blocks.join("\n\n"));
        }
    }

    Ok(())
}
