use anyhow::{Context, Result};

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run_list(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let sets = app.controller.get_all_sets().context("Failed to load flashcard sets")?;

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = sets.iter().map(|set| {
                serde_json::json!({
                    "setName": set.set_name,
                    "cardCount": set.cards.len(),
                    "learned": set.learned_count(),
                    "createdDate": set.created_date.to_rfc3339(),
                })
            }).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if sets.is_empty() {
                println!("No flashcard sets found.\nCreate some flashcards first!");
                return Ok(());
            }

            let name_width = sets.iter().map(|s| s.set_name.len()).max().unwrap_or(4).min(40).max(4);

            println!("{:<nw$} {:>5} {:>8} {}",
                "Name", "Cards", "Mastered", "Created", nw = name_width);
            println!("{} {} {} {}",
                "\u{2500}".repeat(name_width),
                "\u{2500}".repeat(5),
                "\u{2500}".repeat(8),
                "\u{2500}".repeat(10));

            for set in &sets {
                let stats = set.stats();
                let mastered = format!("{}%", stats.mastered_percent);
                let name = terminal::paint(&format!("{:<nw$}", set.set_name, nw = name_width), Color::BOLD, use_color);
                println!("{} {:>5} {:>8} {}",
                    name, stats.total, mastered, set.created_date.format("%Y-%m-%d"));
            }

            println!("\n{} sets total", sets.len());
        }
    }

    Ok(())
}

pub fn run_show(app: &App, name: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let set = app.find_set(name)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&set)?);
        }
        OutputFormat::Plain => {
            println!("{}", terminal::paint(&set.set_name, Color::BOLD, use_color));
            println!("{}", terminal::paint(
                &format!("Cards: {}  Created: {}", set.cards.len(), set.created_date.format("%Y-%m-%d %H:%M")),
                Color::DIM,
                use_color,
            ));
            println!();

            for (i, card) in set.cards.iter().enumerate() {
                println!("{:>3}. {}", i + 1, card.question);
                println!("     {} {}", terminal::paint("\u{2192}", Color::CYAN, use_color), card.answer);
                println!("     {}", terminal::card_status(card, use_color));
            }
        }
    }

    Ok(())
}

pub fn run_create(app: &App, name: &str, card_args: &[String], format: &OutputFormat) -> Result<()> {
    let cards = App::parse_cards(card_args)?;
    let set = app.controller.create_flashcard_set(name, &cards)
        .context("Failed to save flashcard set")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "setName": set.set_name,
                "cardCount": set.cards.len(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Flashcard set '{}' saved successfully!", set.set_name);
            println!("  Total cards saved: {}", set.cards.len());
        }
    }

    Ok(())
}

pub fn run_delete(app: &App, name: &str) -> Result<()> {
    app.controller.delete_flashcard_set(name)
        .context("Failed to delete set")?;
    println!("Flashcard set '{}' deleted successfully!", name);
    Ok(())
}

pub fn run_rename(app: &App, name: &str, new_name: &str) -> Result<()> {
    let set = app.find_set(name)?;
    let renamed = app.controller.rename_set(&set.set_name, new_name)
        .context("Failed to rename set")?;
    println!("Renamed '{}' to '{}'", set.set_name, renamed.set_name);
    Ok(())
}

pub fn run_add(app: &App, name: &str, card_args: &[String]) -> Result<()> {
    let set = app.find_set(name)?;
    let cards = App::parse_cards(card_args)?;
    let updated = app.controller.add_cards(&set.set_name, &cards)
        .context("Failed to add cards")?;
    println!("Added {} cards to '{}' ({} total)",
        updated.cards.len() - set.cards.len(), updated.set_name, updated.cards.len());
    Ok(())
}

pub fn run_remove_card(app: &App, name: &str, card: usize) -> Result<()> {
    let set = app.find_set(name)?;
    let index = App::card_index(&set, card)?;
    app.controller.remove_card(&set.set_name, index)
        .context("Failed to remove card")?;
    println!("Removed card {} (\"{}\") from '{}'", card, set.cards[index].question, set.set_name);
    Ok(())
}
