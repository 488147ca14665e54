use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use remora_lib::flashcards::StudySession;
use remora_lib::FlashcardController;

use crate::app::App;
use crate::render::terminal::{self, Color};

pub fn run(app: &App, name: &str, shuffle: bool, unlearned: bool, use_color: bool) -> Result<()> {
    let set = app.find_set(name)?;
    let defaults = &app.config.study;

    let session = app.controller.start_session(
        &set.set_name,
        shuffle || defaults.shuffle,
        unlearned || defaults.only_unlearned,
    )?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    study_loop(&app.controller, session, stdin.lock(), stdout.lock(), use_color)
}

/// Drive a session from line input: Enter reveals the answer, then
/// y/n records it, s skips, q quits.
pub fn study_loop<R: BufRead, W: Write>(
    controller: &FlashcardController,
    mut session: StudySession,
    mut input: R,
    mut out: W,
    use_color: bool,
) -> Result<()> {
    let total = session.len();
    if total == 0 {
        writeln!(out, "Nothing to study: every card in '{}' is learned.", session.set().set_name)?;
        return Ok(());
    }

    writeln!(out, "{}", terminal::paint(&session.set().set_name, Color::BOLD, use_color))?;

    let mut line = String::new();
    let mut skipped = 0;
    while let Some((_, card)) = session.current() {
        let question = card.question.clone();
        let answer = card.answer.clone();

        writeln!(out, "\nCard {}/{}", session.position() + 1, total)?;
        writeln!(out, "Q: {}", question)?;
        write!(out, "{}", terminal::paint("[Enter] reveal  ", Color::DIM, use_color))?;
        out.flush()?;
        if read_answer(&mut input, &mut line)?.is_none() {
            break;
        }

        writeln!(out, "A: {}", terminal::paint(&answer, Color::CYAN, use_color))?;

        let correct = loop {
            write!(out, "Correct? [y]es / [n]o / [s]kip / [q]uit: ")?;
            out.flush()?;
            match read_answer(&mut input, &mut line)? {
                None => return finish(&session, &mut out, use_color),
                Some(reply) => match reply.as_str() {
                    "y" | "yes" => break Some(true),
                    "n" | "no" => break Some(false),
                    "s" | "skip" => break None,
                    "q" | "quit" => return finish(&session, &mut out, use_color),
                    _ => continue,
                },
            }
        };

        match correct {
            Some(correct) => {
                controller.answer(&mut session, correct)
                    .context("Failed to save progress")?;
                let mark = if correct {
                    terminal::paint("\u{2713} learned", Color::GREEN, use_color)
                } else {
                    terminal::paint("\u{2717} keep practicing", Color::RED, use_color)
                };
                writeln!(out, "{}", mark)?;
            }
            None => {
                session.skip();
                skipped += 1;
            }
        }
    }

    if session.is_complete() {
        if skipped == 0 {
            writeln!(out, "\nSet complete! You've finished all {} cards!", total)?;
        } else {
            writeln!(out, "\nEnd of set: {} answered, {} skipped.", total - skipped, skipped)?;
        }
    }
    finish(&session, &mut out, use_color)
}

/// Read one trimmed, lowercased line; `None` at end of input
fn read_answer<R: BufRead>(input: &mut R, line: &mut String) -> Result<Option<String>> {
    line.clear();
    if input.read_line(line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}

fn finish<W: Write>(session: &StudySession, out: &mut W, use_color: bool) -> Result<()> {
    writeln!(out, "\n{}", terminal::render_stats(&session.stats(), use_color))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use remora_lib::flashcards::NewCard;
    use tempfile::TempDir;

    fn setup() -> (FlashcardController, TempDir) {
        let temp = TempDir::new().unwrap();
        let controller = FlashcardController::open(temp.path().to_path_buf());
        controller
            .create_flashcard_set(
                "Elements",
                &[
                    NewCard::new("Symbol for gold?", "Au"),
                    NewCard::new("Symbol for iron?", "Fe"),
                    NewCard::new("Symbol for lead?", "Pb"),
                ],
            )
            .unwrap();
        (controller, temp)
    }

    #[test]
    fn test_full_session() {
        let (controller, _temp) = setup();
        let session = controller.start_session("Elements", false, false).unwrap();

        let input = "\ny\n\nmaybe\nn\n\ns\n";
        let mut out = Vec::new();
        study_loop(&controller, session, input.as_bytes(), &mut out, false).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("Set complete!"));
        assert!(text.contains("End of set: 2 answered, 1 skipped."));
        assert!(text.contains("Mastered: 1/3"));

        let set = controller.get_set("Elements").unwrap();
        assert!(set.cards[0].is_learned());
        assert_eq!(set.cards[1].progress.unwrap().times_wrong, 1);
        assert!(set.cards[2].progress.is_none());
    }

    #[test]
    fn test_every_card_answered_completes_set() {
        let (controller, _temp) = setup();
        let session = controller.start_session("Elements", false, false).unwrap();

        let mut out = Vec::new();
        study_loop(&controller, session, "\ny\n\ny\n\nn\n".as_bytes(), &mut out, false).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Set complete! You've finished all 3 cards!"));
        assert_eq!(controller.set_stats("Elements").unwrap().learned, 2);
    }

    #[test]
    fn test_quit_early() {
        let (controller, _temp) = setup();
        let session = controller.start_session("Elements", false, false).unwrap();

        let mut out = Vec::new();
        study_loop(&controller, session, "\ny\n\nq\n".as_bytes(), &mut out, false).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("Set complete!"));
        assert_eq!(controller.set_stats("Elements").unwrap().learned, 1);
    }

    #[test]
    fn test_nothing_left_to_study() {
        let (controller, _temp) = setup();
        for i in 0..3 {
            controller.record_answer("Elements", i, true).unwrap();
        }
        let session = controller.start_session("Elements", false, true).unwrap();

        let mut out = Vec::new();
        study_loop(&controller, session, "".as_bytes(), &mut out, false).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Nothing to study"));
    }
}
