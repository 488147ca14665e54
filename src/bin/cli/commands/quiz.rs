use std::io::{BufRead, Write};

use anyhow::{bail, Result};

use remora_lib::flashcards::QuizQuestion;

use crate::app::App;
use crate::render::terminal::{self, Color};

pub fn run(app: &App, name: &str, choices: Option<usize>, use_color: bool) -> Result<()> {
    let set = app.find_set(name)?;
    if set.cards.is_empty() {
        bail!("'{}' has no cards to quiz on", set.set_name);
    }

    let choices = choices.unwrap_or_else(|| app.config.study.quiz_choices());
    let questions = app.controller.build_quiz(&set.set_name, choices)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let score = quiz_loop(&questions, stdin.lock(), stdout.lock(), use_color)?;
    log::debug!("Quiz on {} scored {}/{}", set.set_name, score, questions.len());
    Ok(())
}

/// Ask each question in turn and return the number answered correctly.
/// Answers are choice numbers; anything else is asked again, `q` stops.
pub fn quiz_loop<R: BufRead, W: Write>(
    questions: &[QuizQuestion],
    mut input: R,
    mut out: W,
    use_color: bool,
) -> Result<usize> {
    let mut score = 0;
    let mut asked = 0;
    let mut line = String::new();

    'questions: for (n, question) in questions.iter().enumerate() {
        writeln!(out, "\nQuestion {}/{}", n + 1, questions.len())?;
        writeln!(out, "{}", terminal::paint(&question.prompt, Color::BOLD, use_color))?;
        for (i, choice) in question.choices.iter().enumerate() {
            writeln!(out, "  {}) {}", i + 1, choice)?;
        }

        let choice = loop {
            write!(out, "Answer: ")?;
            out.flush()?;
            line.clear();
            if input.read_line(&mut line)? == 0 {
                break 'questions;
            }
            let reply = line.trim();
            if reply.eq_ignore_ascii_case("q") {
                break 'questions;
            }
            match reply.parse::<usize>() {
                Ok(c) if (1..=question.choices.len()).contains(&c) => break c - 1,
                _ => writeln!(out, "Pick a number from 1 to {}", question.choices.len())?,
            }
        };

        asked += 1;
        if question.is_correct(choice) {
            score += 1;
            writeln!(out, "{}", terminal::paint("Correct!", Color::GREEN, use_color))?;
        } else {
            writeln!(
                out,
                "{} The answer was: {}",
                terminal::paint("Wrong.", Color::RED, use_color),
                question.correct_answer().unwrap_or("?")
            )?;
        }
    }

    writeln!(out, "\nScore: {}/{}", score, asked)?;
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions() -> Vec<QuizQuestion> {
        vec![
            QuizQuestion {
                card_index: 0,
                prompt: "Capital of Peru?".to_string(),
                choices: vec!["Quito".to_string(), "Lima".to_string()],
                correct_choice: 1,
            },
            QuizQuestion {
                card_index: 1,
                prompt: "Capital of Chile?".to_string(),
                choices: vec!["Santiago".to_string(), "Bogotá".to_string()],
                correct_choice: 0,
            },
        ]
    }

    #[test]
    fn test_scores_answers() {
        let mut out = Vec::new();
        let score = quiz_loop(&questions(), "2\n9\nx\n2\n".as_bytes(), &mut out, false).unwrap();
        assert_eq!(score, 1);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Pick a number from 1 to 2"));
        assert!(text.contains("The answer was: Santiago"));
        assert!(text.contains("Score: 1/2"));
    }

    #[test]
    fn test_quit_counts_only_asked() {
        let mut out = Vec::new();
        let score = quiz_loop(&questions(), "2\nq\n".as_bytes(), &mut out, false).unwrap();
        assert_eq!(score, 1);
        assert!(String::from_utf8(out).unwrap().contains("Score: 1/1"));
    }
}
