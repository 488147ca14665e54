//! Multiple choice questions built from a set's own answers

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::models::FlashcardSet;

/// Fewest choices a question offers when the set is large enough
pub const MIN_CHOICES: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Index of the card in its set
    pub card_index: usize,
    pub prompt: String,
    pub choices: Vec<String>,
    /// Index into `choices`
    pub correct_choice: usize,
}

impl QuizQuestion {
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_choice
    }

    /// `None` when `correct_choice` does not index into `choices`
    pub fn correct_answer(&self) -> Option<&str> {
        self.choices.get(self.correct_choice).map(String::as_str)
    }
}

/// Build one question per card, in card order.
///
/// Distractors are other cards' answers, deduplicated by exact text, so a
/// question never offers its own answer twice. A set with a single distinct
/// answer yields single-choice questions.
pub fn build_quiz(set: &FlashcardSet, choices: usize) -> Vec<QuizQuestion> {
    let choices = choices.max(MIN_CHOICES);
    let mut rng = rand::thread_rng();

    let mut answers: Vec<&str> = set.cards.iter().map(|c| c.answer.as_str()).collect();
    answers.sort_unstable();
    answers.dedup();

    set.cards
        .iter()
        .enumerate()
        .map(|(card_index, card)| {
            let correct = card.answer.as_str();
            let pool: Vec<&str> = answers.iter().copied().filter(|a| *a != correct).collect();

            let mut options: Vec<String> = pool
                .choose_multiple(&mut rng, choices - 1)
                .map(|a| a.to_string())
                .collect();
            options.push(correct.to_string());
            options.shuffle(&mut rng);

            let correct_choice = options
                .iter()
                .position(|o| o == correct)
                .unwrap_or_default();

            QuizQuestion {
                card_index,
                prompt: card.question.clone(),
                choices: options,
                correct_choice,
            }
        })
        .collect()
}
