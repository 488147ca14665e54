//! Data models for flashcard sets

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-card study progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardProgress {
    #[serde(default)]
    pub learned: bool,
    #[serde(default)]
    pub times_correct: u32,
    #[serde(default)]
    pub times_wrong: u32,
}

impl CardProgress {
    /// Apply one answer to this record
    pub fn record(&mut self, learned: bool, correct: bool) {
        self.learned = learned;
        if correct {
            self.times_correct += 1;
        } else {
            self.times_wrong += 1;
        }
    }

    pub fn attempts(&self) -> u32 {
        self.times_correct + self.times_wrong
    }
}

/// A flashcard with a question and an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub question: String,
    pub answer: String,
    /// Absent until the card has been studied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<CardProgress>,
}

impl Card {
    pub fn new(question: String, answer: String) -> Self {
        Self {
            question,
            answer,
            progress: None,
        }
    }

    pub fn is_learned(&self) -> bool {
        self.progress.map_or(false, |p| p.learned)
    }
}

/// Question/answer pair supplied when creating or extending a set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCard {
    pub question: String,
    pub answer: String,
}

impl NewCard {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Trim both sides, returning `None` if either ends up empty
    pub fn normalized(&self) -> Option<Card> {
        let question = self.question.trim();
        let answer = self.answer.trim();
        if question.is_empty() || answer.is_empty() {
            return None;
        }
        Some(Card::new(question.to_string(), answer.to_string()))
    }
}

impl From<&Card> for NewCard {
    fn from(card: &Card) -> Self {
        Self {
            question: card.question.clone(),
            answer: card.answer.clone(),
        }
    }
}

/// A named, ordered collection of cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashcardSet {
    pub set_name: String,
    pub created_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl FlashcardSet {
    pub fn new(set_name: String, cards: Vec<Card>) -> Self {
        Self {
            set_name,
            created_date: Utc::now(),
            updated_date: None,
            cards,
        }
    }

    pub fn touch(&mut self) {
        self.updated_date = Some(Utc::now());
    }

    pub fn learned_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_learned()).count()
    }

    pub fn stats(&self) -> SetStats {
        SetStats::for_cards(&self.set_name, &self.cards)
    }
}

/// Aggregate study statistics for a set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetStats {
    pub set_name: String,
    pub total: usize,
    pub learned: usize,
    /// Floor of learned / total * 100, 0 for an empty set
    pub mastered_percent: u32,
    pub times_correct: u32,
    pub times_wrong: u32,
    /// Floor of correct / attempts * 100, `None` before any attempt
    pub accuracy_percent: Option<u32>,
}

impl SetStats {
    pub fn for_cards(set_name: &str, cards: &[Card]) -> Self {
        let total = cards.len();
        let learned = cards.iter().filter(|c| c.is_learned()).count();
        let (times_correct, times_wrong) = cards
            .iter()
            .filter_map(|c| c.progress)
            .fold((0u32, 0u32), |(ok, bad), p| {
                (ok + p.times_correct, bad + p.times_wrong)
            });

        let mastered_percent = if total > 0 {
            (learned * 100 / total) as u32
        } else {
            0
        };

        let attempts = times_correct + times_wrong;
        let accuracy_percent = if attempts > 0 {
            Some((u64::from(times_correct) * 100 / u64::from(attempts)) as u32)
        } else {
            None
        };

        Self {
            set_name: set_name.to_string(),
            total,
            learned,
            mastered_percent,
            times_correct,
            times_wrong,
            accuracy_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_trims_and_drops_blank() {
        let card = NewCard::new("  2 + 2 ", " 4\n").normalized().unwrap();
        assert_eq!(card.question, "2 + 2");
        assert_eq!(card.answer, "4");
        assert!(card.progress.is_none());

        assert!(NewCard::new("question", "   ").normalized().is_none());
        assert!(NewCard::new("", "answer").normalized().is_none());
    }

    #[test]
    fn test_progress_record() {
        let mut progress = CardProgress::default();
        progress.record(true, true);
        progress.record(false, false);
        progress.record(false, false);

        assert!(!progress.learned);
        assert_eq!(progress.times_correct, 1);
        assert_eq!(progress.times_wrong, 2);
        assert_eq!(progress.attempts(), 3);
    }

    #[test]
    fn test_stats() {
        let mut cards = vec![
            Card::new("a".into(), "1".into()),
            Card::new("b".into(), "2".into()),
            Card::new("c".into(), "3".into()),
        ];
        cards[0].progress = Some(CardProgress {
            learned: true,
            times_correct: 2,
            times_wrong: 1,
        });

        let stats = SetStats::for_cards("letters", &cards);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.learned, 1);
        assert_eq!(stats.mastered_percent, 33);
        assert_eq!(stats.accuracy_percent, Some(66));

        let empty = SetStats::for_cards("empty", &[]);
        assert_eq!(empty.mastered_percent, 0);
        assert_eq!(empty.accuracy_percent, None);
    }

    #[test]
    fn test_card_without_progress_deserializes() {
        let card: Card = serde_json::from_str(r#"{"question": "q", "answer": "a"}"#).unwrap();
        assert!(card.progress.is_none());
        assert!(!card.is_learned());

        let json = serde_json::to_string(&card).unwrap();
        assert!(!json.contains("progress"));
    }
}
