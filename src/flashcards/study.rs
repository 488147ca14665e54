//! In-memory study session over one flashcard set
//!
//! The session owns a copy of the set and a visiting order. Recording an
//! answer mutates the copy the same way the store does and hands back the
//! card index so the caller can persist it.

use rand::seq::SliceRandom;

use super::models::{Card, CardProgress, FlashcardSet, SetStats};

#[derive(Debug, Clone)]
pub struct StudySession {
    set: FlashcardSet,
    order: Vec<usize>,
    position: usize,
    only_unlearned: bool,
}

impl StudySession {
    pub fn new(set: FlashcardSet) -> Self {
        let order = (0..set.cards.len()).collect();
        Self {
            set,
            order,
            position: 0,
            only_unlearned: false,
        }
    }

    pub fn set(&self) -> &FlashcardSet {
        &self.set
    }

    /// Randomize the visiting order and start over
    pub fn shuffle(&mut self) {
        self.rebuild_order();
        self.order.shuffle(&mut rand::thread_rng());
    }

    /// Restrict the session to cards not yet learned and start over
    pub fn only_unlearned(&mut self, enabled: bool) {
        self.only_unlearned = enabled;
        self.rebuild_order();
    }

    /// Start over in the stored order
    pub fn restart(&mut self) {
        self.rebuild_order();
    }

    fn rebuild_order(&mut self) {
        let only_unlearned = self.only_unlearned;
        self.order = self
            .set
            .cards
            .iter()
            .enumerate()
            .filter(|(_, card)| !only_unlearned || !card.is_learned())
            .map(|(i, _)| i)
            .collect();
        self.position = 0;
    }

    /// The card being studied, with its index in the set
    pub fn current(&self) -> Option<(usize, &Card)> {
        let index = *self.order.get(self.position)?;
        self.set.cards.get(index).map(|card| (index, card))
    }

    /// Record an answer for the current card and advance.
    /// A correct answer marks the card learned, a wrong one clears it.
    pub fn record(&mut self, correct: bool) -> Option<usize> {
        let index = *self.order.get(self.position)?;
        let card = self.set.cards.get_mut(index)?;
        card.progress
            .get_or_insert_with(CardProgress::default)
            .record(correct, correct);
        self.position += 1;
        Some(index)
    }

    /// Skip the current card without recording anything
    pub fn skip(&mut self) {
        if self.position < self.order.len() {
            self.position += 1;
        }
    }

    pub fn is_complete(&self) -> bool {
        self.position >= self.order.len()
    }

    /// Zero-based position within the visiting order
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of cards in this session's visiting order
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.order.len().saturating_sub(self.position)
    }

    /// Statistics over the whole set, including answers recorded this session
    pub fn stats(&self) -> SetStats {
        self.set.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> FlashcardSet {
        let mut cards: Vec<Card> = (1..=4)
            .map(|i| Card::new(format!("q{}", i), format!("a{}", i)))
            .collect();
        cards[1].progress = Some(CardProgress {
            learned: true,
            times_correct: 1,
            times_wrong: 0,
        });
        FlashcardSet::new("Sample".to_string(), cards)
    }

    #[test]
    fn test_visits_in_order() {
        let mut session = StudySession::new(sample_set());
        assert_eq!(session.len(), 4);

        let (index, card) = session.current().unwrap();
        assert_eq!(index, 0);
        assert_eq!(card.question, "q1");

        assert_eq!(session.record(true), Some(0));
        assert_eq!(session.current().unwrap().0, 1);
        assert_eq!(session.remaining(), 3);
    }

    #[test]
    fn test_record_updates_local_progress() {
        let mut session = StudySession::new(sample_set());

        session.record(false);
        session.record(false);

        let cards = &session.set().cards;
        let first = cards[0].progress.unwrap();
        assert!(!first.learned);
        assert_eq!(first.times_wrong, 1);

        let second = cards[1].progress.unwrap();
        assert!(!second.learned);
        assert_eq!(second.times_correct, 1);
        assert_eq!(second.times_wrong, 1);
    }

    #[test]
    fn test_completion() {
        let mut session = StudySession::new(sample_set());
        for _ in 0..4 {
            assert!(!session.is_complete());
            session.record(true);
        }

        assert!(session.is_complete());
        assert!(session.current().is_none());
        assert_eq!(session.record(true), None);
        assert_eq!(session.stats().mastered_percent, 100);
    }

    #[test]
    fn test_only_unlearned() {
        let mut session = StudySession::new(sample_set());
        session.only_unlearned(true);

        assert_eq!(session.len(), 3);
        let visited: Vec<usize> = std::iter::from_fn(|| session.record(true)).collect();
        assert_eq!(visited, vec![0, 2, 3]);

        session.only_unlearned(true);
        assert!(session.is_empty());
        assert!(session.is_complete());
    }

    #[test]
    fn test_shuffle_keeps_every_card() {
        let mut session = StudySession::new(sample_set());
        session.record(true);
        session.shuffle();

        assert_eq!(session.position(), 0);
        let mut visited: Vec<usize> = std::iter::from_fn(|| {
            let index = session.current().map(|(i, _)| i);
            session.skip();
            index
        })
        .collect();
        visited.sort_unstable();
        assert_eq!(visited, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_empty_set() {
        let session = StudySession::new(FlashcardSet::new("Empty".to_string(), Vec::new()));
        assert!(session.is_complete());
        assert!(session.current().is_none());
    }
}
