use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::Card;
use crate::rng::{shuffle_slice, RandomSource};

/// Spent cards, most recent on top (end of the sequence).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardPile {
    cards: Vec<Card>,
}

impl DiscardPile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn add_multiple(&mut self, cards: Vec<Card>) {
        self.cards.extend(cards);
    }

    pub fn peek_top(&self) -> Option<&Card> {
        self.cards.last()
    }

    /// Empties the pile, returning its cards bottom first.
    pub fn take_all(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }

    /// Empties the pile and returns its cards in shuffled order.
    /// The shuffle runs on the extracted cards; the pile is simply left empty.
    pub fn shuffle_and_take_all<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Vec<Card> {
        let mut cards = self.take_all();
        shuffle_slice(&mut cards, rng);
        debug!(count = cards.len(), "discard pile recycled");
        cards
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn size(&self) -> usize {
        self.cards.len()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
