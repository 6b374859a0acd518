use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};
use crate::errors::HandError;

/// Cards currently available to the player, bounded by `max_size`.
///
/// Every mutator keeps `size() <= max_size()`; an add that would break the
/// bound fails, leaves the hand untouched and returns the offered cards in
/// the error.
///
/// # Examples
///
/// ```
/// use chromatic_engine::catalog::find_template;
/// use chromatic_engine::errors::HandError;
/// use chromatic_engine::hand::Hand;
///
/// let strike = find_template("strike").unwrap();
/// let mut hand = Hand::new(1);
/// hand.add(strike.instantiate("a")).unwrap();
///
/// match hand.add(strike.instantiate("b")) {
///     Err(HandError::Full { rejected, .. }) => assert_eq!(rejected[0].id().as_str(), "b"),
///     other => panic!("unexpected {:?}", other),
/// }
/// assert_eq!(hand.size(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HandRecord", into = "HandRecord")]
pub struct Hand {
    cards: Vec<Card>,
    max_size: usize,
}

/// Wire form of a hand; converted through [`Hand::with_cards`] so capacity is
/// checked on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HandRecord {
    cards: Vec<Card>,
    max_size: usize,
}

impl TryFrom<HandRecord> for Hand {
    type Error = HandError;

    fn try_from(rec: HandRecord) -> Result<Self, Self::Error> {
        Hand::with_cards(rec.cards, rec.max_size)
    }
}

impl From<Hand> for HandRecord {
    fn from(hand: Hand) -> Self {
        HandRecord {
            cards: hand.cards,
            max_size: hand.max_size,
        }
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_SIZE)
    }
}

impl Hand {
    pub const DEFAULT_MAX_SIZE: usize = 10;

    pub fn new(max_size: usize) -> Self {
        Self {
            cards: Vec::with_capacity(max_size),
            max_size,
        }
    }

    /// Builds a hand already holding `cards`.
    ///
    /// # Errors
    ///
    /// [`HandError::OverCapacity`] when more cards than `max_size` are given.
    pub fn with_cards(cards: Vec<Card>, max_size: usize) -> Result<Self, HandError> {
        if cards.len() > max_size {
            return Err(HandError::OverCapacity {
                count: cards.len(),
                max_size,
            });
        }
        Ok(Self { cards, max_size })
    }

    pub fn add(&mut self, card: Card) -> Result<(), HandError> {
        if self.is_full() {
            return Err(HandError::Full {
                max_size: self.max_size,
                rejected: vec![card],
            });
        }
        self.cards.push(card);
        Ok(())
    }

    /// Adds all cards or none of them. Returns how many were added.
    pub fn add_multiple(&mut self, cards: Vec<Card>) -> Result<usize, HandError> {
        if cards.len() > self.available_space() {
            return Err(HandError::Full {
                max_size: self.max_size,
                rejected: cards,
            });
        }
        let added = cards.len();
        self.cards.extend(cards);
        Ok(added)
    }

    /// Removes the first card with the given identity.
    pub fn remove(&mut self, id: &CardId) -> Option<Card> {
        let pos = self.cards.iter().position(|c| c.id() == id)?;
        Some(self.cards.remove(pos))
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Card> {
        if index < self.cards.len() {
            Some(self.cards.remove(index))
        } else {
            None
        }
    }

    pub fn remove_all(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }

    pub fn contains(&self, id: &CardId) -> bool {
        self.cards.iter().any(|c| c.id() == id)
    }

    pub fn is_full(&self) -> bool {
        self.cards.len() >= self.max_size
    }

    pub fn available_space(&self) -> usize {
        self.max_size.saturating_sub(self.cards.len())
    }

    pub fn size(&self) -> usize {
        self.cards.len()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn get_at(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
