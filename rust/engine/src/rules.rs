use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::cards::{Rarity, MAX_CARD_COST};
use crate::deck::Deck;

/// Required number of cards in a constructed deck.
pub const DECK_SIZE: usize = 40;
/// Copies allowed per card template.
pub const MAX_COPIES: usize = 4;
/// Copies allowed per Legendary template.
pub const MAX_LEGENDARY_COPIES: usize = 1;

/// A single broken deck-construction rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    BlankName,
    WrongSize { expected: usize, actual: usize },
    TooManyCopies { effect_key: String, count: usize, max: usize },
    TooManyLegendary { effect_key: String, count: usize, max: usize },
    DuplicateId { id: String },
    CostOutOfRange { id: String, cost: u8 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::BlankName => write!(f, "deck name must not be blank"),
            Violation::WrongSize { expected, actual } => {
                write!(f, "deck must contain exactly {} cards, found {}", expected, actual)
            }
            Violation::TooManyCopies {
                effect_key,
                count,
                max,
            } => write!(f, "{} copies of '{}' (max {})", count, effect_key, max),
            Violation::TooManyLegendary {
                effect_key,
                count,
                max,
            } => write!(
                f,
                "{} copies of legendary '{}' (max {})",
                count, effect_key, max
            ),
            Violation::DuplicateId { id } => write!(f, "card id '{}' appears more than once", id),
            Violation::CostOutOfRange { id, cost } => {
                write!(f, "card '{}' costs {} (max {})", id, cost, MAX_CARD_COST)
            }
        }
    }
}

/// Structural deck-construction rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckRules {
    pub deck_size: usize,
    pub max_copies: usize,
    pub max_legendary_copies: usize,
}

impl Default for DeckRules {
    fn default() -> Self {
        Self {
            deck_size: DECK_SIZE,
            max_copies: MAX_COPIES,
            max_legendary_copies: MAX_LEGENDARY_COPIES,
        }
    }
}

impl DeckRules {
    /// Checks a deck against every rule.
    ///
    /// Unlike a fail-fast check, every broken rule is collected so the caller
    /// can report the complete list at once.
    ///
    /// # Errors
    ///
    /// Returns all [`Violation`]s found, in a stable order: name, size, ids,
    /// costs, then copy limits sorted by effect key.
    ///
    /// # Examples
    ///
    /// ```
    /// use chromatic_engine::deck::Deck;
    /// use chromatic_engine::rules::{DeckRules, Violation};
    ///
    /// let deck = Deck::new("Empty", Vec::new());
    /// let violations = DeckRules::default().validate(&deck).unwrap_err();
    /// assert_eq!(
    ///     violations,
    ///     vec![Violation::WrongSize { expected: 40, actual: 0 }]
    /// );
    /// ```
    pub fn validate(&self, deck: &Deck) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();

        if deck.name().trim().is_empty() {
            violations.push(Violation::BlankName);
        }
        if deck.card_count() != self.deck_size {
            violations.push(Violation::WrongSize {
                expected: self.deck_size,
                actual: deck.card_count(),
            });
        }

        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for card in deck.cards() {
            let id = card.id().as_str();
            if !seen.insert(id) && reported.insert(id) {
                violations.push(Violation::DuplicateId { id: id.to_string() });
            }
        }
        for card in deck.cards() {
            if card.cost() > MAX_CARD_COST {
                violations.push(Violation::CostOutOfRange {
                    id: card.id().to_string(),
                    cost: card.cost(),
                });
            }
        }

        // key -> (count, any copy legendary)
        let mut copies: BTreeMap<&str, (usize, bool)> = BTreeMap::new();
        for card in deck.cards() {
            let entry = copies.entry(card.effect_key()).or_insert((0, false));
            entry.0 += 1;
            entry.1 |= card.rarity() == Rarity::Legendary;
        }
        for (key, (count, legendary)) in copies {
            if legendary && count > self.max_legendary_copies {
                violations.push(Violation::TooManyLegendary {
                    effect_key: key.to_string(),
                    count,
                    max: self.max_legendary_copies,
                });
            } else if count > self.max_copies {
                violations.push(Violation::TooManyCopies {
                    effect_key: key.to_string(),
                    count,
                    max: self.max_copies,
                });
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}
