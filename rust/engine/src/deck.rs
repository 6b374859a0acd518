use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::catalog::find_template;
use crate::errors::DeckError;

/// A named deck template: the list of cards a combat starts from.
/// Owns no runtime pile state; [`crate::combat::CombatPiles`] expands it.
///
/// # Examples
///
/// ```
/// use chromatic_engine::deck::find_preset;
/// use chromatic_engine::rules::DeckRules;
///
/// let deck = find_preset("Kaelen Starter").unwrap().instantiate("My Kaelen").unwrap();
/// assert_eq!(deck.name(), "My Kaelen");
/// assert_eq!(deck.card_count(), 40);
/// assert!(DeckRules::default().validate(&deck).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    /// Unique name within a deck registry
    name: String,
    /// Cards in list order; quantities are implied by repetition
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(name: impl Into<String>, cards: Vec<Card>) -> Self {
        Self {
            name: name.into(),
            cards,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Number of cards minted from the given template.
    pub fn copies_of(&self, effect_key: &str) -> usize {
        self.cards
            .iter()
            .filter(|c| c.effect_key() == effect_key)
            .count()
    }

    pub fn renamed(&self, name: impl Into<String>) -> Deck {
        Deck {
            name: name.into(),
            cards: self.cards.clone(),
        }
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

/// A read-only, built-in deck template. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    /// (template key, copies)
    pub entries: &'static [(&'static str, usize)],
}

impl Preset {
    pub fn card_count(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// Expands the preset into a fresh deck named `new_name`.
    /// Card ids are `<key>-<nn>`, numbered per template from 01.
    pub fn instantiate(&self, new_name: impl Into<String>) -> Result<Deck, DeckError> {
        let mut cards = Vec::with_capacity(self.card_count());
        for &(key, count) in self.entries {
            let template =
                find_template(key).ok_or_else(|| DeckError::UnknownTemplate(key.to_string()))?;
            for n in 1..=count {
                cards.push(template.instantiate(format!("{}-{:02}", key, n)));
            }
        }
        Ok(Deck::new(new_name, cards))
    }
}

pub static PRESETS: [Preset; 3] = [
    Preset {
        name: "Kaelen Starter",
        description: "Resonant Chanter: steady Soothe backed by dice triggers.",
        entries: &[
            ("strike", 4),
            ("guard", 4),
            ("forceful_note", 4),
            ("steady_rhythm", 4),
            ("echoing_shout", 4),
            ("kaelens_resolve", 4),
            ("soothe", 4),
            ("mend", 4),
            ("entangling_tune", 4),
            ("resonant_hum", 4),
        ],
    },
    Preset {
        name: "Lyra Starter",
        description: "Melodic Weaver: healing over time and card draw.",
        entries: &[
            ("soothe", 4),
            ("mend", 4),
            ("flowing_chord", 4),
            ("entangling_tune", 4),
            ("harmonic_pulse", 4),
            ("lyras_insight", 4),
            ("stuttering_beat", 4),
            ("guard", 4),
            ("strike", 4),
            ("resonant_hum", 4),
        ],
    },
    Preset {
        name: "Glitch Resonance",
        description: "Dice-heavy build around Resonance cards.",
        entries: &[
            ("resonant_hum", 4),
            ("feedback_loop", 4),
            ("overtone_cascade", 4),
            ("chromatic_glitch", 1),
            ("forceful_note", 4),
            ("steady_rhythm", 4),
            ("kaelens_resolve", 3),
            ("strike", 4),
            ("guard", 4),
            ("mend", 4),
            ("stuttering_beat", 4),
        ],
    },
];

pub fn find_preset(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name == name)
}
