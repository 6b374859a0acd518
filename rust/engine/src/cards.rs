use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::InvalidCost;

/// Highest action-point cost a card may carry.
pub const MAX_CARD_COST: u8 = 3;

/// Unique identity of a card instance.
/// Two cards with identical contents but different ids are different cards.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Musical family of a card.
/// Drives which stem the music layer manipulates when the card is played.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum CardType {
    /// Direct soothing effects against ailments
    Melody,
    /// Restorative effects on tools
    Harmony,
    /// Status and turn-order manipulation
    Rhythm,
    /// Effects that scale with the dice result
    Resonance,
}

/// Rarity tier of a card template.
/// Legendary templates are capped at a single copy per deck by the default rules.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

/// A playable card instance.
/// Cards are immutable once built; upgrading yields a new card.
/// Deserialization applies the same cost bound as [`Card::new`].
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CardRecord", into = "CardRecord")]
pub struct Card {
    /// Unique instance identity
    id: CardId,
    /// Display name
    name: String,
    /// Musical family
    card_type: CardType,
    /// Action point cost (0..=3)
    cost: u8,
    /// Rarity tier
    rarity: Rarity,
    /// Rules text
    description: String,
    /// Key into the effect table
    effect_key: String,
    /// Number of times the card has been upgraded, absent when never upgraded
    upgrade_level: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardRecord {
    id: CardId,
    name: String,
    #[serde(rename = "type")]
    card_type: CardType,
    cost: u8,
    rarity: Rarity,
    description: String,
    effect_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    upgrade_level: Option<u8>,
}

impl TryFrom<CardRecord> for Card {
    type Error = InvalidCost;

    fn try_from(rec: CardRecord) -> Result<Self, Self::Error> {
        let mut card = Card::new(
            rec.id,
            rec.name,
            rec.card_type,
            rec.cost,
            rec.rarity,
            rec.description,
            rec.effect_key,
        )?;
        card.upgrade_level = rec.upgrade_level;
        Ok(card)
    }
}

impl From<Card> for CardRecord {
    fn from(card: Card) -> Self {
        CardRecord {
            id: card.id,
            name: card.name,
            card_type: card.card_type,
            cost: card.cost,
            rarity: card.rarity,
            description: card.description,
            effect_key: card.effect_key,
            upgrade_level: card.upgrade_level,
        }
    }
}

impl Card {
    pub fn new(
        id: impl Into<CardId>,
        name: impl Into<String>,
        card_type: CardType,
        cost: u8,
        rarity: Rarity,
        description: impl Into<String>,
        effect_key: impl Into<String>,
    ) -> Result<Self, InvalidCost> {
        if cost > MAX_CARD_COST {
            return Err(InvalidCost { cost });
        }
        Ok(Self {
            id: id.into(),
            name: name.into(),
            card_type,
            cost,
            rarity,
            description: description.into(),
            effect_key: effect_key.into(),
            upgrade_level: None,
        })
    }

    /// Builds a card from values already known to be in range (catalog templates).
    pub(crate) fn from_template_parts(
        id: CardId,
        name: &str,
        card_type: CardType,
        cost: u8,
        rarity: Rarity,
        description: &str,
        effect_key: &str,
    ) -> Self {
        debug_assert!(cost <= MAX_CARD_COST, "template '{}' costs {}", name, cost);
        Self {
            id,
            name: name.to_string(),
            card_type,
            cost,
            rarity,
            description: description.to_string(),
            effect_key: effect_key.to_string(),
            upgrade_level: None,
        }
    }

    pub fn id(&self) -> &CardId {
        &self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn card_type(&self) -> CardType {
        self.card_type
    }
    pub fn cost(&self) -> u8 {
        self.cost
    }
    pub fn rarity(&self) -> Rarity {
        self.rarity
    }
    pub fn description(&self) -> &str {
        &self.description
    }
    pub fn effect_key(&self) -> &str {
        &self.effect_key
    }
    pub fn upgrade_level(&self) -> Option<u8> {
        self.upgrade_level
    }

    /// Returns an upgraded copy: level incremented and `+` appended to the name.
    /// The id is kept, so the copy replaces the original in whatever pile holds it.
    pub fn upgraded(&self) -> Card {
        let mut next = self.clone();
        next.upgrade_level = Some(self.upgrade_level.unwrap_or(0).saturating_add(1));
        next.name.push('+');
        next
    }

    pub fn with_id(&self, id: impl Into<CardId>) -> Card {
        let mut copy = self.clone();
        copy.id = id.into();
        copy
    }

    /// True when both values denote the same card instance.
    pub fn same_instance(&self, other: &Card) -> bool {
        self.id == other.id
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:?}, Cost: {}) - {}",
            self.name, self.card_type, self.cost, self.description
        )
    }
}
