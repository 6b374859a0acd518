//! Built-in card templates.
//!
//! Each template's `key` doubles as the card's effect key: the combat layer
//! resolves it against its own effect table. Templates carry no behavior here.

use crate::cards::{Card, CardId, CardType, Rarity};

/// Static description of a card kind from which instances are minted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardTemplate {
    /// Effect key, also used to count copies in a deck
    pub key: &'static str,
    pub name: &'static str,
    pub card_type: CardType,
    pub cost: u8,
    pub rarity: Rarity,
    pub description: &'static str,
}

impl CardTemplate {
    /// Mints a card instance carrying the given id.
    pub fn instantiate(&self, id: impl Into<CardId>) -> Card {
        Card::from_template_parts(
            id.into(),
            self.name,
            self.card_type,
            self.cost,
            self.rarity,
            self.description,
            self.key,
        )
    }
}

const fn template(
    key: &'static str,
    name: &'static str,
    card_type: CardType,
    cost: u8,
    rarity: Rarity,
    description: &'static str,
) -> CardTemplate {
    CardTemplate {
        key,
        name,
        card_type,
        cost,
        rarity,
        description,
    }
}

pub static CATALOG: [CardTemplate; 17] = [
    // Melody
    template("strike", "Strike", CardType::Melody, 1, Rarity::Common, "Deal 4 Soothe."),
    template("soothe", "Soothe", CardType::Melody, 1, Rarity::Common, "Deal 3 Soothe."),
    template(
        "forceful_note",
        "Forceful Note",
        CardType::Melody,
        1,
        Rarity::Uncommon,
        "Deal 6 Soothe. Dice Trigger: +Soothe equal to Score/50.",
    ),
    template(
        "echoing_shout",
        "Echoing Shout",
        CardType::Melody,
        1,
        Rarity::Uncommon,
        "Deal 3 Soothe to front two Ailments.",
    ),
    // Harmony
    template("mend", "Mend", CardType::Harmony, 1, Rarity::Common, "Restore 4 Resonance."),
    template(
        "guard",
        "Guard",
        CardType::Harmony,
        1,
        Rarity::Common,
        "Block the next incoming damage.",
    ),
    template(
        "flowing_chord",
        "Flowing Chord",
        CardType::Harmony,
        1,
        Rarity::Uncommon,
        "Grant 'Resonance 2' (Heals 2 for 2 turns) to one Tool.",
    ),
    template(
        "harmonic_pulse",
        "Harmonic Pulse",
        CardType::Harmony,
        1,
        Rarity::Uncommon,
        "Restore 2 Resonance to all Tools.",
    ),
    template(
        "kaelens_resolve",
        "Kaelen's Resolve",
        CardType::Harmony,
        1,
        Rarity::Rare,
        "Dice Trigger: Heal self for Score/100. Low score (0-100) deals 2 damage to self instead.",
    ),
    template(
        "lyras_insight",
        "Lyra's Insight",
        CardType::Harmony,
        1,
        Rarity::Rare,
        "Draw 1 card. If the target Tool has a positive status effect, draw 2 cards instead.",
    ),
    // Rhythm
    template(
        "steady_rhythm",
        "Steady Rhythm",
        CardType::Rhythm,
        1,
        Rarity::Uncommon,
        "Dice Trigger: If Score > 300, gain +1 Action Point next turn.",
    ),
    template(
        "entangling_tune",
        "Entangling Tune",
        CardType::Rhythm,
        1,
        Rarity::Common,
        "Apply 'Slow 1' (Acts last next turn) to one Ailment.",
    ),
    template(
        "stuttering_beat",
        "Stuttering Beat",
        CardType::Rhythm,
        1,
        Rarity::Uncommon,
        "Apply 'Slow 1' and 'Fragile 1' to target Ailment. If target already had 'Slow', draw 1 card.",
    ),
    // Resonance
    template(
        "resonant_hum",
        "Resonant Hum",
        CardType::Resonance,
        0,
        Rarity::Common,
        "Dice Trigger: Restore Resonance equal to the combination bonus.",
    ),
    template(
        "feedback_loop",
        "Feedback Loop",
        CardType::Resonance,
        2,
        Rarity::Uncommon,
        "Dice Trigger: Deal Soothe equal to Score/100 to every Ailment.",
    ),
    template(
        "overtone_cascade",
        "Overtone Cascade",
        CardType::Resonance,
        2,
        Rarity::Rare,
        "Dice Trigger: On a Straight or better, draw 2 cards.",
    ),
    template(
        "chromatic_glitch",
        "Chromatic Glitch",
        CardType::Resonance,
        3,
        Rarity::Legendary,
        "Dice Trigger: Double the combination bonus of this turn.",
    ),
];

/// Looks up a template by effect key.
pub fn find_template(key: &str) -> Option<&'static CardTemplate> {
    CATALOG.iter().find(|t| t.key == key)
}
