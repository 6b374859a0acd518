use thiserror::Error;

use crate::cards::Card;
use crate::rules::Violation;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PileError {
    #[error("Cannot draw {requested} cards, only {available} available")]
    InsufficientCards { requested: usize, available: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HandError {
    /// The hand had no room; the cards that were offered are handed back.
    #[error("Hand is full (max size {max_size}), rejected {} card(s)", .rejected.len())]
    Full { max_size: usize, rejected: Vec<Card> },
    #[error("Hand cannot hold {count} cards (max size {max_size})")]
    OverCapacity { count: usize, max_size: usize },
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("Deck '{name}' is invalid: {}", format_violations(.violations))]
    Invalid {
        name: String,
        violations: Vec<Violation>,
    },
    #[error("Preset not found: {0}")]
    PresetNotFound(String),
    #[error("Unknown card template: {0}")]
    UnknownTemplate(String),
    #[error("Deck '{0}' appears more than once in the import")]
    DuplicateName(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Malformed deck JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiceError {
    #[error("Die '{id}' has {sides} sides, at least 2 required")]
    InvalidSides { id: String, sides: u8 },
    #[error("Cannot evaluate an empty set of dice")]
    EmptyDiceSet,
    #[error("Die '{0}' has not been rolled yet")]
    NotRolled(String),
    #[error("No die at index {index} (have {len})")]
    NoSuchDie { index: usize, len: usize },
    #[error("Die '{id}' shows {value}, outside 1..={sides}")]
    FaceOutOfRange { id: String, value: u8, sides: u8 },
    #[error("Die faces start at 1, got 0")]
    ZeroFace,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Card cost {cost} is out of range 0..=3")]
pub struct InvalidCost {
    pub cost: u8,
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
