//! # chromatic-engine: Card/Dice Economy Core
//!
//! The deck, hand and discard state machine of Chromatic Glitch together with
//! the dice engine that feeds combination bonuses into card effects. Every
//! random decision goes through an injected [`rng::RandomSource`], so a seed
//! reproduces a whole combat.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card value type and identity
//! - [`catalog`] - Built-in card templates
//! - [`deck`] - Named decks and built-in presets
//! - [`rules`] - Deck construction rules and violations
//! - [`storage`] - Key/value persistence seam
//! - [`deck_manager`] - Validated, persisted deck registry
//! - [`rng`] - Random sources and the Fisher-Yates shuffle
//! - [`draw_pile`] / [`discard_pile`] / [`hand`] - Card piles
//! - [`combat`] - The three piles of one combat with reshuffle-on-empty
//! - [`dice`] - Dice with lock and reroll
//! - [`combination`] - Poker-style classification of die values
//! - [`scoring`] - Point scoring of a roll
//! - [`logger`] - JSONL turn records
//! - [`errors`] - Error types
//!
//! ## Quick Start
//!
//! ```rust
//! use chromatic_engine::combat::CombatPiles;
//! use chromatic_engine::deck_manager::DeckManager;
//! use chromatic_engine::rng::ChaChaSource;
//! use chromatic_engine::storage::MemoryStorage;
//!
//! let mut decks = DeckManager::new(MemoryStorage::new());
//! let deck = decks.create_from_preset("Kaelen Starter", "Main").unwrap();
//! decks.save_deck(deck.clone()).unwrap();
//!
//! let mut combat = CombatPiles::from_deck(&deck, 5, ChaChaSource::from_seed(42));
//! combat.draw(5);
//! combat.discard_hand();
//! assert_eq!(combat.total_cards(), 40);
//! ```
//!
//! ## Dice
//!
//! ```rust
//! use chromatic_engine::combination::Combination;
//! use chromatic_engine::dice::DiceManager;
//! use chromatic_engine::rng::ScriptedSource;
//!
//! let mut dice = DiceManager::with_standard_dice(5, 6, ScriptedSource::new([1, 2, 3, 4, 5])).unwrap();
//! dice.roll().unwrap();
//! let result = dice.evaluate().unwrap();
//! assert_eq!(result.combination, Combination::Straight);
//! assert_eq!(result.combination.bonus(), 8);
//! ```

pub mod cards;
pub mod catalog;
pub mod combat;
pub mod combination;
pub mod deck;
pub mod deck_manager;
pub mod dice;
pub mod discard_pile;
pub mod draw_pile;
pub mod errors;
pub mod hand;
pub mod logger;
pub mod rng;
pub mod rules;
pub mod scoring;
pub mod storage;
