use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::{Card, CardId};
use crate::deck::Deck;
use crate::discard_pile::DiscardPile;
use crate::draw_pile::DrawPile;
use crate::errors::HandError;
use crate::hand::Hand;
use crate::rng::RandomSource;

/// A card movement between the combat piles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CombatEvent {
    Drew { ids: Vec<CardId> },
    Played { id: CardId },
    Discarded { ids: Vec<CardId> },
    /// The discard pile was shuffled under the draw pile
    Reshuffled { count: usize },
}

/// The three piles of one combat plus the session's random source.
///
/// Cards only ever move between the piles, so [`CombatPiles::total_cards`]
/// stays equal to the size of the deck the combat started from.
///
/// # Examples
///
/// ```
/// use chromatic_engine::combat::CombatPiles;
/// use chromatic_engine::deck::find_preset;
/// use chromatic_engine::rng::ChaChaSource;
///
/// let deck = find_preset("Lyra Starter").unwrap().instantiate("L").unwrap();
/// let mut combat = CombatPiles::from_deck(&deck, 5, ChaChaSource::from_seed(3));
/// let drawn = combat.draw(5);
/// assert_eq!(drawn.len(), 5);
/// combat.play(&drawn[0]).unwrap();
/// assert_eq!(combat.discard_pile().size(), 1);
/// assert_eq!(combat.total_cards(), 40);
/// ```
#[derive(Debug, Clone)]
pub struct CombatPiles<R: RandomSource> {
    draw_pile: DrawPile,
    hand: Hand,
    discard_pile: DiscardPile,
    rng: R,
    total: usize,
    events: Vec<CombatEvent>,
}

impl<R: RandomSource> CombatPiles<R> {
    /// Expands the deck into a shuffled draw pile with an empty hand and
    /// discard pile.
    pub fn from_deck(deck: &Deck, hand_size: usize, rng: R) -> Self {
        Self::from_cards(deck.cards().to_vec(), hand_size, rng)
    }

    pub fn from_cards(cards: Vec<Card>, hand_size: usize, mut rng: R) -> Self {
        let total = cards.len();
        let mut draw_pile = DrawPile::new(cards);
        draw_pile.shuffle(&mut rng);
        Self {
            draw_pile,
            hand: Hand::new(hand_size),
            discard_pile: DiscardPile::new(),
            rng,
            total,
            events: Vec::new(),
        }
    }

    /// Draws up to `count` cards into the hand, never past its free space.
    ///
    /// An empty draw pile is refilled from the shuffled discard pile; drawing
    /// stops early only when both are empty. Returns the ids drawn.
    pub fn draw(&mut self, count: usize) -> Vec<CardId> {
        let wanted = count.min(self.hand.available_space());
        let mut drawn = Vec::with_capacity(wanted);
        while drawn.len() < wanted {
            if self.draw_pile.is_empty() && !self.recycle() {
                break;
            }
            let Some(card) = self.draw_pile.draw_one() else {
                break;
            };
            let id = card.id().clone();
            if let Err(HandError::Full { rejected, .. }) = self.hand.add(card) {
                self.draw_pile.add_to_top(rejected);
                break;
            }
            drawn.push(id);
        }
        if !drawn.is_empty() {
            self.events.push(CombatEvent::Drew { ids: drawn.clone() });
        }
        drawn
    }

    /// Moves a card from the hand to the discard pile; `None` if it is not in hand.
    pub fn play(&mut self, id: &CardId) -> Option<Card> {
        let card = self.hand.remove(id)?;
        self.discard_pile.add(card.clone());
        self.events.push(CombatEvent::Played { id: id.clone() });
        Some(card)
    }

    pub fn discard(&mut self, id: &CardId) -> Option<Card> {
        let card = self.hand.remove(id)?;
        self.discard_pile.add(card.clone());
        self.events.push(CombatEvent::Discarded {
            ids: vec![id.clone()],
        });
        Some(card)
    }

    /// End-of-turn flush of the whole hand. Returns the number discarded.
    pub fn discard_hand(&mut self) -> usize {
        let cards = self.hand.remove_all();
        let count = cards.len();
        if count > 0 {
            let ids = cards.iter().map(|c| c.id().clone()).collect();
            self.discard_pile.add_multiple(cards);
            self.events.push(CombatEvent::Discarded { ids });
        }
        count
    }

    /// Shuffles the discard pile under the draw pile. Returns the count moved.
    pub fn recycle_discard(&mut self) -> usize {
        let before = self.discard_pile.size();
        self.recycle();
        before
    }

    fn recycle(&mut self) -> bool {
        if self.discard_pile.is_empty() {
            return false;
        }
        let cards = self.discard_pile.shuffle_and_take_all(&mut self.rng);
        let count = cards.len();
        self.draw_pile.add_to_bottom(cards);
        self.events.push(CombatEvent::Reshuffled { count });
        debug!(count, "discard pile recycled into draw pile");
        true
    }

    pub fn total_cards(&self) -> usize {
        self.draw_pile.size() + self.hand.size() + self.discard_pile.size()
    }

    /// Size of the deck this combat was built from.
    pub fn initial_size(&self) -> usize {
        self.total
    }

    pub fn draw_pile(&self) -> &DrawPile {
        &self.draw_pile
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn discard_pile(&self) -> &DiscardPile {
        &self.discard_pile
    }

    /// Drains the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }
}
