use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::Card;
use crate::errors::PileError;
use crate::rng::{shuffle_slice, RandomSource};

/// Ordered stack of cards waiting to be drawn.
/// The top of the pile is the end of the sequence.
///
/// # Examples
///
/// ```
/// use chromatic_engine::deck::find_preset;
/// use chromatic_engine::draw_pile::DrawPile;
/// use chromatic_engine::rng::ChaChaSource;
///
/// let deck = find_preset("Kaelen Starter").unwrap().instantiate("K").unwrap();
/// let mut rng = ChaChaSource::from_seed(7);
/// let mut pile = DrawPile::new(deck.into_cards());
/// pile.shuffle(&mut rng);
///
/// let drawn = pile.draw(5).unwrap();
/// assert_eq!(drawn.len(), 5);
/// assert_eq!(pile.size(), 35);
/// assert!(pile.draw(36).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawPile {
    cards: Vec<Card>,
}

impl DrawPile {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Permutes the pile in place with an unbiased Fisher-Yates pass.
    pub fn shuffle<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> &mut Self {
        shuffle_slice(&mut self.cards, rng);
        debug!(size = self.cards.len(), "draw pile shuffled");
        self
    }

    /// Removes the top `count` cards, keeping their relative order.
    ///
    /// # Errors
    ///
    /// [`PileError::InsufficientCards`] when fewer than `count` cards remain;
    /// nothing is drawn in that case.
    pub fn draw(&mut self, count: usize) -> Result<Vec<Card>, PileError> {
        if count > self.cards.len() {
            return Err(PileError::InsufficientCards {
                requested: count,
                available: self.cards.len(),
            });
        }
        let at = self.cards.len() - count;
        Ok(self.cards.split_off(at))
    }

    /// Removes the top card. An empty pile yields `None`.
    pub fn draw_one(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn add_to_top(&mut self, cards: Vec<Card>) {
        self.cards.extend(cards);
    }

    pub fn add_to_bottom(&mut self, cards: Vec<Card>) {
        self.cards.splice(0..0, cards);
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn size(&self) -> usize {
        self.cards.len()
    }

    /// Read-only view, bottom first.
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_template;
    use crate::rng::{ChaChaSource, ScriptedSource};

    fn cards(n: usize) -> Vec<Card> {
        let t = find_template("strike").unwrap();
        (0..n).map(|i| t.instantiate(format!("c{}", i))).collect()
    }

    fn ids(cards: &[Card]) -> Vec<&str> {
        cards.iter().map(|c| c.id().as_str()).collect()
    }

    #[test]
    fn draw_takes_from_top_in_order() {
        let mut pile = DrawPile::new(cards(5));
        let drawn = pile.draw(2).unwrap();
        assert_eq!(ids(&drawn), vec!["c3", "c4"]);
        assert_eq!(ids(pile.cards()), vec!["c0", "c1", "c2"]);
    }

    #[test]
    fn draw_exactly_size_empties_and_one_more_fails_untouched() {
        let mut pile = DrawPile::new(cards(4));
        let err = pile.draw(5).unwrap_err();
        assert_eq!(
            err,
            PileError::InsufficientCards {
                requested: 5,
                available: 4
            }
        );
        assert_eq!(pile.size(), 4);
        assert_eq!(pile.draw(4).unwrap().len(), 4);
        assert!(pile.is_empty());
    }

    #[test]
    fn draw_one_on_empty_is_none() {
        let mut pile = DrawPile::default();
        assert!(pile.draw_one().is_none());
        assert_eq!(pile.draw(0).unwrap(), Vec::new());
    }

    #[test]
    fn add_to_top_and_bottom_keep_given_order() {
        let all = cards(4);
        let mut pile = DrawPile::new(vec![all[0].clone()]);
        pile.add_to_top(vec![all[1].clone(), all[2].clone()]);
        pile.add_to_bottom(vec![all[3].clone()]);
        assert_eq!(ids(pile.cards()), vec!["c3", "c0", "c1", "c2"]);
        assert_eq!(pile.draw_one().unwrap().id().as_str(), "c2");
    }

    #[test]
    fn shuffle_is_a_permutation_and_chains() {
        let mut rng = ChaChaSource::from_seed(11);
        let original = cards(20);
        let mut pile = DrawPile::new(original.clone());
        let size = pile.shuffle(&mut rng).shuffle(&mut rng).size();
        assert_eq!(size, 20);

        let mut after: Vec<_> = ids(pile.cards()).into_iter().map(String::from).collect();
        assert_ne!(after, ids(&original));
        after.sort();
        let mut before: Vec<_> = ids(&original).into_iter().map(String::from).collect();
        before.sort();
        assert_eq!(after, before);
    }

    #[test]
    fn shuffle_with_scripted_source_is_predictable() {
        let mut rng = ScriptedSource::new([0, 0]);
        let mut pile = DrawPile::new(cards(3));
        pile.shuffle(&mut rng);
        // i=2 <-> 0 gives c2 c1 c0, then i=1 <-> 0 gives c1 c2 c0
        assert_eq!(ids(pile.cards()), vec!["c1", "c2", "c0"]);
    }

    #[test]
    fn json_round_trip_keeps_order() {
        let mut pile = DrawPile::new(cards(3));
        pile.add_to_bottom(vec![cards(1)[0].upgraded()]);
        let json = pile.to_json().unwrap();
        let back = DrawPile::from_json(&json).unwrap();
        assert_eq!(back, pile);
        assert_eq!(back.cards()[0].upgrade_level(), Some(1));
    }
}
