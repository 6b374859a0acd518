use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::DiceError;

/// Minimum number of dice for a run to count as a straight.
pub const STRAIGHT_MIN_LEN: usize = 5;

/// Pattern formed by a set of die values, ordered weakest to strongest.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Combination {
    None = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    FullHouse = 5,
    FourOfAKind = 6,
    FiveOfAKind = 7,
}

impl Combination {
    /// Flat bonus this tier contributes to card effects.
    pub fn bonus(&self) -> u32 {
        match self {
            Combination::None => 0,
            Combination::Pair => 2,
            Combination::TwoPair => 4,
            Combination::ThreeOfAKind => 6,
            Combination::Straight => 8,
            Combination::FullHouse => 10,
            Combination::FourOfAKind => 15,
            Combination::FiveOfAKind => 25,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Combination::None => "None",
            Combination::Pair => "Pair",
            Combination::TwoPair => "Two Pair",
            Combination::ThreeOfAKind => "Three of a Kind",
            Combination::Straight => "Straight",
            Combination::FullHouse => "Full House",
            Combination::FourOfAKind => "Four of a Kind",
            Combination::FiveOfAKind => "Five of a Kind",
        }
    }
}

/// Classified dice result. Field order gives the derived ordering:
/// tier first, then the deciding values.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CombinationResult {
    pub combination: Combination,
    /// Value of the main group (the triple of a full house, the higher pair,
    /// the top of a straight, the highest die when nothing matched)
    pub primary: u8,
    /// Value of the second group for full house and two pair
    pub secondary: Option<u8>,
}

/// Classifies die values by the strongest pattern they satisfy.
///
/// Precedence: five of a kind, four of a kind, full house, straight, three
/// of a kind, two pair, pair, none. Within a tier the higher value wins.
/// Groups of more than five count as five of a kind.
///
/// # Errors
///
/// [`DiceError::EmptyDiceSet`] for an empty slice; "no dice" is not reported
/// as [`Combination::None`]. [`DiceError::ZeroFace`] if any value is 0.
///
/// # Examples
///
/// ```
/// use chromatic_engine::combination::{evaluate, Combination};
///
/// let r = evaluate(&[2, 2, 2, 3, 3]).unwrap();
/// assert_eq!(r.combination, Combination::FullHouse);
/// assert_eq!((r.primary, r.secondary), (2, Some(3)));
///
/// assert_eq!(evaluate(&[6, 6, 1, 2, 3]).unwrap().combination, Combination::Pair);
/// assert!(evaluate(&[]).is_err());
/// ```
pub fn evaluate(values: &[u8]) -> Result<CombinationResult, DiceError> {
    let high = *values.iter().max().ok_or(DiceError::EmptyDiceSet)?;
    if values.contains(&0) {
        return Err(DiceError::ZeroFace);
    }

    let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
    for &v in values {
        *counts.entry(v).or_insert(0) += 1;
    }

    // highest value first within each multiplicity class
    let at_least = |n: usize| -> Vec<u8> {
        counts
            .iter()
            .rev()
            .filter(|&(_, &c)| c >= n)
            .map(|(&v, _)| v)
            .collect()
    };

    if let Some(&v) = at_least(5).first() {
        return Ok(result(Combination::FiveOfAKind, v, None));
    }
    if let Some(&v) = at_least(4).first() {
        return Ok(result(Combination::FourOfAKind, v, None));
    }

    let trips = at_least(3);
    let pairs = at_least(2);
    if let Some(&t) = trips.first() {
        if let Some(&p) = pairs.iter().find(|&&p| p != t) {
            return Ok(result(Combination::FullHouse, t, Some(p)));
        }
    }

    if let Some(top) = detect_straight_high(values, &counts) {
        return Ok(result(Combination::Straight, top, None));
    }

    if let Some(&t) = trips.first() {
        return Ok(result(Combination::ThreeOfAKind, t, None));
    }
    match pairs.as_slice() {
        [hi, lo, ..] => Ok(result(Combination::TwoPair, *hi, Some(*lo))),
        [p] => Ok(result(Combination::Pair, *p, None)),
        [] => Ok(result(Combination::None, high, None)),
    }
}

fn result(combination: Combination, primary: u8, secondary: Option<u8>) -> CombinationResult {
    CombinationResult {
        combination,
        primary,
        secondary,
    }
}

// all distinct and consecutive
fn detect_straight_high(values: &[u8], counts: &BTreeMap<u8, usize>) -> Option<u8> {
    if values.len() < STRAIGHT_MIN_LEN || counts.len() != values.len() {
        return None;
    }
    let low = *counts.keys().next()?;
    let high = *counts.keys().next_back()?;
    if usize::from(high - low) + 1 == values.len() {
        Some(high)
    } else {
        None
    }
}
