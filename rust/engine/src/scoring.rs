//! Point scoring for a roll of six-sided dice.
//!
//! Independent of the combination tiers: a full 1-6 straight scores 1500
//! and excludes everything else; each value rolled three or more times
//! scores one triple (value x 100, 1000 for 1s); 1s and 5s left over after
//! triples score as singles. Card effects scale with the summed score.
//!
//! A River Pearl die anywhere in the set raises every leftover single 5 to
//! 60; triples are never affected.

use serde::{Deserialize, Serialize};

use crate::dice::DieKind;

pub const STRAIGHT_SCORE: u32 = 1500;
pub const SINGLE_ONE_SCORE: u32 = 100;
pub const SINGLE_FIVE_SCORE: u32 = 50;
pub const RIVER_PEARL_FIVE_SCORE: u32 = 60;

/// One scoring group found in a roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringGroup {
    /// Die values consumed by this group
    pub dice: Vec<u8>,
    pub score: u32,
    pub label: String,
}

pub fn triple_score(value: u8) -> u32 {
    if value == 1 {
        1000
    } else {
        u32::from(value) * 100
    }
}

/// Lists every scoring group in a roll. An empty result means the roll busts.
///
/// # Examples
///
/// ```
/// use chromatic_engine::scoring::{score_options, best_total};
///
/// let groups = score_options(&[3, 3, 3, 1, 4, 6]);
/// assert_eq!(groups.len(), 2);
/// assert_eq!(best_total(&[3, 3, 3, 1, 4, 6]), 400);
/// assert!(score_options(&[2, 3, 4, 6, 2, 4]).is_empty());
/// ```
pub fn score_options(values: &[u8]) -> Vec<ScoringGroup> {
    score_options_for(values, &[])
}

/// [`score_options`] with the kinds of the dice that rolled `values`.
///
/// ```
/// use chromatic_engine::dice::DieKind;
/// use chromatic_engine::scoring::score_options_for;
///
/// let kinds = [DieKind::RiverPearl, DieKind::Standard];
/// assert_eq!(score_options_for(&[2, 5], &kinds)[0].score, 60);
/// ```
pub fn score_options_for(values: &[u8], kinds: &[DieKind]) -> Vec<ScoringGroup> {
    let mut counts = [0usize; 7];
    for &v in values.iter().filter(|&&v| (1..=6).contains(&v)) {
        counts[usize::from(v)] += 1;
    }

    if values.len() == 6 && (1..=6).all(|v| counts[v] >= 1) {
        return vec![ScoringGroup {
            dice: vec![1, 2, 3, 4, 5, 6],
            score: STRAIGHT_SCORE,
            label: "Straight 1-6".to_string(),
        }];
    }

    let mut groups = Vec::new();
    for value in 1..=6u8 {
        let slot = usize::from(value);
        if counts[slot] >= 3 {
            groups.push(ScoringGroup {
                dice: vec![value; 3],
                score: triple_score(value),
                label: format!("Triple {}s", value),
            });
            counts[slot] -= 3;
        }
    }

    for _ in 0..counts[1] {
        groups.push(single(1, SINGLE_ONE_SCORE));
    }
    let river_pearl = kinds.contains(&DieKind::RiverPearl);
    for _ in 0..counts[5] {
        groups.push(if river_pearl {
            ScoringGroup {
                dice: vec![5],
                score: RIVER_PEARL_FIVE_SCORE,
                label: "Single 5 (River Pearl)".to_string(),
            }
        } else {
            single(5, SINGLE_FIVE_SCORE)
        });
    }
    groups
}

pub fn best_total(values: &[u8]) -> u32 {
    score_options(values).iter().map(|g| g.score).sum()
}

fn single(value: u8, score: u32) -> ScoringGroup {
    ScoringGroup {
        dice: vec![value],
        score,
        label: format!("Single {}", value),
    }
}
