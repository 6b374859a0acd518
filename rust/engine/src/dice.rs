use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::combination::{evaluate, CombinationResult};
use crate::errors::DiceError;
use crate::rng::{ChaChaSource, RandomSource};
use crate::scoring::{score_options_for, ScoringGroup};

pub const DEFAULT_SIDES: u8 = 6;
pub const DEFAULT_DICE_COUNT: usize = 5;

/// Flavor of a die. Every kind rolls the same; a River Pearl also raises
/// single 5s when scoring.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DieKind {
    #[default]
    Standard,
    ObsidianFocus,
    RiverPearl,
    Glitch,
}

/// A single die: `Unrolled -> Rolled(v) -> [Locked <-> Unlocked] -> Rolled(v')`.
///
/// Deserialization rejects a face outside `1..=sides`. A side count below two
/// is accepted on the way in and reported by [`Die::roll`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DieRecord", into = "DieRecord")]
pub struct Die {
    id: String,
    sides: u8,
    kind: DieKind,
    /// `None` until the first roll
    value: Option<u8>,
    is_locked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DieRecord {
    id: String,
    sides: u8,
    #[serde(rename = "type", default)]
    kind: DieKind,
    #[serde(default)]
    value: Option<u8>,
    #[serde(default)]
    is_locked: bool,
}

impl TryFrom<DieRecord> for Die {
    type Error = DiceError;

    fn try_from(rec: DieRecord) -> Result<Self, Self::Error> {
        if let Some(value) = rec.value {
            if value == 0 || value > rec.sides {
                return Err(DiceError::FaceOutOfRange {
                    id: rec.id,
                    value,
                    sides: rec.sides,
                });
            }
        }
        Ok(Die {
            id: rec.id,
            sides: rec.sides,
            kind: rec.kind,
            value: rec.value,
            is_locked: rec.is_locked,
        })
    }
}

impl From<Die> for DieRecord {
    fn from(die: Die) -> Self {
        DieRecord {
            id: die.id,
            sides: die.sides,
            kind: die.kind,
            value: die.value,
            is_locked: die.is_locked,
        }
    }
}

impl Die {
    pub fn new(id: impl Into<String>, sides: u8, kind: DieKind) -> Result<Self, DiceError> {
        let id = id.into();
        if sides < 2 {
            return Err(DiceError::InvalidSides { id, sides });
        }
        Ok(Self {
            id,
            sides,
            kind,
            value: None,
            is_locked: false,
        })
    }

    /// Six-sided [`DieKind::Standard`] die.
    pub fn standard(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sides: DEFAULT_SIDES,
            kind: DieKind::Standard,
            value: None,
            is_locked: false,
        }
    }

    /// Rolls the die unless it is locked, returning its value afterwards.
    ///
    /// # Errors
    ///
    /// [`DiceError::InvalidSides`] for a die with fewer than two sides, which
    /// can only arrive through deserialization.
    pub fn roll<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<u8, DiceError> {
        self.check_sides()?;
        match (self.is_locked, self.value) {
            (true, Some(v)) => Ok(v),
            _ => {
                let v = rng.next_in_range(1, u32::from(self.sides)) as u8;
                self.value = Some(v);
                Ok(v)
            }
        }
    }

    /// Flips the lock flag; the value is never touched.
    ///
    /// # Errors
    ///
    /// [`DiceError::NotRolled`] when the die has no value to hold.
    pub fn toggle_lock(&mut self) -> Result<bool, DiceError> {
        if self.value.is_none() {
            return Err(DiceError::NotRolled(self.id.clone()));
        }
        self.is_locked = !self.is_locked;
        Ok(self.is_locked)
    }

    pub fn unlock(&mut self) {
        self.is_locked = false;
    }

    pub fn reset(&mut self) {
        self.value = None;
        self.is_locked = false;
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sides(&self) -> u8 {
        self.sides
    }

    pub fn kind(&self) -> DieKind {
        self.kind
    }

    pub fn value(&self) -> Option<u8> {
        self.value
    }

    pub fn is_locked(&self) -> bool {
        self.is_locked
    }

    fn check_sides(&self) -> Result<(), DiceError> {
        if self.sides < 2 {
            return Err(DiceError::InvalidSides {
                id: self.id.clone(),
                sides: self.sides,
            });
        }
        Ok(())
    }
}

/// Owns the dice of one combat turn together with the source that rolls them.
///
/// # Examples
///
/// ```
/// use chromatic_engine::dice::DiceManager;
/// use chromatic_engine::rng::ScriptedSource;
/// use chromatic_engine::combination::Combination;
///
/// let rng = ScriptedSource::new([2, 2, 2, 3, 3, 6, 6]);
/// let mut dice = DiceManager::with_standard_dice(5, 6, rng).unwrap();
/// dice.roll().unwrap();
/// assert_eq!(dice.evaluate().unwrap().combination, Combination::FullHouse);
///
/// // hold the triple, reroll the pair
/// for i in 0..3 {
///     dice.toggle_lock(i).unwrap();
/// }
/// dice.roll().unwrap();
/// assert_eq!(dice.values().unwrap(), vec![2, 2, 2, 6, 6]);
/// ```
#[derive(Debug, Clone)]
pub struct DiceManager<R: RandomSource = ChaChaSource> {
    dice: Vec<Die>,
    rng: R,
    roll_count: u32,
}

impl<R: RandomSource> DiceManager<R> {
    pub fn new(rng: R) -> Self {
        Self {
            dice: Vec::new(),
            rng,
            roll_count: 0,
        }
    }

    /// `count` standard dice named `d1..dN`.
    pub fn with_standard_dice(count: usize, sides: u8, rng: R) -> Result<Self, DiceError> {
        let mut manager = Self::new(rng);
        for i in 1..=count {
            manager.add_die(Die::new(format!("d{}", i), sides, DieKind::Standard)?);
        }
        Ok(manager)
    }

    pub fn add_die(&mut self, die: Die) {
        self.dice.push(die);
    }

    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    pub fn die(&self, index: usize) -> Option<&Die> {
        self.dice.get(index)
    }

    /// Rolls every unlocked die; locked dice keep their value.
    ///
    /// All dice are checked before any is rolled, so a bad die leaves the
    /// set untouched.
    pub fn roll(&mut self) -> Result<Vec<u8>, DiceError> {
        if self.dice.is_empty() {
            return Err(DiceError::EmptyDiceSet);
        }
        for die in &self.dice {
            die.check_sides()?;
        }
        let mut values = Vec::with_capacity(self.dice.len());
        for die in &mut self.dice {
            values.push(die.roll(&mut self.rng)?);
        }
        self.roll_count += 1;
        debug!(roll = self.roll_count, ?values, "dice rolled");
        Ok(values)
    }

    pub fn toggle_lock(&mut self, index: usize) -> Result<bool, DiceError> {
        let len = self.dice.len();
        self.dice
            .get_mut(index)
            .ok_or(DiceError::NoSuchDie { index, len })?
            .toggle_lock()
    }

    pub fn unlock_all(&mut self) {
        self.dice.iter_mut().for_each(Die::unlock);
    }

    /// Back to unrolled and unlocked; the roll counter restarts.
    pub fn reset(&mut self) {
        self.dice.iter_mut().for_each(Die::reset);
        self.roll_count = 0;
    }

    /// Current face values in die order.
    ///
    /// # Errors
    ///
    /// [`DiceError::EmptyDiceSet`] with no dice, [`DiceError::NotRolled`] if any
    /// die has not been rolled.
    pub fn values(&self) -> Result<Vec<u8>, DiceError> {
        if self.dice.is_empty() {
            return Err(DiceError::EmptyDiceSet);
        }
        self.dice
            .iter()
            .map(|d| d.value.ok_or_else(|| DiceError::NotRolled(d.id.clone())))
            .collect()
    }

    pub fn evaluate(&self) -> Result<CombinationResult, DiceError> {
        evaluate(&self.values()?)
    }

    /// Score options of the current faces, honoring die kinds.
    pub fn score_options(&self) -> Result<Vec<ScoringGroup>, DiceError> {
        let kinds: Vec<DieKind> = self.dice.iter().map(Die::kind).collect();
        Ok(score_options_for(&self.values()?, &kinds))
    }

    pub fn roll_count(&self) -> u32 {
        self.roll_count
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combination::Combination;
    use crate::rng::ScriptedSource;

    #[test]
    fn fewer_than_two_sides_is_rejected() {
        assert_eq!(
            Die::new("bad", 1, DieKind::Glitch),
            Err(DiceError::InvalidSides {
                id: "bad".into(),
                sides: 1
            })
        );
        assert!(Die::new("coin", 2, DieKind::Standard).is_ok());
    }

    #[test]
    fn deserialized_bad_die_fails_on_roll() {
        let mut die: Die = serde_json::from_str(r#"{"id":"z","sides":0}"#).unwrap();
        let mut rng = ChaChaSource::from_seed(1);
        assert!(matches!(
            die.roll(&mut rng),
            Err(DiceError::InvalidSides { sides: 0, .. })
        ));
        assert_eq!(die.value(), None);
    }

    #[test]
    fn roll_stays_in_range() {
        let mut rng = ChaChaSource::from_seed(9);
        let mut die = Die::new("d8", 8, DieKind::RiverPearl).unwrap();
        for _ in 0..500 {
            let v = die.roll(&mut rng).unwrap();
            assert!((1..=8).contains(&v));
        }
    }

    #[test]
    fn lock_keeps_value_across_rolls() {
        let mut rng = ScriptedSource::new([4, 1, 6]);
        let mut die = Die::standard("a");
        assert_eq!(die.roll(&mut rng).unwrap(), 4);
        assert!(die.toggle_lock().unwrap());
        assert_eq!(die.value(), Some(4));
        assert_eq!(die.roll(&mut rng).unwrap(), 4);
        assert!(!die.toggle_lock().unwrap());
        assert_eq!(die.roll(&mut rng).unwrap(), 1);
    }

    #[test]
    fn cannot_lock_unrolled_die() {
        let mut die = Die::standard("a");
        assert_eq!(die.toggle_lock(), Err(DiceError::NotRolled("a".into())));
        assert!(!die.is_locked());
    }

    #[test]
    fn manager_rolls_only_unlocked() {
        let rng = ScriptedSource::new([1, 2, 3, 4, 5, 6, 6, 6]);
        let mut dice = DiceManager::with_standard_dice(5, 6, rng).unwrap();
        assert_eq!(dice.roll().unwrap(), vec![1, 2, 3, 4, 5]);
        dice.toggle_lock(1).unwrap();
        dice.toggle_lock(3).unwrap();
        assert_eq!(dice.roll().unwrap(), vec![6, 2, 6, 4, 6]);
        assert_eq!(dice.roll_count(), 2);
        assert!(dice.die(1).unwrap().is_locked());
    }

    #[test]
    fn toggle_out_of_range_is_an_error() {
        let mut dice = DiceManager::with_standard_dice(2, 6, ChaChaSource::from_seed(0)).unwrap();
        dice.roll().unwrap();
        assert_eq!(
            dice.toggle_lock(2),
            Err(DiceError::NoSuchDie { index: 2, len: 2 })
        );
    }

    #[test]
    fn empty_manager_fails_fast() {
        let mut dice: DiceManager = DiceManager::new(ChaChaSource::from_seed(0));
        assert_eq!(dice.roll(), Err(DiceError::EmptyDiceSet));
        assert_eq!(dice.evaluate(), Err(DiceError::EmptyDiceSet));
    }

    #[test]
    fn one_bad_die_leaves_the_set_unrolled() {
        let mut dice = DiceManager::with_standard_dice(2, 6, ChaChaSource::from_seed(0)).unwrap();
        let bad: Die = serde_json::from_str(r#"{"id":"x","sides":1}"#).unwrap();
        dice.add_die(bad);
        assert!(dice.roll().is_err());
        assert!(dice.dice().iter().all(|d| d.value().is_none()));
        assert_eq!(dice.roll_count(), 0);
    }

    #[test]
    fn evaluate_requires_every_die_rolled() {
        let mut dice = DiceManager::with_standard_dice(3, 6, ScriptedSource::new([5, 5, 1])).unwrap();
        assert_eq!(dice.values(), Err(DiceError::NotRolled("d1".into())));
        dice.roll().unwrap();
        let result = dice.evaluate().unwrap();
        assert_eq!(result.combination, Combination::Pair);
        assert_eq!(result.primary, 5);
        let total: u32 = dice.score_options().unwrap().iter().map(|g| g.score).sum();
        assert_eq!(total, 200);
    }

    #[test]
    fn reset_and_unlock_all() {
        let mut dice = DiceManager::with_standard_dice(3, 6, ChaChaSource::from_seed(4)).unwrap();
        dice.roll().unwrap();
        dice.toggle_lock(0).unwrap();
        dice.toggle_lock(2).unwrap();
        dice.unlock_all();
        assert!(dice.dice().iter().all(|d| !d.is_locked()));
        dice.reset();
        assert!(dice.dice().iter().all(|d| d.value().is_none()));
        assert_eq!(dice.roll_count(), 0);
    }

    #[test]
    fn same_seed_same_rolls() {
        let mut a = DiceManager::with_standard_dice(5, 6, ChaChaSource::from_seed(77)).unwrap();
        let mut b = DiceManager::with_standard_dice(5, 6, ChaChaSource::from_seed(77)).unwrap();
        for _ in 0..4 {
            assert_eq!(a.roll().unwrap(), b.roll().unwrap());
        }
    }

    #[test]
    fn deserialized_face_must_fit_the_die() {
        let high = serde_json::from_str::<Die>(
            r#"{"id":"d","sides":6,"value":9,"isLocked":true}"#,
        );
        assert!(high.is_err());
        let zero = serde_json::from_str::<Die>(r#"{"id":"d","sides":6,"value":0}"#);
        assert!(zero.is_err());

        let ok: Die = serde_json::from_str(r#"{"id":"d","sides":6,"value":6}"#).unwrap();
        assert_eq!(ok.value(), Some(6));
        assert_eq!(ok.kind(), DieKind::Standard);
    }

    #[test]
    fn die_json_uses_camel_case() {
        let mut die = Die::new("g", 6, DieKind::ObsidianFocus).unwrap();
        die.roll(&mut ScriptedSource::new([3])).unwrap();
        die.toggle_lock().unwrap();
        let v = serde_json::to_value(&die).unwrap();
        assert_eq!(v["isLocked"], true);
        assert_eq!(v["type"], "obsidianFocus");
        assert_eq!(v["value"], 3);
    }
}
