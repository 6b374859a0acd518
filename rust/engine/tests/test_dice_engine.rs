use chromatic_engine::combination::{evaluate, Combination};
use chromatic_engine::dice::{DiceManager, Die, DieKind};
use chromatic_engine::errors::DiceError;
use chromatic_engine::rng::{ChaChaSource, ScriptedSource};
use chromatic_engine::scoring::best_total;

#[test]
fn precedence_examples() {
    let cases: [(&[u8], Combination); 4] = [
        (&[5, 5, 5, 5, 5], Combination::FiveOfAKind),
        (&[2, 2, 2, 3, 3], Combination::FullHouse),
        (&[1, 2, 3, 4, 5], Combination::Straight),
        (&[6, 6, 1, 2, 3], Combination::Pair),
    ];
    for (values, expected) in cases {
        assert_eq!(
            evaluate(values).unwrap().combination,
            expected,
            "values {:?}",
            values
        );
    }
}

#[test]
fn never_reports_a_higher_tier_than_the_best_match() {
    // brute force over every 5-die roll and check the tier against counts
    let mut seen = std::collections::BTreeSet::new();
    for code in 0..6u32.pow(5) {
        let mut n = code;
        let values: Vec<u8> = (0..5)
            .map(|_| {
                let v = (n % 6) as u8 + 1;
                n /= 6;
                v
            })
            .collect();
        let mut counts = [0usize; 7];
        for &v in &values {
            counts[v as usize] += 1;
        }
        let max = *counts.iter().max().unwrap();
        let pairs = counts.iter().filter(|&&c| c >= 2).count();
        let tier = evaluate(&values).unwrap().combination;
        seen.insert(tier);
        match tier {
            Combination::FiveOfAKind => assert_eq!(max, 5),
            Combination::FourOfAKind => assert_eq!(max, 4),
            Combination::FullHouse => assert!(max == 3 && pairs == 2),
            Combination::Straight => assert_eq!(max, 1),
            Combination::ThreeOfAKind => assert!(max == 3 && pairs == 1),
            Combination::TwoPair => assert!(max == 2 && pairs == 2),
            Combination::Pair => assert!(max == 2 && pairs == 1),
            Combination::None => assert_eq!(max, 1),
        }
    }
    assert_eq!(seen.len(), 8, "every tier occurs in 5d6");
}

#[test]
fn rolls_cover_every_face_uniformly() {
    let mut dice = DiceManager::with_standard_dice(1, 6, ChaChaSource::from_seed(31)).unwrap();
    let mut counts = [0usize; 6];
    for _ in 0..6000 {
        let v = dice.roll().unwrap()[0];
        counts[(v - 1) as usize] += 1;
    }
    for c in counts {
        assert!((850..1150).contains(&c), "skewed faces: {:?}", counts);
    }
}

#[test]
fn locked_dice_survive_many_rerolls() {
    let mut dice = DiceManager::with_standard_dice(5, 6, ChaChaSource::from_seed(8)).unwrap();
    let first = dice.roll().unwrap();
    dice.toggle_lock(0).unwrap();
    dice.toggle_lock(4).unwrap();
    for _ in 0..50 {
        let values = dice.roll().unwrap();
        assert_eq!(values[0], first[0]);
        assert_eq!(values[4], first[4]);
    }
    assert_eq!(dice.roll_count(), 51);
}

#[test]
fn mixed_dice_kinds_roll_within_their_sides() {
    let mut dice = DiceManager::new(ChaChaSource::from_seed(12));
    dice.add_die(Die::new("focus", 4, DieKind::ObsidianFocus).unwrap());
    dice.add_die(Die::new("pearl", 12, DieKind::RiverPearl).unwrap());
    dice.add_die(Die::new("glitch", 2, DieKind::Glitch).unwrap());
    for _ in 0..200 {
        let v = dice.roll().unwrap();
        assert!((1..=4).contains(&v[0]));
        assert!((1..=12).contains(&v[1]));
        assert!((1..=2).contains(&v[2]));
    }
}

#[test]
fn turn_flow_roll_lock_reroll_score() {
    let rng = ScriptedSource::new([1, 1, 4, 6, 2, 1, 5, 3]);
    let mut dice = DiceManager::with_standard_dice(5, 6, rng).unwrap();
    assert_eq!(dice.roll().unwrap(), vec![1, 1, 4, 6, 2]);
    assert_eq!(dice.evaluate().unwrap().combination, Combination::Pair);

    dice.toggle_lock(0).unwrap();
    dice.toggle_lock(1).unwrap();
    assert_eq!(dice.roll().unwrap(), vec![1, 1, 1, 5, 3]);
    assert_eq!(
        dice.evaluate().unwrap().combination,
        Combination::ThreeOfAKind
    );
    assert_eq!(best_total(&dice.values().unwrap()), 1050);
}

#[test]
fn precondition_violations_fail_fast() {
    assert_eq!(
        DiceManager::with_standard_dice(3, 1, ChaChaSource::from_seed(0)).unwrap_err(),
        DiceError::InvalidSides {
            id: "d1".into(),
            sides: 1
        }
    );
    assert_eq!(evaluate(&[]).unwrap_err(), DiceError::EmptyDiceSet);
}

#[test]
fn river_pearl_die_changes_single_five_score() {
    let mut dice = DiceManager::new(ScriptedSource::new([2, 5, 3]));
    dice.add_die(Die::new("pearl", 6, DieKind::RiverPearl).unwrap());
    dice.add_die(Die::new("d1", 6, DieKind::Standard).unwrap());
    dice.add_die(Die::new("d2", 6, DieKind::Standard).unwrap());
    assert_eq!(dice.roll().unwrap(), vec![2, 5, 3]);

    let options = dice.score_options().unwrap();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].dice, vec![5]);
    assert_eq!(options[0].score, 60);
}

#[test]
fn restored_dice_and_faces_are_range_checked() {
    let bad = serde_json::from_str::<Die>(r#"{"id":"d1","sides":4,"value":5}"#);
    assert!(bad.unwrap_err().to_string().contains("outside 1..=4"));

    let ok: Die = serde_json::from_str(r#"{"id":"d1","sides":4,"value":4,"type":"glitch"}"#).unwrap();
    assert_eq!(ok.kind(), DieKind::Glitch);

    assert_eq!(evaluate(&[0, 1, 2, 3, 4]).unwrap_err(), DiceError::ZeroFace);
}
