//! Combat turn simulation.
//!
//! Each turn draws into the hand, plays every card in it, rolls the dice and
//! prints the pile sizes afterwards. With `--log` every turn is appended to a
//! JSONL file as a [`TurnRecord`] that can be replayed from its seed.

use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_combination, format_dice, format_hand};
use chromatic_engine::cards::CardId;
use chromatic_engine::combat::CombatPiles;
use chromatic_engine::deck::{Deck, find_preset};
use chromatic_engine::deck_manager::DeckManager;
use chromatic_engine::dice::DiceManager;
use chromatic_engine::errors::DeckError;
use chromatic_engine::logger::{TurnLogger, TurnRecord};
use chromatic_engine::rng::{ChaChaSource, RandomSource};
use chromatic_engine::storage::FileStorage;
use std::io::Write;
use std::path::PathBuf;

/// Dice get their own stream so rerolling never shifts the shuffle order.
const DICE_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone)]
pub struct DrawOptions {
    pub preset: String,
    /// Saved deck name; takes precedence over `preset`
    pub deck: Option<String>,
    pub hand_size: Option<usize>,
    pub per_turn: Option<usize>,
    pub turns: u32,
    pub seed: Option<u64>,
    pub log: Option<PathBuf>,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            preset: "Kaelen Starter".to_string(),
            deck: None,
            hand_size: None,
            per_turn: None,
            turns: 3,
            seed: None,
            log: None,
        }
    }
}

/// Handle the draw command.
///
/// # Errors
///
/// `CliError::Deck` for an unknown preset, `CliError::InvalidInput` for an
/// unknown saved deck or a zero hand size, `CliError::Io` when the turn log
/// cannot be written.
pub fn handle_draw_command(
    opts: DrawOptions,
    cfg: &Config,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let seed = opts.seed.or(cfg.seed).unwrap_or_else(rand::random);
    let hand_size = opts.hand_size.unwrap_or(cfg.hand_size);
    if hand_size == 0 {
        return Err(CliError::InvalidInput(
            "hand size must be at least 1".to_string(),
        ));
    }
    let per_turn = opts.per_turn.unwrap_or(hand_size);
    let deck = resolve_deck(&opts, cfg)?;

    let mut combat = CombatPiles::from_deck(&deck, hand_size, ChaChaSource::from_seed(seed));
    let mut dice = DiceManager::with_standard_dice(
        cfg.dice,
        cfg.dice_sides,
        ChaChaSource::from_seed(seed ^ DICE_STREAM),
    )?;
    let mut logger = opts.log.as_ref().map(TurnLogger::create).transpose()?;

    writeln!(out, "Seed: {}", seed)?;
    writeln!(out, "Deck: {} ({} cards)", deck.name(), deck.card_count())?;

    for turn in 1..=opts.turns {
        let record = play_turn(&mut combat, &mut dice, per_turn, turn, out)?;
        if let Some(logger) = logger.as_mut() {
            let record = TurnRecord {
                turn_id: logger.next_id(),
                seed: Some(seed),
                ..record
            };
            logger.write(&record)?;
        }
    }

    writeln!(out, "Total cards: {}", combat.total_cards())?;
    Ok(())
}

/// Draw, play every card, roll. The returned record has no id yet.
fn play_turn<R: RandomSource, D: RandomSource>(
    combat: &mut CombatPiles<R>,
    dice: &mut DiceManager<D>,
    per_turn: usize,
    turn: u32,
    out: &mut dyn Write,
) -> Result<TurnRecord, CliError> {
    let drawn = combat.draw(per_turn);
    writeln!(
        out,
        "Turn {}: drew {} {}",
        turn,
        drawn.len(),
        format_hand(combat.hand().cards())
    )?;

    let in_hand: Vec<CardId> = combat.hand().cards().iter().map(|c| c.id().clone()).collect();
    for id in &in_hand {
        combat.play(id);
    }
    combat.discard_hand();

    dice.reset();
    let values = dice.roll()?;
    let combination = dice.evaluate()?;
    writeln!(
        out,
        "  Dice: {} {}",
        format_dice(dice.dice()),
        format_combination(&combination)
    )?;
    writeln!(
        out,
        "  Piles: draw {}, hand {}, discard {}",
        combat.draw_pile().size(),
        combat.hand().size(),
        combat.discard_pile().size()
    )?;

    Ok(TurnRecord {
        turn_id: String::new(),
        seed: None,
        events: combat.take_events(),
        dice: values,
        combination: Some(combination),
        ts: None,
    })
}

fn resolve_deck(opts: &DrawOptions, cfg: &Config) -> Result<Deck, CliError> {
    if let Some(name) = &opts.deck {
        let manager = DeckManager::new(FileStorage::new(&cfg.data_dir));
        return manager
            .get_deck(name)
            .cloned()
            .ok_or_else(|| CliError::InvalidInput(format!("no saved deck named '{}'", name)));
    }
    let preset = find_preset(&opts.preset)
        .ok_or_else(|| DeckError::PresetNotFound(opts.preset.clone()))?;
    Ok(preset.instantiate(preset.name)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chromatic_engine::combat::CombatEvent;
    use chromatic_engine::rng::ScriptedSource;

    fn opts(seed: u64) -> DrawOptions {
        DrawOptions {
            seed: Some(seed),
            ..DrawOptions::default()
        }
    }

    #[test]
    fn seeded_simulation_repeats() {
        let cfg = Config::default();
        let mut a = Vec::new();
        let mut b = Vec::new();
        handle_draw_command(opts(11), &cfg, &mut a).unwrap();
        handle_draw_command(opts(11), &cfg, &mut b).unwrap();
        assert_eq!(a, b);
        let text = String::from_utf8(a).unwrap();
        assert!(text.contains("Deck: Kaelen Starter (40 cards)"));
        assert!(text.ends_with("Total cards: 40\n"));
    }

    #[test]
    fn piles_after_each_turn() {
        let cfg = Config::default();
        let mut out = Vec::new();
        let options = DrawOptions {
            turns: 2,
            ..opts(3)
        };
        handle_draw_command(options, &cfg, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("  Piles: draw 35, hand 0, discard 5"));
        assert!(text.contains("  Piles: draw 30, hand 0, discard 10"));
    }

    #[test]
    fn turn_record_carries_moves_and_dice() {
        let deck = find_preset("Lyra Starter")
            .unwrap()
            .instantiate("Lyra")
            .unwrap();
        let mut combat = CombatPiles::from_deck(&deck, 5, ChaChaSource::from_seed(1));
        let mut dice =
            DiceManager::with_standard_dice(5, 6, ScriptedSource::new([4, 4, 4, 4, 2])).unwrap();
        let mut out = Vec::new();

        let record = play_turn(&mut combat, &mut dice, 3, 1, &mut out).unwrap();

        assert_eq!(record.dice, vec![4, 4, 4, 4, 2]);
        let drew = record
            .events
            .iter()
            .filter(|e| matches!(e, CombatEvent::Drew { .. }))
            .count();
        let played = record
            .events
            .iter()
            .filter(|e| matches!(e, CombatEvent::Played { .. }))
            .count();
        assert_eq!(drew, 1);
        assert_eq!(played, 3);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Four of a Kind (4) +15"), "{}", text);
    }

    #[test]
    fn unknown_sources_are_errors() {
        let cfg = Config::default();
        let mut out = Vec::new();
        let bad_preset = DrawOptions {
            preset: "Nobody".into(),
            ..opts(1)
        };
        assert!(matches!(
            handle_draw_command(bad_preset, &cfg, &mut out),
            Err(CliError::Deck(DeckError::PresetNotFound(_)))
        ));

        let no_hand = DrawOptions {
            hand_size: Some(0),
            ..opts(1)
        };
        assert!(matches!(
            handle_draw_command(no_hand, &cfg, &mut out),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn log_writes_one_line_per_turn() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("turns.jsonl");
        let options = DrawOptions {
            turns: 4,
            log: Some(path.clone()),
            ..opts(5)
        };
        let mut out = Vec::new();
        handle_draw_command(options, &Config::default(), &mut out).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let records: Vec<TurnRecord> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|r| r.seed == Some(5) && r.ts.is_some()));
        assert!(records[3].turn_id.ends_with("-000004"));
    }
}
