//! Dice roll command.
//!
//! Rolls a set of standard dice, locks the requested ones, rerolls the rest
//! and reports the combination and the score options of the final faces.
//!
//! ```text
//! $ chromatic roll --seed 7 --lock 1,2 --rerolls 1
//! Seed: 7
//! Roll 1: [2 2 5 1 6]
//! Roll 2: [2* 2* 3 1 2]
//! Combination: Three of a Kind (2) +6
//! Score: Triple 2s (200), Single 1 (100) = 300
//! ```

use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_combination, format_dice, format_score_groups};
use crate::ui;
use crate::validation::parse_lock_list;
use chromatic_engine::dice::DiceManager;
use chromatic_engine::rng::{ChaChaSource, RandomSource};
use std::io::Write;

/// Flags of the roll command; `None` falls back to configuration.
#[derive(Debug, Clone, Default)]
pub struct RollOptions {
    pub dice: Option<usize>,
    pub sides: Option<u8>,
    pub seed: Option<u64>,
    pub lock: Option<String>,
    pub rerolls: u32,
}

/// Handle the roll command.
///
/// # Errors
///
/// `CliError::InvalidInput` for a malformed `--lock` list and
/// `CliError::Dice` for a zero-die set or fewer than two sides.
pub fn handle_roll_command(
    opts: RollOptions,
    cfg: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let count = opts.dice.unwrap_or(cfg.dice);
    let sides = opts.sides.unwrap_or(cfg.dice_sides);
    let seed = opts.seed.or(cfg.seed).unwrap_or_else(rand::random);

    let locks = match opts.lock.as_deref() {
        Some(list) => parse_lock_list(list, count).map_err(CliError::InvalidInput)?,
        None => Vec::new(),
    };
    if !locks.is_empty() && opts.rerolls == 0 {
        ui::warn_parameter_unused(err, "lock", "no rerolls requested")?;
    }

    let mut manager = DiceManager::with_standard_dice(count, sides, ChaChaSource::from_seed(seed))?;
    writeln!(out, "Seed: {}", seed)?;
    roll_session(&mut manager, &locks, opts.rerolls, out)
}

/// Initial roll, then `rerolls` more with `locks` held.
fn roll_session<R: RandomSource>(
    manager: &mut DiceManager<R>,
    locks: &[usize],
    rerolls: u32,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    manager.roll()?;
    writeln!(out, "Roll 1: {}", format_dice(manager.dice()))?;

    if rerolls > 0 {
        for &index in locks {
            manager.toggle_lock(index)?;
        }
        for _ in 0..rerolls {
            manager.roll()?;
            writeln!(
                out,
                "Roll {}: {}",
                manager.roll_count(),
                format_dice(manager.dice())
            )?;
        }
    }

    writeln!(out, "Combination: {}", format_combination(&manager.evaluate()?))?;
    writeln!(out, "Score: {}", format_score_groups(&manager.score_options()?))?;
    Ok(())
}
