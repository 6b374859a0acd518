//! Command-line argument definitions.
//!
//! Flags left unset fall back to the resolved [`crate::config::Config`], so
//! every numeric option here is an `Option`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "chromatic",
    version,
    about = "Chromatic Glitch card and dice engine CLI"
)]
pub struct ChromaticCli {
    /// Directory holding the saved deck registry (overrides CHROMATIC_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Roll dice, lock some, reroll, and score the result
    Roll {
        #[arg(long)]
        dice: Option<usize>,
        #[arg(long)]
        sides: Option<u8>,
        #[arg(long)]
        seed: Option<u64>,
        /// Comma-separated 1-based dice to keep between rerolls, e.g. `1,3`
        #[arg(long)]
        lock: Option<String>,
        #[arg(long, default_value_t = 0)]
        rerolls: u32,
    },
    /// Simulate combat turns of draw, play-all, and roll
    Draw {
        /// Built-in preset to draw from
        #[arg(long, default_value = "Kaelen Starter")]
        preset: String,
        /// Saved deck to draw from instead of a preset
        #[arg(long)]
        deck: Option<String>,
        #[arg(long)]
        hand_size: Option<usize>,
        /// Cards drawn at the start of each turn (defaults to the hand size)
        #[arg(long)]
        per_turn: Option<usize>,
        #[arg(long, default_value_t = 3)]
        turns: u32,
        #[arg(long)]
        seed: Option<u64>,
        /// Append one JSON line per turn to this file
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// List the built-in deck presets
    Presets,
    /// Manage saved decks
    Deck {
        #[command(subcommand)]
        action: DeckCommand,
    },
    /// Show resolved configuration and where each value came from
    Cfg,
    /// Print a sample from the seeded random source
    Rng {
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DeckCommand {
    /// List saved decks
    List,
    /// Show the cards of a saved deck
    Show { name: String },
    /// Save a copy of a preset under a new name
    Create {
        #[arg(long)]
        preset: String,
        #[arg(long)]
        name: String,
    },
    /// Delete a saved deck
    Delete { name: String },
    /// Import decks from a JSON file
    Import { file: String },
    /// Export saved decks as JSON
    Export {
        /// Comma-separated deck names; all decks when omitted
        #[arg(long)]
        names: Option<String>,
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        ChromaticCli::command().debug_assert();
    }

    #[test]
    fn global_data_dir_after_subcommand() {
        let cli =
            ChromaticCli::try_parse_from(["chromatic", "deck", "list", "--data-dir", "/tmp/x"])
                .unwrap();
        assert_eq!(cli.data_dir.as_deref(), Some("/tmp/x"));
        assert!(matches!(
            cli.cmd,
            Commands::Deck {
                action: DeckCommand::List
            }
        ));
    }

    #[test]
    fn roll_defaults_to_no_rerolls() {
        let cli = ChromaticCli::try_parse_from(["chromatic", "roll"]).unwrap();
        match cli.cmd {
            Commands::Roll {
                rerolls, lock, dice, ..
            } => {
                assert_eq!(rerolls, 0);
                assert!(lock.is_none());
                assert!(dice.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
