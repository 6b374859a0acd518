//! # Chromatic CLI Library
//!
//! Command-line front end for the Chromatic Glitch card and dice engine.
//! It rolls dice, simulates combat turns over a deck and manages the saved
//! deck registry.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line
//! arguments and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["chromatic", "roll", "--seed", "7", "--lock", "1,2", "--rerolls", "1"];
//! let code = chromatic_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `roll`: Roll dice, lock some, reroll, and score the result
//! - `draw`: Simulate combat turns of draw, play-all, and roll
//! - `presets`: List the built-in deck presets
//! - `deck`: List, show, create, delete, import, and export saved decks
//! - `cfg`: Display current configuration settings
//! - `rng`: Sample the seeded random source

use clap::Parser;
use std::io::Write;

#[macro_use]
mod macros;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{ChromaticCli, Commands};
use commands::{
    DrawOptions, RollOptions, handle_cfg_command, handle_deck_command, handle_draw_command,
    handle_presets_command, handle_rng_command, handle_roll_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["roll", "draw", "presets", "deck", "cfg", "rng"];

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand
/// handler.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for warnings and error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["chromatic", "rng", "--seed", "42"];
/// let code = chromatic_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match ChromaticCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(e, out, err),
    };

    let ChromaticCli { data_dir, cmd } = cli;

    let mut cfg = match config::load_with_sources() {
        Ok(resolved) => resolved.config,
        Err(e) => {
            write_or_exit!(err, "Error: {}", CliError::Config(e.to_string()));
            return exit_code::ERROR;
        }
    };
    if let Some(dir) = data_dir {
        cfg.data_dir = dir;
    }

    let result = match cmd {
        Commands::Roll {
            dice,
            sides,
            seed,
            lock,
            rerolls,
        } => handle_roll_command(
            RollOptions {
                dice,
                sides,
                seed,
                lock,
                rerolls,
            },
            &cfg,
            out,
            err,
        ),
        Commands::Draw {
            preset,
            deck,
            hand_size,
            per_turn,
            turns,
            seed,
            log,
        } => handle_draw_command(
            DrawOptions {
                preset,
                deck,
                hand_size,
                per_turn,
                turns,
                seed,
                log,
            },
            &cfg,
            out,
        ),
        Commands::Presets => handle_presets_command(out),
        Commands::Deck { action } => handle_deck_command(action, &cfg, out, err),
        Commands::Rng { seed } => handle_rng_command(seed.or(cfg.seed), out),
        Commands::Cfg => handle_cfg_command(out, err),
    };
    finish(result, err)
}

fn finish(result: Result<(), CliError>, err: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

fn report_parse_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if write!(out, "{}", e).is_err() {
                return exit_code::ERROR;
            }
            exit_code::SUCCESS
        }
        _ => {
            write_or_exit!(err, "{}", e);
            write_or_exit!(err, "Chromatic Glitch CLI");
            write_or_exit!(err, "Usage: chromatic <command> [options]\n");
            write_or_exit!(err, "Commands:");
            for c in COMMANDS {
                write_or_exit!(err, "  {}", c);
            }
            write_or_exit!(err, "\nFor full help, run: chromatic --help");
            exit_code::ERROR
        }
    }
}
