//! Command handler modules for the Chromatic CLI.
//!
//! Each subcommand lives in its own file with the same shape:
//!
//! - Public handler: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) passed in so tests can capture them
//! - Errors propagated as [`CliError`](crate::CliError); the dispatcher in
//!   [`crate::run`] prints them and maps them to exit code `2`
//!
//! # Example
//!
//! ```rust,ignore
//! use chromatic_cli::commands::handle_rng_command;
//! use std::io;
//!
//! handle_rng_command(Some(7), &mut io::stdout()).expect("rng failed");
//! ```

mod cfg;
mod deck;
mod draw;
mod presets;
mod rng;
mod roll;

pub use cfg::handle_cfg_command;
pub use deck::handle_deck_command;
pub use draw::{DrawOptions, handle_draw_command};
pub use presets::handle_presets_command;
pub use rng::handle_rng_command;
pub use roll::{RollOptions, handle_roll_command};
