//! Built-in preset listing.

use crate::error::CliError;
use chromatic_engine::deck::PRESETS;
use std::io::Write;

/// Handle the presets command: one line per preset with its card count
/// and description.
pub fn handle_presets_command(out: &mut dyn Write) -> Result<(), CliError> {
    for preset in PRESETS.iter() {
        writeln!(
            out,
            "{} ({} cards): {}",
            preset.name,
            preset.card_count(),
            preset.description
        )?;
    }
    Ok(())
}
