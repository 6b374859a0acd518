//! Configuration command handler.
//!
//! Prints the resolved configuration as JSON, each value paired with its
//! source (`default`, `file`, or `env`).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "hand_size": {
//!     "value": 5,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails and
/// `CliError::Io` if writing to the output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "hand_size": {
            "value": config.hand_size,
            "source": sources.hand_size,
        },
        "dice": {
            "value": config.dice,
            "source": sources.dice,
        },
        "dice_sides": {
            "value": config.dice_sides,
            "source": sources.dice_sides,
        },
        "data_dir": {
            "value": config.data_dir,
            "source": sources.data_dir,
        }
    });
    let json_str = serde_json::to_string_pretty(&display)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
