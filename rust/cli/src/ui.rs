//! UI helper functions for terminal output formatting.

use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Warn that a flag had no effect for this invocation
pub fn warn_parameter_unused(
    err: &mut dyn Write,
    param_name: &str,
    reason: &str,
) -> std::io::Result<()> {
    writeln!(err, "WARNING: Parameter --{} is ignored: {}", param_name, reason)
}
