//! Error types for the CLI application.
//!
//! Engine errors are folded into [`CliError`] so handlers can use `?`
//! throughout; every variant maps to exit code `2`.

use std::fmt;

use chromatic_engine::errors::{DeckError, DiceError};

/// Custom error type for CLI operations.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Deck registry error (validation, storage, malformed JSON)
    Deck(DeckError),

    /// Dice engine precondition violation
    Dice(DiceError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Deck(e) => write!(f, "Deck error: {}", e),
            CliError::Dice(e) => write!(f, "Dice error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Deck(e) => Some(e),
            CliError::Dice(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<DeckError> for CliError {
    fn from(error: DeckError) -> Self {
        CliError::Deck(error)
    }
}

impl From<DiceError> for CliError {
    fn from(error: DiceError) -> Self {
        CliError::Dice(error)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        CliError::Io(std::io::Error::other(error))
    }
}
