//! File helpers for deck import/export and turn logs.
//!
//! I/O errors are converted to `String` with the offending path so command
//! handlers can wrap them in [`crate::CliError::InvalidInput`].

use std::path::Path;

/// Reads a UTF-8 text file, stripping a leading byte order mark.
///
/// # Example
///
/// ```rust,no_run
/// # use chromatic_cli::io_utils::read_text;
/// let json = read_text("decks.json").unwrap();
/// ```
pub fn read_text(path: &str) -> Result<String, String> {
    let mut content =
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// Writes `content` to `path`, creating missing parent directories first.
pub fn write_text(path: &Path, content: &str) -> Result<(), String> {
    ensure_parent_dir(path)?;
    std::fs::write(path, content).map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}

/// Ensure parent directory exists for given path, creating if needed.
pub fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
        }
    }
    Ok(())
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}
