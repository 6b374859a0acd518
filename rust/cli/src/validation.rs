//! Parsing and validation of list-valued command-line arguments.
//!
//! Dice are numbered from 1 on the command line and from 0 in the engine;
//! conversion happens here so handlers only ever see engine indices.

/// Parses a comma-separated list of 1-based die positions such as `"1,3"`
/// into sorted, de-duplicated 0-based indices.
///
/// # Example
///
/// ```rust
/// # use chromatic_cli::validation::parse_lock_list;
/// assert_eq!(parse_lock_list("3, 1,3", 5), Ok(vec![0, 2]));
/// assert!(parse_lock_list("6", 5).is_err());
/// ```
pub fn parse_lock_list(input: &str, dice_count: usize) -> Result<Vec<usize>, String> {
    let mut indices = Vec::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let pos: usize = part
            .parse()
            .map_err(|_| format!("'{}' is not a die number", part))?;
        if pos == 0 || pos > dice_count {
            return Err(format!(
                "die {} is out of range (1-{})",
                pos, dice_count
            ));
        }
        indices.push(pos - 1);
    }
    if indices.is_empty() {
        return Err("no dice given to lock".to_string());
    }
    indices.sort_unstable();
    indices.dedup();
    Ok(indices)
}

/// Splits a comma-separated list of deck names, dropping blanks.
pub fn parse_name_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from)
        .collect()
}

/// Rejects blank deck names before they reach the registry.
pub fn validate_deck_name(name: &str) -> Result<&str, String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err("deck name must not be blank".to_string())
    } else {
        Ok(trimmed)
    }
}
