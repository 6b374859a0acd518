//! Card, dice, and score formatters for terminal display.
//!
//! Pure functions turning engine values into single-line strings. Card types
//! are shown with musical symbols where the terminal supports Unicode and
//! with letters otherwise.
//!
//! ## Example
//!
//! ```rust
//! use chromatic_engine::catalog::find_template;
//! use chromatic_cli::formatters::format_card;
//!
//! let strike = find_template("strike").unwrap().instantiate("strike-01");
//! let s = format_card(&strike);
//! assert!(s.contains("Strike") && s.contains("strike-01"));
//! ```

use chromatic_engine::cards::{Card, CardType};
use chromatic_engine::combination::CombinationResult;
use chromatic_engine::dice::Die;
use chromatic_engine::scoring::ScoringGroup;

/// Check if the terminal supports Unicode symbols by detecting modern terminal environments.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

/// Symbol for a card type.
///
/// # Unicode symbols
/// - Melody: ♪
/// - Harmony: ♫
/// - Rhythm: ♩
/// - Resonance: ◈
///
/// # ASCII fallback
/// - M, H, R, X
pub fn format_card_type(card_type: CardType) -> String {
    if supports_unicode() {
        match card_type {
            CardType::Melody => "♪",
            CardType::Harmony => "♫",
            CardType::Rhythm => "♩",
            CardType::Resonance => "◈",
        }
        .to_string()
    } else {
        match card_type {
            CardType::Melody => "M",
            CardType::Harmony => "H",
            CardType::Rhythm => "R",
            CardType::Resonance => "X",
        }
        .to_string()
    }
}

/// One card as `♪ Strike (1) [strike-01]`.
pub fn format_card(card: &Card) -> String {
    format!(
        "{} {} ({}) [{}]",
        format_card_type(card.card_type()),
        card.name(),
        card.cost(),
        card.id()
    )
}

/// Card names in bracket notation, `[]` when empty.
pub fn format_hand(cards: &[Card]) -> String {
    let names: Vec<&str> = cards.iter().map(Card::name).collect();
    format!("[{}]", names.join(", "))
}

/// A die as its value, `?` before the first roll, with `*` marking a lock.
pub fn format_die(die: &Die) -> String {
    let value = die
        .value()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "?".to_string());
    if die.is_locked() {
        format!("{}*", value)
    } else {
        value
    }
}

pub fn format_dice(dice: &[Die]) -> String {
    let faces: Vec<String> = dice.iter().map(format_die).collect();
    format!("[{}]", faces.join(" "))
}

/// `Full House (2 over 3) +10`
pub fn format_combination(result: &CombinationResult) -> String {
    let detail = match result.secondary {
        Some(second) => format!("{} over {}", result.primary, second),
        None => result.primary.to_string(),
    };
    format!(
        "{} ({}) +{}",
        result.combination.label(),
        detail,
        result.combination.bonus()
    )
}

/// `Triple 2s (200), Single 5 (50) = 250`, or `no scoring dice = 0`.
pub fn format_score_groups(groups: &[ScoringGroup]) -> String {
    let total: u32 = groups.iter().map(|g| g.score).sum();
    if groups.is_empty() {
        return "no scoring dice = 0".to_string();
    }
    let parts: Vec<String> = groups
        .iter()
        .map(|g| format!("{} ({})", g.label, g.score))
        .collect();
    format!("{} = {}", parts.join(", "), total)
}
