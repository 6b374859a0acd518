//! Saved deck management.
//!
//! All actions work on the file-backed registry in the configured data
//! directory (`<data_dir>/chromatic_glitch_decks.json`). A missing or
//! corrupt registry reads as empty; the engine logs a warning in that case.

use crate::cli::DeckCommand;
use crate::config::Config;
use crate::error::CliError;
use crate::formatters::format_card;
use crate::io_utils;
use crate::ui;
use crate::validation::{parse_name_list, validate_deck_name};
use chromatic_engine::deck_manager::DeckManager;
use chromatic_engine::storage::{FileStorage, Storage};
use std::io::Write;

/// Handle one `deck` subcommand against the registry in `cfg.data_dir`.
pub fn handle_deck_command(
    action: DeckCommand,
    cfg: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let mut manager = DeckManager::new(FileStorage::new(&cfg.data_dir));
    run_action(action, &mut manager, out, err)
}

fn run_action<S: Storage>(
    action: DeckCommand,
    manager: &mut DeckManager<S>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    match action {
        DeckCommand::List => {
            let decks = manager.all_decks();
            if decks.is_empty() {
                writeln!(out, "No saved decks.")?;
            }
            for deck in &decks {
                writeln!(out, "{} ({} cards)", deck.name(), deck.card_count())?;
            }
        }
        DeckCommand::Show { name } => {
            let deck = manager
                .get_deck(&name)
                .ok_or_else(|| CliError::InvalidInput(format!("no saved deck named '{}'", name)))?;
            writeln!(out, "{} ({} cards)", deck.name(), deck.card_count())?;
            for card in deck.cards() {
                writeln!(out, "  {}", format_card(card))?;
            }
        }
        DeckCommand::Create { preset, name } => {
            let name = validate_deck_name(&name).map_err(CliError::InvalidInput)?;
            let deck = manager.create_from_preset(&preset, name)?;
            manager.save_deck(deck)?;
            writeln!(out, "Saved deck '{}' from preset '{}'", name, preset)?;
        }
        DeckCommand::Delete { name } => {
            if !manager.delete_deck(&name)? {
                return Err(CliError::InvalidInput(format!(
                    "no saved deck named '{}'",
                    name
                )));
            }
            writeln!(out, "Deleted deck '{}'", name)?;
        }
        DeckCommand::Import { file } => {
            let json = io_utils::read_text(&file).map_err(CliError::InvalidInput)?;
            let count = manager.import_from_json(&json)?;
            writeln!(out, "Imported {} deck(s) from {}", count, file)?;
        }
        DeckCommand::Export { names, output } => {
            let names = names.as_deref().map(parse_name_list);
            let selected: Option<Vec<&str>> = names
                .as_ref()
                .map(|list| list.iter().map(String::as_str).collect());
            if let Some(list) = &selected {
                for missing in list.iter().filter(|n| manager.get_deck(n).is_none()) {
                    ui::display_warning(err, &format!("no saved deck named '{}', skipped", missing))?;
                }
            }
            let json = manager.export_to_json(selected.as_deref())?;
            match output {
                Some(path) => {
                    io_utils::write_text(&path, &json).map_err(CliError::InvalidInput)?;
                    writeln!(out, "Exported decks to {}", path.display())?;
                }
                None => writeln!(out, "{}", json)?,
            }
        }
    }
    Ok(())
}
