use std::collections::HashSet;

use tracing::{info, warn};

use crate::deck::{find_preset, Deck, Preset, PRESETS};
use crate::errors::DeckError;
use crate::rules::DeckRules;
use crate::storage::Storage;

/// Storage key holding the JSON array of saved decks.
pub const STORAGE_KEY: &str = "chromatic_glitch_decks";

/// Registry of named, validated decks backed by a [`Storage`].
///
/// Loading is forgiving: an unreadable or corrupt registry is logged and the
/// manager starts empty. Writes are strict: validation and storage errors
/// are returned and the registry is left as it was.
///
/// # Examples
///
/// ```
/// use chromatic_engine::deck_manager::DeckManager;
/// use chromatic_engine::storage::MemoryStorage;
///
/// let mut manager = DeckManager::new(MemoryStorage::new());
/// let deck = manager.create_from_preset("Lyra Starter", "Healer").unwrap();
/// manager.save_deck(deck).unwrap();
/// assert_eq!(manager.get_deck("Healer").unwrap().card_count(), 40);
/// assert!(manager.delete_deck("Healer").unwrap());
/// assert!(!manager.delete_deck("Healer").unwrap());
/// ```
#[derive(Debug)]
pub struct DeckManager<S: Storage> {
    storage: S,
    rules: DeckRules,
    decks: Vec<Deck>,
}

impl<S: Storage> DeckManager<S> {
    pub fn new(storage: S) -> Self {
        Self::with_rules(storage, DeckRules::default())
    }

    pub fn with_rules(storage: S, rules: DeckRules) -> Self {
        let decks = load_registry(&storage);
        Self {
            storage,
            rules,
            decks,
        }
    }

    pub fn rules(&self) -> &DeckRules {
        &self.rules
    }

    /// Validates and upserts by name, then persists the whole registry.
    pub fn save_deck(&mut self, deck: Deck) -> Result<(), DeckError> {
        self.check(&deck)?;
        let previous = self.decks.clone();
        let name = deck.name().to_string();
        self.upsert(deck);
        self.persist_or_restore(previous)?;
        info!(deck = %name, "deck saved");
        Ok(())
    }

    /// Returns whether a deck was removed. Storage is only touched on removal.
    pub fn delete_deck(&mut self, name: &str) -> Result<bool, DeckError> {
        let Some(pos) = self.decks.iter().position(|d| d.name() == name) else {
            return Ok(false);
        };
        let previous = self.decks.clone();
        self.decks.remove(pos);
        self.persist_or_restore(previous)?;
        info!(deck = %name, "deck deleted");
        Ok(true)
    }

    pub fn get_deck(&self, name: &str) -> Option<&Deck> {
        self.decks.iter().find(|d| d.name() == name)
    }

    /// Snapshot of every saved deck; changes to it do not reach the registry.
    pub fn all_decks(&self) -> Vec<Deck> {
        self.decks.clone()
    }

    pub fn deck_names(&self) -> Vec<&str> {
        self.decks.iter().map(Deck::name).collect()
    }

    pub fn presets(&self) -> &'static [Preset] {
        &PRESETS
    }

    /// Expands a preset into a new deck. The deck is not saved.
    pub fn create_from_preset(
        &self,
        preset_name: &str,
        new_name: &str,
    ) -> Result<Deck, DeckError> {
        let preset = find_preset(preset_name)
            .ok_or_else(|| DeckError::PresetNotFound(preset_name.to_string()))?;
        preset.instantiate(new_name)
    }

    /// Imports a JSON array of decks. Every deck is validated before any is
    /// stored; the first invalid one is reported with all of its violations.
    /// A name repeated within the batch fails the whole import.
    /// Returns the number of decks imported.
    pub fn import_from_json(&mut self, json: &str) -> Result<usize, DeckError> {
        let incoming: Vec<Deck> = serde_json::from_str(json)?;
        let mut names = HashSet::new();
        for deck in &incoming {
            if !names.insert(deck.name()) {
                return Err(DeckError::DuplicateName(deck.name().to_string()));
            }
            self.check(deck)?;
        }
        let previous = self.decks.clone();
        let count = incoming.len();
        for deck in incoming {
            self.upsert(deck);
        }
        self.persist_or_restore(previous)?;
        info!(count, "decks imported");
        Ok(count)
    }

    /// Pretty JSON array of the named decks (unknown names are skipped), or of
    /// every deck when `names` is `None`.
    pub fn export_to_json(&self, names: Option<&[&str]>) -> Result<String, DeckError> {
        let selected: Vec<&Deck> = match names {
            Some(names) => names.iter().filter_map(|n| self.get_deck(n)).collect(),
            None => self.decks.iter().collect(),
        };
        Ok(serde_json::to_string_pretty(&selected)?)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn check(&self, deck: &Deck) -> Result<(), DeckError> {
        self.rules
            .validate(deck)
            .map_err(|violations| DeckError::Invalid {
                name: deck.name().to_string(),
                violations,
            })
    }

    fn upsert(&mut self, deck: Deck) {
        match self.decks.iter_mut().find(|d| d.name() == deck.name()) {
            Some(slot) => *slot = deck,
            None => self.decks.push(deck),
        }
    }

    fn persist_or_restore(&mut self, previous: Vec<Deck>) -> Result<(), DeckError> {
        let result = serde_json::to_string(&self.decks)
            .map_err(DeckError::from)
            .and_then(|json| {
                self.storage
                    .set_item(STORAGE_KEY, &json)
                    .map_err(DeckError::from)
            });
        if let Err(e) = result {
            self.decks = previous;
            return Err(e);
        }
        Ok(())
    }
}

fn load_registry<S: Storage>(storage: &S) -> Vec<Deck> {
    let raw = match storage.get_item(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(error = %e, "failed to read saved decks, starting empty");
            return Vec::new();
        }
    };
    match serde_json::from_str::<Vec<Deck>>(&raw) {
        Ok(decks) => dedupe_by_name(decks),
        Err(e) => {
            warn!(error = %e, "saved decks are corrupt, starting empty");
            Vec::new()
        }
    }
}

/// Later entries win, keeping the position of the first occurrence.
fn dedupe_by_name(decks: Vec<Deck>) -> Vec<Deck> {
    let mut unique: Vec<Deck> = Vec::with_capacity(decks.len());
    for deck in decks {
        match unique.iter_mut().find(|d| d.name() == deck.name()) {
            Some(slot) => {
                warn!(deck = %deck.name(), "duplicate saved deck, keeping the later entry");
                *slot = deck;
            }
            None => unique.push(deck),
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Violation;
    use crate::storage::MemoryStorage;

    fn kaelen(name: &str) -> Deck {
        find_preset("Kaelen Starter")
            .unwrap()
            .instantiate(name)
            .unwrap()
    }

    #[test]
    fn save_upserts_by_name() {
        let mut m = DeckManager::new(MemoryStorage::new());
        m.save_deck(kaelen("A")).unwrap();
        m.save_deck(kaelen("B")).unwrap();
        m.save_deck(kaelen("A")).unwrap();
        assert_eq!(m.deck_names(), vec!["A", "B"]);
    }

    #[test]
    fn invalid_deck_is_not_saved() {
        let mut m = DeckManager::new(MemoryStorage::new());
        let mut cards = kaelen("x").into_cards();
        cards.truncate(39);
        let err = m.save_deck(Deck::new(" ", cards)).unwrap_err();
        match err {
            DeckError::Invalid { violations, .. } => {
                assert!(violations.contains(&Violation::BlankName));
                assert!(violations.contains(&Violation::WrongSize {
                    expected: 40,
                    actual: 39
                }));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(m.all_decks().is_empty());
        assert_eq!(m.storage().get_item(STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn registry_survives_reload() {
        let mut m = DeckManager::new(MemoryStorage::new());
        m.save_deck(kaelen("Keep")).unwrap();
        let raw = m.storage().get_item(STORAGE_KEY).unwrap().unwrap();
        let reloaded = DeckManager::new(MemoryStorage::with_item(STORAGE_KEY, &raw));
        assert_eq!(reloaded.get_deck("Keep"), m.get_deck("Keep"));
    }

    #[test]
    fn corrupt_registry_loads_empty() {
        let m = DeckManager::new(MemoryStorage::with_item(STORAGE_KEY, "{not json"));
        assert!(m.all_decks().is_empty());
    }

    #[test]
    fn duplicate_saved_names_collapse_on_load() {
        let mut second = kaelen("Twin").into_cards();
        second.swap(0, 39);
        let raw = serde_json::to_string(&vec![
            kaelen("Twin"),
            kaelen("Other"),
            Deck::new("Twin", second.clone()),
        ])
        .unwrap();

        let mut m = DeckManager::new(MemoryStorage::with_item(STORAGE_KEY, &raw));
        assert_eq!(m.deck_names(), vec!["Twin", "Other"]);
        assert_eq!(m.get_deck("Twin").unwrap().cards(), &second[..]);

        assert!(m.delete_deck("Twin").unwrap());
        assert!(m.get_deck("Twin").is_none());
        let reloaded = DeckManager::new(MemoryStorage::with_item(
            STORAGE_KEY,
            &m.storage().get_item(STORAGE_KEY).unwrap().unwrap(),
        ));
        assert_eq!(reloaded.deck_names(), vec!["Other"]);
    }

    #[test]
    fn import_rejects_repeated_names() {
        let mut m = DeckManager::new(MemoryStorage::new());
        let json = serde_json::to_string(&vec![kaelen("Dup"), kaelen("Dup")]).unwrap();
        assert!(matches!(
            m.import_from_json(&json),
            Err(DeckError::DuplicateName(n)) if n == "Dup"
        ));
        assert!(m.all_decks().is_empty());
        assert_eq!(m.storage().get_item(STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn unknown_preset() {
        let m = DeckManager::new(MemoryStorage::new());
        assert!(matches!(
            m.create_from_preset("Nope", "x"),
            Err(DeckError::PresetNotFound(p)) if p == "Nope"
        ));
        assert_eq!(m.presets().len(), 3);
    }

    #[test]
    fn import_rejects_whole_batch_on_one_bad_deck() {
        let mut m = DeckManager::new(MemoryStorage::new());
        let good = kaelen("Good");
        let bad = Deck::new("Bad", good.cards()[..10].to_vec());
        let json = serde_json::to_string(&vec![good, bad]).unwrap();
        match m.import_from_json(&json).unwrap_err() {
            DeckError::Invalid { name, .. } => assert_eq!(name, "Bad"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(m.get_deck("Good").is_none());
    }

    #[test]
    fn import_malformed_json() {
        let mut m = DeckManager::new(MemoryStorage::new());
        assert!(matches!(
            m.import_from_json("[{]"),
            Err(DeckError::Json(_))
        ));
    }

    #[test]
    fn export_subset_skips_unknown_names() {
        let mut m = DeckManager::new(MemoryStorage::new());
        m.save_deck(kaelen("One")).unwrap();
        m.save_deck(kaelen("Two")).unwrap();
        let json = m.export_to_json(Some(&["Two", "Ghost"][..])).unwrap();
        let decks: Vec<Deck> = serde_json::from_str(&json).unwrap();
        assert_eq!(decks.len(), 1);
        assert_eq!(decks[0].name(), "Two");

        let all: Vec<Deck> = serde_json::from_str(&m.export_to_json(None).unwrap()).unwrap();
        assert_eq!(all.len(), 2);
    }
}
