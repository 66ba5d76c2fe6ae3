//! # Theme Store
//!
//! Holds the user theme collection on top of the built-in themes and the id of
//! the active theme.
//!
//! ## Design
//!
//! - Records are kept as migrated JSON so unknown fields round-trip
//! - `get()` decodes on read; a user record shadows a built-in with the same id
//! - Every committed change is announced to subscribers as a [`ThemeEvent`]
//! - With [`PersistMode::EveryChange`] each commit writes the whole collection;
//!   [`PersistMode::Manual`] defers writes until [`ThemeStore::flush`]

use crate::builtin::{self, BUILTIN_IDS, PLAIN_ID};
use crate::error::ThemeError;
use crate::migrate::{load_collection, migrate_collection};
use crate::naming::{unique_theme_id, unique_theme_name};
use crate::storage::ThemeStorage;
use crate::theme::Theme;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Storage key of the persisted collection
pub const COLLECTION_KEY: &str = "quire.themes";

/// Change notification sent to subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeEvent {
    Created(String),
    Updated(String),
    Removed(String),
    ActiveChanged(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistMode {
    /// Write the collection after every committed change
    #[default]
    EveryChange,
    /// Only write on explicit `flush()`
    Manual,
}

pub type ListenerId = usize;

type Listener = Box<dyn FnMut(&ThemeEvent)>;

pub struct ThemeStore<S: ThemeStorage> {
    storage: S,
    records: BTreeMap<String, Value>,
    active: String,
    persist_mode: PersistMode,
    dirty: bool,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: ListenerId,
}

impl<S: ThemeStorage> ThemeStore<S> {
    /// Load the persisted collection, discarding it if it cannot be parsed
    pub fn load(mut storage: S) -> Result<Self, ThemeError> {
        let records = match storage.read(COLLECTION_KEY)? {
            None => BTreeMap::new(),
            Some(raw) => {
                let loaded = load_collection(&raw);
                if loaded.reset {
                    storage.remove(COLLECTION_KEY)?;
                }
                loaded.records
            }
        };

        info!(user_themes = records.len(), "Theme store loaded");

        Ok(Self {
            storage,
            records,
            active: PLAIN_ID.to_string(),
            persist_mode: PersistMode::default(),
            dirty: false,
            listeners: Vec::new(),
            next_listener: 0,
        })
    }

    pub fn with_persist_mode(mut self, mode: PersistMode) -> Self {
        self.persist_mode = mode;
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Raw (migrated) user records
    pub fn records(&self) -> &BTreeMap<String, Value> {
        &self.records
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Look up a theme; user records shadow built-ins
    pub fn get(&self, id: &str) -> Option<Theme> {
        if let Some(record) = self.records.get(id) {
            match Theme::from_value(record.clone()) {
                Ok(theme) => return Some(theme),
                Err(e) => {
                    warn!(theme_id = %id, error = %e, "Stored theme is unreadable - using built-in fallback");
                }
            }
        }
        builtin::builtin_theme(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id) || builtin::is_builtin(id)
    }

    /// Built-in ids first, then user ids that do not shadow a built-in
    pub fn ids(&self) -> Vec<String> {
        BUILTIN_IDS
            .iter()
            .map(|id| id.to_string())
            .chain(self.records.keys().filter(|id| !builtin::is_builtin(id)).cloned())
            .collect()
    }

    /// Display names of the user themes
    pub fn user_names(&self) -> Vec<String> {
        self.records
            .values()
            .filter_map(|record| record.get("name").and_then(Value::as_str))
            .map(str::to_string)
            .collect()
    }

    pub fn active_theme_id(&self) -> &str {
        &self.active
    }

    /// The active theme, or Plain if it has become unreadable
    pub fn active_theme(&self) -> Theme {
        self.get(&self.active).unwrap_or_else(builtin::plain)
    }

    /// Select the theme the resolver uses; documents are not touched
    pub fn set_active_theme(&mut self, id: &str) -> Result<(), ThemeError> {
        if !self.contains(id) {
            return Err(ThemeError::NotFound(id.to_string()));
        }
        if self.active != id {
            debug!(from = %self.active, to = %id, "Switching active theme");
            self.active = id.to_string();
            self.notify(&ThemeEvent::ActiveChanged(id.to_string()));
        }
        Ok(())
    }

    /// Save `theme` as a new user theme and return its id.
    ///
    /// `base_builtin` is the id of the built-in theme this one was derived
    /// from, if any; its name counts as taken.
    pub fn save_theme(
        &mut self,
        desired_name: &str,
        theme: Theme,
        base_builtin: Option<&str>,
    ) -> Result<String, ThemeError> {
        if desired_name.trim().is_empty() {
            return Err(ThemeError::EmptyName);
        }

        let base_name = base_builtin.and_then(builtin::builtin_theme).map(|t| t.name);
        let existing_names = self.user_names();
        let name = unique_theme_name(
            desired_name,
            existing_names.iter().map(String::as_str),
            base_name.as_deref(),
        );

        let taken_ids: Vec<&str> = self
            .records
            .keys()
            .map(String::as_str)
            .chain(BUILTIN_IDS)
            .collect();
        let id = unique_theme_id(&name, taken_ids);

        let record = theme.renamed(name.clone()).to_value()?;
        self.records.insert(id.clone(), record);
        info!(theme_id = %id, name = %name, "Created theme");

        self.commit(ThemeEvent::Created(id.clone()))?;
        Ok(id)
    }

    /// Insert or replace the record stored under `id`
    pub fn put_theme(&mut self, id: &str, theme: &Theme) -> Result<(), ThemeError> {
        let event = if self.records.contains_key(id) {
            ThemeEvent::Updated(id.to_string())
        } else {
            ThemeEvent::Created(id.to_string())
        };
        self.records.insert(id.to_string(), theme.to_value()?);
        self.commit(event)
    }

    /// Edit a theme in place. Editing a built-in stores a shadowing copy.
    pub fn update_theme(&mut self, id: &str, edit: impl FnOnce(&mut Theme)) -> Result<(), ThemeError> {
        let mut theme = self.get(id).ok_or_else(|| ThemeError::NotFound(id.to_string()))?;
        edit(&mut theme);
        self.records.insert(id.to_string(), theme.to_value()?);
        self.commit(ThemeEvent::Updated(id.to_string()))
    }

    /// Remove a user theme. Built-ins can only lose their shadowing copy.
    pub fn remove_theme(&mut self, id: &str) -> Result<(), ThemeError> {
        if self.records.remove(id).is_none() {
            return Err(if builtin::is_builtin(id) {
                ThemeError::BuiltinTheme(id.to_string())
            } else {
                ThemeError::NotFound(id.to_string())
            });
        }

        self.commit(ThemeEvent::Removed(id.to_string()))?;

        if self.active == id && !builtin::is_builtin(id) {
            self.active = PLAIN_ID.to_string();
            self.notify(&ThemeEvent::ActiveChanged(PLAIN_ID.to_string()));
        }
        Ok(())
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&ThemeEvent) + 'static) -> ListenerId {
        let id = self.next_listener;
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    /// Migrate and write the whole collection
    pub fn flush(&mut self) -> Result<(), ThemeError> {
        self.records = migrate_collection(std::mem::take(&mut self.records));
        let payload = serde_json::to_string(&self.records)?;
        self.storage.write(COLLECTION_KEY, &payload)?;
        self.dirty = false;
        debug!(themes = self.records.len(), "Persisted theme collection");
        Ok(())
    }

    fn commit(&mut self, event: ThemeEvent) -> Result<(), ThemeError> {
        self.dirty = true;
        if self.persist_mode == PersistMode::EveryChange {
            self.flush()?;
        }
        self.notify(&event);
        Ok(())
    }

    fn notify(&mut self, event: &ThemeEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::NEON_ID;
    use crate::storage::MemoryStorage;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn empty_store() -> ThemeStore<MemoryStorage> {
        ThemeStore::load(MemoryStorage::new()).unwrap()
    }

    #[test]
    fn test_builtins_available_without_storage() {
        let store = empty_store();
        assert_eq!(store.ids(), vec!["plain", "neon"]);
        assert_eq!(store.active_theme_id(), "plain");
        assert_eq!(store.get(NEON_ID).unwrap().name, "Neon");
    }

    #[test]
    fn test_save_rejects_empty_name() {
        let mut store = empty_store();
        let result = store.save_theme("   ", builtin::plain(), Some(PLAIN_ID));
        assert!(matches!(result, Err(ThemeError::EmptyName)));
        assert!(store.records().is_empty());
    }

    #[test]
    fn test_saving_builtin_copies_disambiguates() {
        let mut store = empty_store();

        let first = store.save_theme("Plain", builtin::plain(), Some(PLAIN_ID)).unwrap();
        let second = store.save_theme("Plain", builtin::plain(), Some(PLAIN_ID)).unwrap();

        assert_eq!(first, "plain-1");
        assert_eq!(second, "plain-2");
        assert_eq!(store.get(&second).unwrap().name, "Plain-2");
        // Built-in is still intact
        assert_eq!(store.get(PLAIN_ID).unwrap().name, "Plain");
    }

    #[test]
    fn test_every_change_is_persisted() {
        let mut store = empty_store();
        let id = store.save_theme("Ocean", builtin::plain(), None).unwrap();
        assert!(!store.is_dirty());

        let raw = store.storage().read(COLLECTION_KEY).unwrap().unwrap();
        let reloaded = ThemeStore::load(MemoryStorage::with_entry(COLLECTION_KEY, &raw)).unwrap();
        assert_eq!(reloaded.get(&id).unwrap().name, "Ocean");
    }

    #[test]
    fn test_manual_mode_defers_writes() {
        let mut store = empty_store().with_persist_mode(PersistMode::Manual);
        store.save_theme("Ocean", builtin::plain(), None).unwrap();

        assert!(store.is_dirty());
        assert_eq!(store.storage().read(COLLECTION_KEY).unwrap(), None);

        store.flush().unwrap();
        assert!(store.storage().read(COLLECTION_KEY).unwrap().is_some());
    }

    #[test]
    fn test_corrupt_payload_is_discarded() {
        let store = ThemeStore::load(MemoryStorage::with_entry(COLLECTION_KEY, "{{{")).unwrap();
        assert!(store.records().is_empty());
        assert_eq!(store.storage().read(COLLECTION_KEY).unwrap(), None);
    }

    #[test]
    fn test_unreadable_record_falls_back_to_builtin() {
        let raw = r#"{ "neon": { "name": "Neon", "colors": 12 } }"#;
        let store = ThemeStore::load(MemoryStorage::with_entry(COLLECTION_KEY, raw)).unwrap();

        // Still listed, still passed through untouched
        assert!(store.records().contains_key("neon"));
        assert_eq!(store.get("neon").unwrap(), builtin::neon());
    }

    #[test]
    fn test_builtins_cannot_be_removed() {
        let mut store = empty_store();
        assert!(matches!(store.remove_theme(PLAIN_ID), Err(ThemeError::BuiltinTheme(_))));
        assert!(matches!(store.remove_theme("nope"), Err(ThemeError::NotFound(_))));
    }

    #[test]
    fn test_update_builtin_creates_shadow_that_can_be_removed() {
        let mut store = empty_store();
        store
            .update_theme(PLAIN_ID, |theme| theme.colors.accent = "#ff0000".to_string())
            .unwrap();
        assert_eq!(store.get(PLAIN_ID).unwrap().colors.accent, "#ff0000");

        store.remove_theme(PLAIN_ID).unwrap();
        assert_eq!(store.get(PLAIN_ID).unwrap(), builtin::plain());
    }

    #[test]
    fn test_subscribers_receive_events() {
        let mut store = empty_store();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let listener = store.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        let id = store.save_theme("Ocean", builtin::plain(), None).unwrap();
        store.set_active_theme(&id).unwrap();
        store.remove_theme(&id).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![
                ThemeEvent::Created("ocean".to_string()),
                ThemeEvent::ActiveChanged("ocean".to_string()),
                ThemeEvent::Removed("ocean".to_string()),
                ThemeEvent::ActiveChanged("plain".to_string()),
            ]
        );

        store.unsubscribe(listener);
        store.set_active_theme(NEON_ID).unwrap();
        assert_eq!(seen.borrow().len(), 4);
    }

    #[test]
    fn test_set_active_theme_requires_known_id() {
        let mut store = empty_store();
        assert!(matches!(store.set_active_theme("ghost"), Err(ThemeError::NotFound(_))));
        assert_eq!(store.active_theme_id(), PLAIN_ID);
    }
}
