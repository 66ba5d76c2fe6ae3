//! # Theme Migration
//!
//! Repairs persisted theme records to the current schema.
//!
//! - Every page/row/cell background bundle gets `backgroundImageType: "fill"`
//!   when the key is missing
//! - `name` falls back to the record's id, then to [`DEFAULT_THEME_NAME`]
//!
//! Migration works on raw JSON so fields this version does not model are left
//! untouched. Running it twice yields the same record.

use crate::error::MigrationError;
use crate::theme::DEFAULT_THEME_NAME;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

const BACKGROUND_FIELDS: [&str; 3] = ["pageBackground", "rowBackground", "cellBackground"];
const IMAGE_TYPE_KEY: &str = "backgroundImageType";
const DEFAULT_IMAGE_TYPE: &str = "fill";

/// Migrate a single theme record
pub fn migrate_theme(record: Value, id: &str) -> Result<Value, MigrationError> {
    let Value::Object(mut map) = record else {
        return Err(MigrationError::NotAnObject);
    };

    for field in BACKGROUND_FIELDS {
        match map.get_mut(field) {
            None | Some(Value::Null) => {}
            Some(Value::Object(bundle)) => {
                if !bundle.contains_key(IMAGE_TYPE_KEY) {
                    bundle.insert(IMAGE_TYPE_KEY.to_string(), Value::from(DEFAULT_IMAGE_TYPE));
                }
            }
            Some(_) => return Err(MigrationError::MalformedField(field)),
        }
    }

    ensure_name(&mut map, id);

    Ok(Value::Object(map))
}

fn ensure_name(map: &mut Map<String, Value>, id: &str) {
    let has_name = matches!(map.get("name"), Some(Value::String(s)) if !s.trim().is_empty());
    if has_name {
        return;
    }

    let fallback = if id.trim().is_empty() { DEFAULT_THEME_NAME } else { id };
    map.insert("name".to_string(), Value::from(fallback));
}

/// Migrate every record; a record that fails is kept in its original shape
pub fn migrate_collection(records: BTreeMap<String, Value>) -> BTreeMap<String, Value> {
    records
        .into_iter()
        .map(|(id, record)| match migrate_theme(record.clone(), &id) {
            Ok(migrated) => (id, migrated),
            Err(e) => {
                warn!(theme_id = %id, error = %e, "Theme migration failed - keeping original record");
                (id, record)
            }
        })
        .collect()
}

/// Result of reading a persisted collection
#[derive(Debug, Default)]
pub struct LoadedCollection {
    pub records: BTreeMap<String, Value>,

    /// The stored payload was unreadable and must be discarded
    pub reset: bool,
}

/// Parse and migrate a persisted collection payload
pub fn load_collection(raw: &str) -> LoadedCollection {
    let parsed: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Persisted theme collection is not valid JSON - resetting");
            return LoadedCollection { records: BTreeMap::new(), reset: true };
        }
    };

    let Value::Object(entries) = parsed else {
        warn!("Persisted theme collection is not an object - resetting");
        return LoadedCollection { records: BTreeMap::new(), reset: true };
    };

    debug!(themes = entries.len(), "Loaded persisted theme collection");

    LoadedCollection {
        records: migrate_collection(entries.into_iter().collect()),
        reset: false,
    }
}
