//! Character records keyed by character id.
//!
//! Records are raw JSON so a store never has to understand the sheet; the
//! roll service converts them with [`CharacterSheet::from_stored`].
//!
//! [`CharacterSheet::from_stored`]: vtm_mechanics::CharacterSheet::from_stored

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::SheetSettings;
use crate::error::{SessionError, SessionResult};

/// Get/set access to character records.
pub trait CharacterStore {
    /// The stored record for `id`, or `None` if the character is new.
    fn get(&self, id: &str) -> SessionResult<Option<Value>>;

    /// Replace the record for `id`.
    fn set(&mut self, id: &str, record: Value) -> SessionResult<()>;
}

/// A store that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<String, Value>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CharacterStore for MemoryStore {
    fn get(&self, id: &str) -> SessionResult<Option<Value>> {
        Ok(self.records.get(id).cloned())
    }

    fn set(&mut self, id: &str, record: Value) -> SessionResult<()> {
        self.records.insert(id.to_string(), record);
        Ok(())
    }
}

/// On-disk layout: settings at the top level next to `characterData`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreDocument {
    #[serde(flatten)]
    settings: SheetSettings,
    #[serde(default)]
    character_data: BTreeMap<String, Value>,
}

/// A store backed by one JSON file, rewritten on every change.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    document: StoreDocument,
}

impl JsonFileStore {
    /// Open a store file. A missing file opens as an empty store and is
    /// created on the first write.
    pub fn open(path: impl AsRef<Path>) -> SessionResult<Self> {
        let path = path.as_ref().to_path_buf();
        let document = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreDocument::default(),
            Err(source) => return Err(SessionError::Io { path, source }),
        };
        Ok(Self { path, document })
    }

    /// Settings stored in the file.
    pub fn settings(&self) -> &SheetSettings {
        &self.document.settings
    }

    /// Replace the stored settings and write the file.
    pub fn set_settings(&mut self, settings: SheetSettings) -> SessionResult<()> {
        self.document.settings = settings;
        self.flush()
    }

    fn flush(&self) -> SessionResult<()> {
        let text = serde_json::to_string_pretty(&self.document)?;
        fs::write(&self.path, text).map_err(|source| SessionError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl CharacterStore for JsonFileStore {
    fn get(&self, id: &str) -> SessionResult<Option<Value>> {
        Ok(self.document.character_data.get(id).cloned())
    }

    fn set(&mut self, id: &str, record: Value) -> SessionResult<()> {
        self.document
            .character_data
            .insert(id.to_string(), record);
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.get("greta").unwrap().is_none());
        store.set("greta", json!({ "hunger": 3 })).unwrap();
        assert_eq!(store.get("greta").unwrap(), Some(json!({ "hunger": 3 })));
        store.set("greta", json!({ "hunger": 4 })).unwrap();
        assert_eq!(store.get("greta").unwrap(), Some(json!({ "hunger": 4 })));
        assert!(store.get("anton").unwrap().is_none());
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vtm.json");
        let store = JsonFileStore::open(&path).unwrap();
        assert!(store.get("greta").unwrap().is_none());
        assert_eq!(store.settings(), &SheetSettings::default());
        assert!(!path.exists());
    }

    #[test]
    fn writes_persist_across_opens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vtm.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("greta", json!({ "hunger": 4 })).unwrap();
        store
            .set_settings(SheetSettings::default().with_auto_save(false))
            .unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("greta").unwrap(), Some(json!({ "hunger": 4 })));
        assert!(!reopened.settings().auto_save);
    }

    #[test]
    fn file_layout_keeps_settings_at_top_level() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vtm.json");
        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("greta", json!({ "hunger": 1 })).unwrap();

        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["autoSave"], true);
        assert_eq!(raw["defaultDifficulty"], 2);
        assert_eq!(raw["characterData"]["greta"]["hunger"], 1);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vtm.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            JsonFileStore::open(&path),
            Err(SessionError::Format(_))
        ));
    }
}
