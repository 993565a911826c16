use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::foundation::error::{FolioError, FolioResult};

/// Synchronous string key-value persistence.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> FolioResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> FolioResult<()>;
}

/// In-process store. Clones share the same map, so a caller can keep a clone to inspect what a
/// boxed copy wrote.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.insert(key, value);
        store
    }

    pub fn insert(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> FolioResult<Option<String>> {
        Ok(self.value(key))
    }

    fn set(&mut self, key: &str, value: &str) -> FolioResult<()> {
        self.insert(key, value);
        Ok(())
    }
}

/// Flat JSON object on disk, rewritten in full on every `set`.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File contents, or `None` when the file is missing or blank.
    fn read(&self) -> FolioResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(None),
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FolioError::persistence(format!(
                "read store '{}': {e}",
                self.path.display()
            ))),
        }
    }

    fn load(&self) -> FolioResult<BTreeMap<String, String>> {
        let Some(text) = self.read()? else {
            return Ok(BTreeMap::new());
        };
        serde_json::from_str(&text).map_err(|e| {
            FolioError::persistence(format!("parse store '{}': {e}", self.path.display()))
        })
    }

    /// Entries to rewrite on `set`. Unparseable contents are not fatal: string entries of a JSON
    /// object are kept, everything else is dropped with a warning.
    fn load_for_update(&self) -> FolioResult<BTreeMap<String, String>> {
        let Some(text) = self.read()? else {
            return Ok(BTreeMap::new());
        };
        if let Ok(entries) = serde_json::from_str(&text) {
            return Ok(entries);
        }

        let salvaged: BTreeMap<String, String> = match serde_json::from_str(&text) {
            Ok(serde_json::Value::Object(map)) => map
                .into_iter()
                .filter_map(|(k, v)| match v {
                    serde_json::Value::String(s) => Some((k, s)),
                    _ => None,
                })
                .collect(),
            _ => BTreeMap::new(),
        };
        tracing::warn!(
            path = %self.path.display(),
            kept = salvaged.len(),
            "store contents unreadable, rewriting"
        );
        Ok(salvaged)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> FolioResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> FolioResult<()> {
        let mut entries = self.load_for_update()?;
        entries.insert(key.to_owned(), value.to_owned());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                FolioError::persistence(format!("create '{}': {e}", parent.display()))
            })?;
        }
        let json = serde_json::to_string_pretty(&entries)
            .map_err(|e| FolioError::persistence(format!("encode store: {e}")))?;

        // Sibling temp file plus rename; an interrupted write leaves the previous store intact.
        let tmp = self.temp_path();
        std::fs::write(&tmp, json + "\n").map_err(|e| {
            FolioError::persistence(format!("write store '{}': {e}", tmp.display()))
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            std::fs::remove_file(&tmp).ok();
            FolioError::persistence(format!(
                "move store into place '{}': {e}",
                self.path.display()
            ))
        })
    }
}
