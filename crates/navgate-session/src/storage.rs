// ============================================================================
// Navgate Session - Key-Value Storage
// File: crates/navgate-session/src/storage.rs
// Description: Persistent key-value port with in-memory and JSON file backends
// ============================================================================

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use dashmap::DashMap;
use navgate_core::DomainError;
use parking_lot::Mutex;
use tracing::warn;

/// Raw string storage. TTL bookkeeping lives in
/// [`FreshnessCache`](crate::cache::FreshnessCache), not here.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError>;
    fn set(&self, key: &str, value: String) -> Result<(), DomainError>;
    fn remove(&self, key: &str) -> Result<(), DomainError>;
}

/// Thread-safe in-memory backend, the default for tests and single-process
/// deployments.
#[derive(Default)]
pub struct MemoryStore {
    map: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.map.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &str, value: String) -> Result<(), DomainError> {
        self.map.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DomainError> {
        self.map.remove(key);
        Ok(())
    }
}

/// File-backed store, one JSON object per file. Writers rewrite the whole
/// file; concurrent processes follow last-write-wins, acceptable for
/// advisory navigation data.
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading existing entries when the file is
    /// present. An unreadable file is discarded, not fatal.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Discarding unreadable store file {}: {}", path.display(), e);
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    fn flush(&self, entries: &HashMap<String, String>) -> Result<(), DomainError> {
        let raw = serde_json::to_string(entries)
            .map_err(|e| DomainError::SerializationError(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| DomainError::StorageError(e.to_string()))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), DomainError> {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), value);
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), DomainError> {
        let mut entries = self.entries.lock();
        if entries.remove(key).is_some() {
            return self.flush(&entries);
        }
        Ok(())
    }
}
