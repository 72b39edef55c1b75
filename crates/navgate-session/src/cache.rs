// ============================================================================
// Navgate Session - Freshness Cache
// File: crates/navgate-session/src/cache.rs
// Description: TTL bookkeeping on top of the raw key-value store
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use navgate_core::DomainError;

use crate::clock::Clock;
use crate::storage::KeyValueStore;

/// Stored payload plus its write timestamp. The store itself has no TTL
/// support, freshness is derived from this stamp at read time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub value: T,
    pub stored_at_ms: i64,
}

/// Read outcome. A stale entry is reported, not deleted, so callers can
/// fall back to it explicitly.
#[derive(Debug, PartialEq)]
pub enum CacheLookup<T> {
    Fresh(T),
    Stale(T),
    Missing,
}

/// Timestamp-stamping wrapper around a [`KeyValueStore`]. Values are JSON
/// encoded; storage and decode failures degrade to a miss.
pub struct FreshnessCache {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl FreshnessCache {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Look up `key` under `ttl`. Fresh iff `now - stored_at < ttl`.
    pub fn get<T: DeserializeOwned>(&self, key: &str, ttl: Duration) -> CacheLookup<T> {
        let entry = match self.read_entry::<T>(key) {
            Some(entry) => entry,
            None => return CacheLookup::Missing,
        };

        let age_ms = self.clock.now().timestamp_millis() - entry.stored_at_ms;
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        if age_ms < ttl_ms {
            CacheLookup::Fresh(entry.value)
        } else {
            CacheLookup::Stale(entry.value)
        }
    }

    /// Presence-only lookup, the entry's age is ignored.
    pub fn get_unchecked<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.read_entry(key).map(|entry| entry.value)
    }

    /// Store `value` under `key`, stamped with the current time.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), DomainError> {
        let entry = CacheEntry {
            value,
            stored_at_ms: self.clock.now().timestamp_millis(),
        };
        let raw = serde_json::to_string(&entry)
            .map_err(|e| DomainError::SerializationError(e.to_string()))?;
        self.store.set(key, raw)
    }

    pub fn remove(&self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            warn!("Failed to remove cache entry {}: {}", key, e);
        }
    }

    fn read_entry<T: DeserializeOwned>(&self, key: &str) -> Option<CacheEntry<T>> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Cache read failed for {}: {}", key, e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Discarding undecodable cache entry {}: {}", key, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::testing::ManualClock;
    use crate::storage::MemoryStore;

    const TTL: Duration = Duration::from_secs(300);

    fn cache_at(start_ms: i64) -> (FreshnessCache, Arc<ManualClock>, Arc<MemoryStore>) {
        let clock = Arc::new(ManualClock::at(start_ms));
        let store = Arc::new(MemoryStore::new());
        let cache = FreshnessCache::new(store.clone(), clock.clone());
        (cache, clock, store)
    }

    #[test]
    fn test_fresh_within_ttl() {
        let (cache, clock, _) = cache_at(1_000);
        cache.set("k", &42u32).unwrap();

        clock.advance(4 * 60 * 1000);
        assert_eq!(cache.get::<u32>("k", TTL), CacheLookup::Fresh(42));
    }

    #[test]
    fn test_stale_after_ttl_still_readable() {
        let (cache, clock, _) = cache_at(1_000);
        cache.set("k", &42u32).unwrap();

        clock.advance(6 * 60 * 1000);
        assert_eq!(cache.get::<u32>("k", TTL), CacheLookup::Stale(42));
        // Stale entries are never deleted by a read
        assert_eq!(cache.get_unchecked::<u32>("k"), Some(42));
    }

    #[test]
    fn test_missing_key() {
        let (cache, _, _) = cache_at(0);
        assert_eq!(cache.get::<u32>("nope", TTL), CacheLookup::Missing);
        assert_eq!(cache.get_unchecked::<u32>("nope"), None);
    }

    #[test]
    fn test_undecodable_entry_degrades_to_miss() {
        let (cache, _, store) = cache_at(0);
        store.set("k", "{broken".to_string()).unwrap();
        assert_eq!(cache.get::<u32>("k", TTL), CacheLookup::Missing);
    }

    #[test]
    fn test_huge_ttl_never_goes_stale() {
        let (cache, clock, _) = cache_at(1_000);
        cache.set("k", &42u32).unwrap();

        clock.advance(6 * 60 * 1000);
        assert_eq!(
            cache.get::<u32>("k", Duration::MAX),
            CacheLookup::Fresh(42)
        );
    }

    #[test]
    fn test_get_unchecked_ignores_age() {
        let (cache, clock, _) = cache_at(0);
        cache.set("k", &"tree".to_string()).unwrap();

        clock.advance(100 * 24 * 60 * 60 * 1000);
        assert_eq!(cache.get_unchecked::<String>("k"), Some("tree".to_string()));
    }

    #[test]
    fn test_remove() {
        let (cache, _, _) = cache_at(0);
        cache.set("k", &1u8).unwrap();
        cache.remove("k");
        assert_eq!(cache.get::<u8>("k", TTL), CacheLookup::Missing);
    }
}
