// ============================================================================
// Navgate Session - Notification Mapping Service
// File: crates/navgate-session/src/mapping.rs
// Description: TTL-deduplicated refresh of the code-to-count mapping
// ============================================================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use navgate_core::NotifMapping;
use navgate_shared::constants::NOTIF_MAPPING_CACHE_KEY;

use crate::cache::{CacheLookup, FreshnessCache};
use crate::clients::NotificationCountApi;
use crate::clock::Clock;

/// Fetches the notification mapping at most once per TTL window and keeps
/// the last good value around as a fallback.
///
/// `refresh` never fails: a fetch error falls back to the cached mapping
/// regardless of its age, and to a hardcoded default when nothing was ever
/// cached. The default is served, never persisted, so the next call still
/// attempts a real fetch.
pub struct NotificationMappingService {
    api: Arc<dyn NotificationCountApi>,
    cache: Arc<FreshnessCache>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    refresh_in_flight: AtomicBool,
}

impl NotificationMappingService {
    pub fn new(
        api: Arc<dyn NotificationCountApi>,
        cache: Arc<FreshnessCache>,
        clock: Arc<dyn Clock>,
        ttl: Duration,
    ) -> Self {
        Self {
            api,
            cache,
            clock,
            ttl,
            refresh_in_flight: AtomicBool::new(false),
        }
    }

    /// Currently-cached mapping without touching the network, stale or not.
    pub fn current(&self) -> NotifMapping {
        self.cached_or_fallback()
    }

    /// Return the freshest mapping available.
    ///
    /// Callers arriving while a fetch is in flight are skipped, not queued:
    /// they get the currently-cached value immediately.
    pub async fn refresh(&self) -> NotifMapping {
        if self
            .refresh_in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Mapping refresh already in flight, serving cached value");
            return self.cached_or_fallback();
        }

        let mapping = self.refresh_inner().await;
        self.refresh_in_flight.store(false, Ordering::SeqCst);
        mapping
    }

    async fn refresh_inner(&self) -> NotifMapping {
        let stale = match self
            .cache
            .get::<NotifMapping>(NOTIF_MAPPING_CACHE_KEY, self.ttl)
        {
            CacheLookup::Fresh(mapping) => {
                debug!("Notification mapping still fresh, skipping fetch");
                return mapping;
            }
            CacheLookup::Stale(mapping) => Some(mapping),
            CacheLookup::Missing => None,
        };

        match self.api.fetch_counts().await {
            Ok(counts) => {
                let mapping = NotifMapping::new(counts, self.clock.now());
                if let Err(e) = self.cache.set(NOTIF_MAPPING_CACHE_KEY, &mapping) {
                    warn!("Failed to persist notification mapping: {}", e);
                }
                info!(
                    "Refreshed notification mapping ({} codes)",
                    mapping.counts.len()
                );
                mapping
            }
            Err(e) => match stale {
                Some(mapping) => {
                    warn!("Count fetch failed, serving stale mapping: {}", e);
                    mapping
                }
                None => {
                    warn!("Count fetch failed with nothing cached, serving defaults: {}", e);
                    NotifMapping::fallback()
                }
            },
        }
    }

    fn cached_or_fallback(&self) -> NotifMapping {
        match self
            .cache
            .get::<NotifMapping>(NOTIF_MAPPING_CACHE_KEY, self.ttl)
        {
            CacheLookup::Fresh(mapping) | CacheLookup::Stale(mapping) => mapping,
            CacheLookup::Missing => NotifMapping::fallback(),
        }
    }
}
