// ============================================================================
// Navgate Session - Menu Store
// File: crates/navgate-session/src/store.rs
// Description: Session-scoped menu state with cache hydration and overlay
// ============================================================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use navgate_core::builder;
use navgate_core::{DomainError, MenuGroup, NotifMapping};
use navgate_shared::constants::NOTIF_MAPPING_CACHE_KEY;
use navgate_shared::types::RoleCode;

use crate::cache::FreshnessCache;
use crate::clients::MenuPermissionApi;
use crate::mapping::NotificationMappingService;
use crate::session::SessionProvider;

/// Everything the UI and the navigation guard read.
#[derive(Debug, Clone)]
pub struct MenuState {
    pub tree: Vec<MenuGroup>,
    pub loading: bool,
    pub error: Option<String>,
    pub mapping: NotifMapping,
    pub role: Option<RoleCode>,
}

impl Default for MenuState {
    // loading starts true so authorization defers until init resolves
    fn default() -> Self {
        Self {
            tree: Vec::new(),
            loading: true,
            error: None,
            mapping: NotifMapping::default(),
            role: None,
        }
    }
}

/// Owns the menu forest for the authenticated session: hydrates it from
/// cache or the permission API, overlays notification counts, and tears
/// everything down on logout.
pub struct MenuStore {
    session: Arc<dyn SessionProvider>,
    menu_api: Arc<dyn MenuPermissionApi>,
    mapping_service: Arc<NotificationMappingService>,
    cache: Arc<FreshnessCache>,
    tree_key_prefix: String,
    state: RwLock<MenuState>,
    init_in_flight: AtomicBool,
}

impl MenuStore {
    pub fn new(
        session: Arc<dyn SessionProvider>,
        menu_api: Arc<dyn MenuPermissionApi>,
        mapping_service: Arc<NotificationMappingService>,
        cache: Arc<FreshnessCache>,
        tree_key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            session,
            menu_api,
            mapping_service,
            cache,
            tree_key_prefix: tree_key_prefix.into(),
            state: RwLock::new(MenuState::default()),
            init_in_flight: AtomicBool::new(false),
        }
    }

    /// Load the menu forest for the current session.
    ///
    /// Duplicate concurrent calls are skipped, not queued. Failures land in
    /// `MenuState::error` with an empty tree, which keeps authorization
    /// fail-closed until an explicit re-trigger.
    pub async fn init(&self) {
        if self
            .init_in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Menu init already in flight, skipping duplicate call");
            return;
        }

        let result = self.init_inner().await;
        self.init_in_flight.store(false, Ordering::SeqCst);

        if let Err(e) = result {
            warn!("Menu initialization failed: {}", e);
            let mut state = self.state.write();
            state.tree.clear();
            state.error = Some(e.to_string());
            state.loading = false;
        }
    }

    async fn init_inner(&self) -> Result<(), DomainError> {
        let session = self.session.current().ok_or(DomainError::MissingRole)?;
        let role = session.role_code;
        info!("Initializing menu state for role {}", role);

        {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
            state.role = Some(role.clone());
        }

        // A usable mapping first, the tree overlay depends on it
        let mapping_is_empty = self.state.read().mapping.is_empty();
        let mapping = if mapping_is_empty {
            self.mapping_service.refresh().await
        } else {
            self.state.read().mapping.clone()
        };

        let key = self.tree_key(&role);
        let tree = match self.cache.get_unchecked::<Vec<MenuGroup>>(&key) {
            Some(cached) => {
                debug!("Hydrating menu tree for role {} from cache", role);
                cached
            }
            None => {
                let records = self.menu_api.fetch_menu_records(&role).await?;
                debug!("Building menu tree from {} records", records.len());
                let tree = builder::build(&records, &mapping);
                if let Err(e) = self.cache.set(&key, &tree) {
                    warn!("Failed to persist menu tree for role {}: {}", role, e);
                }
                tree
            }
        };

        let mut state = self.state.write();
        state.tree = tree;
        state.mapping = mapping;
        state.loading = false;
        info!("Menu state ready for role {}", role);
        Ok(())
    }

    /// Overlay `new_mapping` onto the current tree and persist the result.
    /// The forest structure is never rebuilt here, only counts change.
    pub fn apply_mapping(&self, new_mapping: NotifMapping) {
        let mut state = self.state.write();
        let role = match state.role.clone() {
            Some(role) => role,
            None => {
                warn!("Skipping mapping overlay, no active role");
                return;
            }
        };

        let updated = builder::apply_mapping(&state.tree, &new_mapping);
        state.tree = updated.clone();
        state.mapping = new_mapping;
        drop(state);

        let key = self.tree_key(&role);
        if let Err(e) = self.cache.set(&key, &updated) {
            warn!("Failed to persist menu tree for role {}: {}", role, e);
        }
    }

    /// Reset in-memory state and drop both cache entries. Invoked on logout.
    pub fn clear(&self) {
        let role = self.state.read().role.clone();
        if let Some(role) = &role {
            self.cache.remove(&self.tree_key(role));
        }
        self.cache.remove(NOTIF_MAPPING_CACHE_KEY);
        *self.state.write() = MenuState::default();
        info!("Menu state cleared");
    }

    pub fn snapshot(&self) -> MenuState {
        self.state.read().clone()
    }

    fn tree_key(&self, role: &str) -> String {
        format!("{}{}", self.tree_key_prefix, role)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use mockall::predicate;

    use navgate_core::{MenuRecord, MenuTier};
    use navgate_shared::constants::TREE_CACHE_KEY_PREFIX;

    use super::*;
    use crate::clients::{MockMenuPermissionApi, MockNotificationCountApi};
    use crate::clock::testing::ManualClock;
    use crate::clock::Clock;
    use crate::session::InMemorySession;
    use crate::storage::MemoryStore;

    const TTL: Duration = Duration::from_secs(300);

    fn record(code: &str, parent: &str, label: &str, route: &str, order: &str) -> MenuRecord {
        MenuRecord {
            code: code.to_string(),
            parent_code: parent.to_string(),
            label: label.to_string(),
            route: route.to_string(),
            icon_key: String::new(),
            order: order.to_string(),
            tier: MenuTier::Free,
        }
    }

    fn admin_records() -> Vec<MenuRecord> {
        vec![
            record("01", "00", "Main", "#", "1"),
            record("0101", "01", "Dashboard", "/dashboard", "1"),
        ]
    }

    fn counts(entries: &[(&str, i64)]) -> HashMap<String, i64> {
        entries
            .iter()
            .map(|(code, count)| (code.to_string(), *count))
            .collect()
    }

    struct Harness {
        session: Arc<InMemorySession>,
        cache: Arc<FreshnessCache>,
        clock: Arc<ManualClock>,
        store: MenuStore,
    }

    fn harness(menu_api: MockMenuPermissionApi, count_api: MockNotificationCountApi) -> Harness {
        let session = Arc::new(InMemorySession::new());
        let clock = Arc::new(ManualClock::at(1_000));
        let cache = Arc::new(FreshnessCache::new(Arc::new(MemoryStore::new()), clock.clone()));
        let mapping_service = Arc::new(NotificationMappingService::new(
            Arc::new(count_api),
            cache.clone(),
            clock.clone(),
            TTL,
        ));
        let store = MenuStore::new(
            session.clone(),
            Arc::new(menu_api),
            mapping_service,
            cache.clone(),
            TREE_CACHE_KEY_PREFIX,
        );
        Harness {
            session,
            cache,
            clock,
            store,
        }
    }

    #[tokio::test]
    async fn test_init_builds_overlays_and_persists() {
        let mut menu_api = MockMenuPermissionApi::new();
        menu_api
            .expect_fetch_menu_records()
            .with(predicate::eq("ADM"))
            .times(1)
            .returning(|_| Ok(admin_records()));
        let mut count_api = MockNotificationCountApi::new();
        count_api
            .expect_fetch_counts()
            .times(1)
            .returning(|| Ok(counts(&[("0101", 3)])));

        let h = harness(menu_api, count_api);
        h.session.login("ADM", "Administrator");
        h.store.init().await;

        let state = h.store.snapshot();
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(state.role.as_deref(), Some("ADM"));
        assert_eq!(state.tree.len(), 1);
        assert_eq!(state.tree[0].menu_items[0].route, "/dashboard");
        assert_eq!(state.tree[0].menu_items[0].notif_count, Some(3));

        let persisted = h
            .cache
            .get_unchecked::<Vec<MenuGroup>>("navgate:menu-tree:ADM")
            .unwrap();
        assert_eq!(persisted, state.tree);
    }

    #[tokio::test]
    async fn test_init_hydrates_from_cache_without_record_fetch() {
        let mut menu_api = MockMenuPermissionApi::new();
        menu_api.expect_fetch_menu_records().never();
        let mut count_api = MockNotificationCountApi::new();
        count_api
            .expect_fetch_counts()
            .times(1)
            .returning(|| Ok(counts(&[])));

        let h = harness(menu_api, count_api);
        h.session.login("ADM", "Administrator");

        let seeded = builder::build(&admin_records(), &NotifMapping::default());
        h.cache.set("navgate:menu-tree:ADM", &seeded).unwrap();

        h.store.init().await;

        let state = h.store.snapshot();
        assert!(!state.loading);
        assert_eq!(state.tree, seeded);
    }

    #[tokio::test]
    async fn test_init_without_session_reports_missing_role() {
        let mut menu_api = MockMenuPermissionApi::new();
        menu_api.expect_fetch_menu_records().never();
        let mut count_api = MockNotificationCountApi::new();
        count_api.expect_fetch_counts().never();

        let h = harness(menu_api, count_api);
        h.store.init().await;

        let state = h.store.snapshot();
        assert!(!state.loading);
        assert!(state.tree.is_empty());
        assert_eq!(state.error, Some(DomainError::MissingRole.to_string()));
    }

    #[tokio::test]
    async fn test_init_fetch_failure_leaves_tree_empty_with_error() {
        let mut menu_api = MockMenuPermissionApi::new();
        menu_api
            .expect_fetch_menu_records()
            .times(1)
            .returning(|_| Err(DomainError::MenuFetchFailed("gateway timeout".to_string())));
        let mut count_api = MockNotificationCountApi::new();
        count_api
            .expect_fetch_counts()
            .times(1)
            .returning(|| Ok(counts(&[])));

        let h = harness(menu_api, count_api);
        h.session.login("ADM", "Administrator");
        h.store.init().await;

        let state = h.store.snapshot();
        assert!(!state.loading);
        assert!(state.tree.is_empty());
        assert!(state.error.unwrap().contains("gateway timeout"));
    }

    #[tokio::test]
    async fn test_duplicate_init_is_skipped() {
        use async_trait::async_trait;

        struct SlowMenuApi {
            calls: Arc<AtomicUsize>,
        }

        #[async_trait]
        impl MenuPermissionApi for SlowMenuApi {
            async fn fetch_menu_records(
                &self,
                _role: &str,
            ) -> Result<Vec<MenuRecord>, DomainError> {
                self.calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok(admin_records())
            }
        }

        let mut count_api = MockNotificationCountApi::new();
        count_api
            .expect_fetch_counts()
            .times(1)
            .returning(|| Ok(counts(&[])));

        let session = Arc::new(InMemorySession::new());
        session.login("ADM", "Administrator");
        let clock = Arc::new(ManualClock::at(0));
        let cache = Arc::new(FreshnessCache::new(Arc::new(MemoryStore::new()), clock.clone()));
        let mapping_service = Arc::new(NotificationMappingService::new(
            Arc::new(count_api),
            cache.clone(),
            clock.clone(),
            TTL,
        ));
        let calls = Arc::new(AtomicUsize::new(0));
        let store = MenuStore::new(
            session,
            Arc::new(SlowMenuApi { calls: calls.clone() }),
            mapping_service,
            cache,
            TREE_CACHE_KEY_PREFIX,
        );

        tokio::join!(store.init(), store.init());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!store.snapshot().tree.is_empty());
    }

    #[tokio::test]
    async fn test_apply_mapping_overlays_and_persists() {
        let mut menu_api = MockMenuPermissionApi::new();
        menu_api
            .expect_fetch_menu_records()
            .times(1)
            .returning(|_| Ok(admin_records()));
        let mut count_api = MockNotificationCountApi::new();
        count_api
            .expect_fetch_counts()
            .times(1)
            .returning(|| Ok(counts(&[("0101", 3)])));

        let h = harness(menu_api, count_api);
        h.session.login("ADM", "Administrator");
        h.store.init().await;

        let updated = NotifMapping::new(counts(&[("0101", 7)]), h.clock.now());
        h.store.apply_mapping(updated.clone());

        let state = h.store.snapshot();
        assert_eq!(state.tree[0].menu_items[0].notif_count, Some(7));
        assert_eq!(state.mapping, updated);

        let persisted = h
            .cache
            .get_unchecked::<Vec<MenuGroup>>("navgate:menu-tree:ADM")
            .unwrap();
        assert_eq!(persisted[0].menu_items[0].notif_count, Some(7));
    }

    #[tokio::test]
    async fn test_apply_mapping_without_role_is_skipped() {
        let mut menu_api = MockMenuPermissionApi::new();
        menu_api.expect_fetch_menu_records().never();
        let mut count_api = MockNotificationCountApi::new();
        count_api.expect_fetch_counts().never();

        let h = harness(menu_api, count_api);
        h.store
            .apply_mapping(NotifMapping::new(counts(&[("0101", 7)]), h.clock.now()));

        let state = h.store.snapshot();
        assert!(state.mapping.is_empty());
        assert!(state.tree.is_empty());
    }

    #[tokio::test]
    async fn test_clear_resets_state_and_cache() {
        let mut menu_api = MockMenuPermissionApi::new();
        menu_api
            .expect_fetch_menu_records()
            .times(1)
            .returning(|_| Ok(admin_records()));
        let mut count_api = MockNotificationCountApi::new();
        count_api
            .expect_fetch_counts()
            .times(1)
            .returning(|| Ok(counts(&[("0101", 3)])));

        let h = harness(menu_api, count_api);
        h.session.login("ADM", "Administrator");
        h.store.init().await;
        h.store.clear();

        let state = h.store.snapshot();
        assert!(state.loading);
        assert!(state.tree.is_empty());
        assert!(state.role.is_none());
        assert!(state.mapping.is_empty());
        assert!(h
            .cache
            .get_unchecked::<Vec<MenuGroup>>("navgate:menu-tree:ADM")
            .is_none());
        assert!(h
            .cache
            .get_unchecked::<NotifMapping>(NOTIF_MAPPING_CACHE_KEY)
            .is_none());
    }
}
