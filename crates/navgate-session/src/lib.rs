//! # Navgate Session
//!
//! Stateful runtime around the navigation core: session access, the
//! freshness cache, outbound API clients, the menu store, the navigation
//! guard, and the periodic notification refresh loop.

pub mod cache;
pub mod clients;
pub mod clock;
pub mod events;
pub mod guard;
pub mod mapping;
pub mod scheduler;
pub mod session;
pub mod storage;
pub mod store;

// Re-export the runtime surface
pub use cache::{CacheEntry, CacheLookup, FreshnessCache};
pub use clients::{
    HttpMenuPermissionApi, HttpNotificationCountApi, MenuPermissionApi, NotificationCountApi,
};
pub use clock::{Clock, SystemClock};
pub use events::{EventBus, NavEvent};
pub use guard::{GuardOutcome, RouteGuard};
pub use mapping::NotificationMappingService;
pub use scheduler::{RefreshScheduler, SchedulerHandle};
pub use session::{InMemorySession, SessionInfo, SessionProvider};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use store::{MenuState, MenuStore};
