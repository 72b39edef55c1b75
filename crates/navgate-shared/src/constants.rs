//! Subsystem-wide constants

/// Parent code marking a record as a top-level (group) entry.
pub const ROOT_PARENT_CODE: &str = "00";

/// Route value marking a menu entry as non-navigable (pure container).
pub const NON_NAVIGABLE_ROUTE: &str = "#";

/// Storage key prefix for the per-role menu tree; the role code is appended.
pub const TREE_CACHE_KEY_PREFIX: &str = "navgate:menu-tree:";

/// Storage key for the notification count mapping (not role-scoped).
pub const NOTIF_MAPPING_CACHE_KEY: &str = "navgate:notif-mapping";

/// Freshness window for the cached count mapping.
pub const DEFAULT_MAPPING_TTL_SECS: u64 = 300;

/// Period of the background count refresh.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 300;

/// Entry paths that are always authorized, independent of the menu tree.
pub const ENTRY_ROUTE_ALLOWLIST: &[&str] = &["/", "/home"];

/// Destination the route guard redirects to when a path is denied.
pub const UNAUTHORIZED_ROUTE: &str = "/unauthorized";

/// Fallback counts served when the count endpoint fails before any fetch
/// has succeeded. Keeps the badge slots of the inbox and approval modules
/// rendered (at zero) instead of dropping them entirely.
pub const FALLBACK_NOTIF_COUNTS: &[(&str, i64)] = &[("0301", 0), ("0302", 0)];
