// ============================================================================
// Navgate Core - Route Authorizer
// File: crates/navgate-core/src/authorizer.rs
// Description: Decides whether a requested path is covered by the menu forest
// ============================================================================

use navgate_shared::constants::ENTRY_ROUTE_ALLOWLIST;

use crate::domain::MenuGroup;

/// Outcome of an authorization check.
///
/// `Deferred` means the forest has not finished loading and no decision
/// may be made yet. It is neither a grant nor a denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Deferred,
    Granted,
    Denied,
}

/// Flattens the current forest into candidate routes and matches a requested
/// path against them. Advisory only, the backend enforces real authorization.
pub struct RouteAuthorizer {
    entry_allowlist: Vec<String>,
}

impl RouteAuthorizer {
    pub fn new(entry_allowlist: Vec<String>) -> Self {
        Self { entry_allowlist }
    }

    /// Authorizer with the built-in entry allowlist.
    pub fn with_defaults() -> Self {
        Self::new(
            ENTRY_ROUTE_ALLOWLIST
                .iter()
                .map(|route| route.to_string())
                .collect(),
        )
    }

    /// Decide access for `path` against the forest.
    ///
    /// While `loading` is true every path is deferred. Entry allowlist paths
    /// are granted regardless of forest contents. Everything else must match
    /// a navigable route exactly or live under it as a sub-path; a loaded
    /// empty forest therefore denies everything outside the allowlist.
    pub fn decide(&self, path: &str, tree: &[MenuGroup], loading: bool) -> AccessDecision {
        if loading {
            return AccessDecision::Deferred;
        }

        if self.entry_allowlist.iter().any(|entry| entry == path) {
            return AccessDecision::Granted;
        }

        let authorized = self
            .granted_routes(tree)
            .iter()
            .any(|route| route_matches(route, path));

        if authorized {
            AccessDecision::Granted
        } else {
            AccessDecision::Denied
        }
    }

    fn granted_routes<'a>(&self, tree: &'a [MenuGroup]) -> Vec<&'a str> {
        let mut routes = Vec::new();
        for group in tree {
            for item in &group.menu_items {
                if item.is_navigable() {
                    routes.push(item.route.as_str());
                }
                for child in &item.children {
                    if child.is_navigable() {
                        routes.push(child.route.as_str());
                    }
                }
            }
        }
        routes
    }
}

// Exact match, or a sub-path one separator below the candidate:
// "/documents" covers "/documents/123" but never "/documentsx"
fn route_matches(candidate: &str, path: &str) -> bool {
    if path == candidate {
        return true;
    }
    path.strip_prefix(candidate)
        .map(|rest| rest.starts_with('/'))
        .unwrap_or(false)
}
