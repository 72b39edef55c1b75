//! Navigation guard consuming authorization decisions

use tracing::info;

use navgate_core::{AccessDecision, RouteAuthorizer};
use navgate_shared::constants::UNAUTHORIZED_ROUTE;

use crate::store::MenuState;

/// What the router should do with a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Proceed,
    Redirect(String),
    Wait,
}

/// Bridges [`RouteAuthorizer`] decisions to router actions: denial turns
/// into a redirect, deferral into a wait.
pub struct RouteGuard {
    authorizer: RouteAuthorizer,
    unauthorized_route: String,
}

impl RouteGuard {
    pub fn new(authorizer: RouteAuthorizer, unauthorized_route: impl Into<String>) -> Self {
        Self {
            authorizer,
            unauthorized_route: unauthorized_route.into(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(RouteAuthorizer::with_defaults(), UNAUTHORIZED_ROUTE)
    }

    pub fn check(&self, path: &str, state: &MenuState) -> GuardOutcome {
        match self.authorizer.decide(path, &state.tree, state.loading) {
            AccessDecision::Deferred => GuardOutcome::Wait,
            AccessDecision::Granted => GuardOutcome::Proceed,
            AccessDecision::Denied => {
                info!(
                    "Access denied for {}, redirecting to {}",
                    path, self.unauthorized_route
                );
                GuardOutcome::Redirect(self.unauthorized_route.clone())
            }
        }
    }
}
