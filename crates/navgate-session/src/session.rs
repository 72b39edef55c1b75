// ============================================================================
// Navgate Session - Session Access
// File: crates/navgate-session/src/session.rs
// Description: Current-session port supplying role and login presence
// ============================================================================

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use navgate_shared::types::RoleCode;

/// Identity of the logged-in user as far as navigation cares: a role for
/// menu scoping and a presence marker.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub session_id: Uuid,
    pub role_code: RoleCode,
    pub display_name: String,
    pub logged_in_at: DateTime<Utc>,
}

pub trait SessionProvider: Send + Sync {
    /// `None` means nobody is logged in.
    fn current(&self) -> Option<SessionInfo>;
}

/// Single-slot session holder for embedded use and tests.
#[derive(Default)]
pub struct InMemorySession {
    slot: RwLock<Option<SessionInfo>>,
}

impl InMemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(
        &self,
        role_code: impl Into<RoleCode>,
        display_name: impl Into<String>,
    ) -> SessionInfo {
        let info = SessionInfo {
            session_id: Uuid::new_v4(),
            role_code: role_code.into(),
            display_name: display_name.into(),
            logged_in_at: Utc::now(),
        };
        *self.slot.write() = Some(info.clone());
        info
    }

    pub fn logout(&self) {
        *self.slot.write() = None;
    }
}

impl SessionProvider for InMemorySession {
    fn current(&self) -> Option<SessionInfo> {
        self.slot.read().clone()
    }
}
