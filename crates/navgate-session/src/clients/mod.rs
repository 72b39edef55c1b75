//! Outbound API ports for menu permissions and notification counts

use std::collections::HashMap;

use async_trait::async_trait;

use navgate_core::{DomainError, MenuRecord};
use navgate_shared::types::MenuCode;

pub mod http;

pub use http::{HttpMenuPermissionApi, HttpNotificationCountApi};

/// Role-scoped flat menu record listing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuPermissionApi: Send + Sync {
    async fn fetch_menu_records(&self, role: &str) -> Result<Vec<MenuRecord>, DomainError>;
}

/// Code to unread-count mapping for the whole session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationCountApi: Send + Sync {
    async fn fetch_counts(&self) -> Result<HashMap<MenuCode, i64>, DomainError>;
}
