// ============================================================================
// Navgate Core - Menu Record Entity
// File: crates/navgate-core/src/domain/menu_record.rs
// Description: Flat menu permission record as delivered by the menu API
// ============================================================================

use navgate_shared::constants::{NON_NAVIGABLE_ROUTE, ROOT_PARENT_CODE};
use navgate_shared::types::MenuCode;
use serde::{Deserialize, Serialize};

/// Subscription tier a menu entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuTier {
    #[default]
    Free,
    Pro,
}

/// Flat menu permission record (server origin)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuRecord {
    pub code: MenuCode,
    pub parent_code: MenuCode,
    pub label: String,
    pub route: String,
    #[serde(default)]
    pub icon_key: String,
    pub order: String,
    #[serde(default)]
    pub tier: MenuTier,
}

impl MenuRecord {
    pub fn is_root(&self) -> bool {
        self.parent_code == ROOT_PARENT_CODE
    }

    pub fn is_navigable(&self) -> bool {
        self.route != NON_NAVIGABLE_ROUTE
    }

    /// Numeric sort key; `None` when the server sent a non-numeric order.
    pub fn parsed_order(&self) -> Option<i64> {
        self.order.trim().parse::<i64>().ok()
    }
}
