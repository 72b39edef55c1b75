// ============================================================================
// Navgate Core - Menu Node & Group Entities
// File: crates/navgate-core/src/domain/menu_node.rs
// Description: Hierarchical projections of menu records after forest build
// ============================================================================

use navgate_shared::constants::NON_NAVIGABLE_ROUTE;
use navgate_shared::types::MenuCode;
use serde::{Deserialize, Serialize};

use super::menu_record::{MenuRecord, MenuTier};

/// Node of the built menu forest. `children` is always present (possibly
/// empty) and `notif_count` is set only when a count overlay matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuNode {
    pub code: MenuCode,
    pub label: String,
    pub route: String,
    #[serde(default)]
    pub icon_key: String,
    pub order: String,
    #[serde(default)]
    pub tier: MenuTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notif_count: Option<i64>,
    #[serde(default)]
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    pub fn from_record(record: &MenuRecord) -> Self {
        Self {
            code: record.code.clone(),
            label: record.label.clone(),
            route: record.route.clone(),
            icon_key: record.icon_key.clone(),
            order: record.order.clone(),
            tier: record.tier,
            notif_count: None,
            children: Vec::new(),
        }
    }

    pub fn is_navigable(&self) -> bool {
        self.route != NON_NAVIGABLE_ROUTE
    }
}

/// Public projection of a root-tier node: the group label plus its items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuGroup {
    pub name: String,
    pub menu_items: Vec<MenuNode>,
}
