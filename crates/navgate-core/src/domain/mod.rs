//! # Navgate Core - Domain Module
//!
//! Domain entities for the navigation subsystem.

pub mod menu_node;
pub mod menu_record;
pub mod notif_mapping;

// Re-export all entities and enums
pub use menu_node::{MenuGroup, MenuNode};
pub use menu_record::{MenuRecord, MenuTier};
pub use notif_mapping::NotifMapping;
