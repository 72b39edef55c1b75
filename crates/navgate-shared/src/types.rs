//! Common types

/// Unique identifier of a menu record, server-assigned.
pub type MenuCode = String;

/// Role identifier the menu permission list is scoped by.
pub type RoleCode = String;
