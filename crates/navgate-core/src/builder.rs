//! Forest construction and notification overlay
//!
//! Builds the hierarchical menu forest out of the flat record list and
//! re-applies notification counts onto an existing forest without
//! rebuilding it. Both functions are pure and never fail; malformed
//! records degrade to partial forests.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::{MenuGroup, MenuNode, MenuRecord, NotifMapping};

/// Build the three-tier menu forest: group -> item -> child.
///
/// Records whose `parent_code` is neither the root sentinel nor an
/// existing code are orphans and are dropped. Every child list is sorted
/// ascending by parsed `order`, non-numeric orders last, input order as
/// tie-break. Depth below the child tier is not represented.
pub fn build(records: &[MenuRecord], mapping: &NotifMapping) -> Vec<MenuGroup> {
    // Pass 1: code lookup for orphan detection
    let known: HashSet<&str> = records.iter().map(|r| r.code.as_str()).collect();

    // Pass 2: register roots, bucket children under their parent
    let mut roots: Vec<&MenuRecord> = Vec::new();
    let mut children_of: HashMap<&str, Vec<&MenuRecord>> = HashMap::new();
    for record in records {
        if record.is_root() {
            roots.push(record);
        } else if known.contains(record.parent_code.as_str()) {
            children_of
                .entry(record.parent_code.as_str())
                .or_default()
                .push(record);
        } else {
            debug!(
                "Dropping orphan menu record {} (parent {} not found)",
                record.code, record.parent_code
            );
        }
    }

    sort_by_order(&mut roots);

    roots
        .iter()
        .map(|root| MenuGroup {
            name: root.label.clone(),
            menu_items: project_items(root, &children_of, mapping),
        })
        .collect()
}

fn project_items(
    root: &MenuRecord,
    children_of: &HashMap<&str, Vec<&MenuRecord>>,
    mapping: &NotifMapping,
) -> Vec<MenuNode> {
    let mut items = children_of.get(root.code.as_str()).cloned().unwrap_or_default();
    sort_by_order(&mut items);

    items
        .iter()
        .map(|item| {
            let mut node = MenuNode::from_record(item);
            node.notif_count = mapping.count_for(&item.code);

            let mut subs = children_of.get(item.code.as_str()).cloned().unwrap_or_default();
            sort_by_order(&mut subs);
            node.children = subs
                .iter()
                .map(|sub| {
                    let mut child = MenuNode::from_record(sub);
                    child.notif_count = mapping.count_for(&sub.code);
                    child
                })
                .collect();

            node
        })
        .collect()
}

/// Recompute every item/child `notif_count` from a new mapping. Structure,
/// identity, and ordering are untouched; codes absent from the mapping end
/// up with no count.
pub fn apply_mapping(groups: &[MenuGroup], mapping: &NotifMapping) -> Vec<MenuGroup> {
    groups
        .iter()
        .map(|group| MenuGroup {
            name: group.name.clone(),
            menu_items: group
                .menu_items
                .iter()
                .map(|item| overlay_node(item, mapping))
                .collect(),
        })
        .collect()
}

fn overlay_node(node: &MenuNode, mapping: &NotifMapping) -> MenuNode {
    let mut updated = node.clone();
    updated.notif_count = mapping.count_for(&node.code);
    updated.children = node
        .children
        .iter()
        .map(|child| overlay_node(child, mapping))
        .collect();
    updated
}

// Stable sort keeps the input order for equal and non-numeric keys
fn sort_by_order(records: &mut [&MenuRecord]) {
    records.sort_by_key(|r| match r.parsed_order() {
        Some(n) => (false, n),
        None => (true, 0),
    });
}
