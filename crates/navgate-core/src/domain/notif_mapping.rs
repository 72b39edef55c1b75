//! Notification count mapping

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use navgate_shared::constants::FALLBACK_NOTIF_COUNTS;
use navgate_shared::types::MenuCode;
use serde::{Deserialize, Serialize};

/// Code-to-count mapping delivered by the notification endpoint, stamped
/// with the time it was fetched. `fetched_at` is `None` for the empty
/// initial mapping and for the hardcoded fallback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotifMapping {
    pub counts: HashMap<MenuCode, i64>,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl NotifMapping {
    pub fn new(counts: HashMap<MenuCode, i64>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            counts,
            fetched_at: Some(fetched_at),
        }
    }

    /// Last-resort mapping served when the endpoint fails and nothing is
    /// cached, see `FALLBACK_NOTIF_COUNTS`.
    pub fn fallback() -> Self {
        Self {
            counts: FALLBACK_NOTIF_COUNTS
                .iter()
                .map(|(code, count)| (code.to_string(), *count))
                .collect(),
            fetched_at: None,
        }
    }

    pub fn count_for(&self, code: &str) -> Option<i64> {
        self.counts.get(code).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty() && self.fetched_at.is_none()
    }
}
