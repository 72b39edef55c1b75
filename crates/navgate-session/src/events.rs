//! Broadcast bus for session activation events

use tokio::sync::broadcast;
use tracing::warn;

/// Transitions that opportunistically re-trigger a notification refresh:
/// the two visibility transitions plus a server-side counts-changed push.
/// Routine UI churn is not an event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    TabVisible,
    WindowFocused,
    CountsChanged,
}

pub struct EventBus {
    tx: broadcast::Sender<NavEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn publish(&self, event: NavEvent) {
        if let Err(e) = self.tx.send(event) {
            warn!("Dropping {:?}, no active subscribers: {}", event, e);
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NavEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(16)
    }
}
