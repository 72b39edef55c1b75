// ============================================================================
// Navgate Session - Refresh Scheduler
// File: crates/navgate-session/src/scheduler.rs
// Description: Periodic and event-driven notification refresh loop
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::events::NavEvent;
use crate::mapping::NotificationMappingService;
use crate::store::MenuStore;

/// Drives `NotificationMappingService::refresh` followed by the store
/// overlay, on a fixed interval and on session activation events. The timer
/// runs for the lifetime of the session runtime, it is not re-armed per
/// navigation.
pub struct RefreshScheduler {
    store: Arc<MenuStore>,
    mapping_service: Arc<NotificationMappingService>,
    interval: Duration,
}

/// Controls a spawned scheduler. Dropping the handle also winds the loop
/// down once the current iteration finishes.
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stop ticking. A refresh already in flight completes, nothing is
    /// aborted.
    pub fn stop(&self) {
        let _ = self.shutdown.send(true);
    }

    /// Wait until the loop has exited.
    pub async fn stopped(self) {
        let _ = self.join.await;
    }
}

impl RefreshScheduler {
    pub fn new(
        store: Arc<MenuStore>,
        mapping_service: Arc<NotificationMappingService>,
        interval: Duration,
    ) -> Self {
        Self {
            store,
            mapping_service,
            interval,
        }
    }

    pub fn spawn(self: Arc<Self>, events: broadcast::Receiver<NavEvent>) -> SchedulerHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let join = tokio::spawn(self.run(events, shutdown_rx));
        SchedulerHandle {
            shutdown: shutdown_tx,
            join,
        }
    }

    async fn run(
        self: Arc<Self>,
        mut events: broadcast::Receiver<NavEvent>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately; init already loaded everything
        ticker.tick().await;
        info!("Refresh scheduler started, interval {:?}", self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    debug!("Scheduled notification refresh");
                    self.refresh_once().await;
                }
                event = events.recv() => match event {
                    Ok(event) => {
                        debug!("Activation event {:?}, refreshing notifications", event);
                        self.refresh_once().await;
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Event stream lagged, {} events dropped", skipped);
                    }
                    Err(RecvError::Closed) => {
                        info!("Event bus closed, refresh scheduler exiting");
                        break;
                    }
                },
                _ = shutdown.changed() => {
                    info!("Refresh scheduler stopping");
                    break;
                }
            }
        }
    }

    async fn refresh_once(&self) {
        let mapping = self.mapping_service.refresh().await;
        self.store.apply_mapping(mapping);
    }
}
