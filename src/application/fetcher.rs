// Snapshot fetcher - fixed-cadence poll of the facility backend
use crate::application::gateway::DashboardGateway;
use crate::application::view_model::ViewModelStore;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, MissedTickBehavior};

pub const POLL_PERIOD: Duration = Duration::from_millis(1000);

pub struct SnapshotFetcher {
    gateway: Arc<dyn DashboardGateway>,
    store: ViewModelStore,
    period: Duration,
}

impl SnapshotFetcher {
    pub fn new(gateway: Arc<dyn DashboardGateway>, store: ViewModelStore) -> Self {
        Self::with_period(gateway, store, POLL_PERIOD)
    }

    pub fn with_period(
        gateway: Arc<dyn DashboardGateway>,
        store: ViewModelStore,
        period: Duration,
    ) -> Self {
        Self {
            gateway,
            store,
            period,
        }
    }

    /// Run the polling loop until the returned handle is aborted.
    ///
    /// The first fetch fires immediately; after that one request per period.
    /// A request that overruns its period absorbs the missed ticks (skip, not
    /// catch-up), so slow responses never pile up concurrent requests. A
    /// failed fetch keeps the previous snapshot and never stops the loop.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                match self.gateway.fetch_dashboard().await {
                    Ok(snapshot) => {
                        tracing::debug!(
                            "dashboard snapshot: {} nodes, {} events",
                            snapshot.graph.nodes.len(),
                            snapshot.events.len()
                        );
                        self.store.replace(snapshot);
                    }
                    Err(e) => {
                        // Stale-but-valid beats blank: the store keeps the
                        // last good snapshot and the next tick retries.
                        tracing::warn!("dashboard fetch failed: {:#}", e);
                    }
                }
            }
        })
    }
}
