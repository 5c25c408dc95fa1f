// View model store - single source of truth for the current snapshot
use crate::domain::snapshot::DashboardSnapshot;
use std::sync::Arc;
use tokio::sync::watch;

/// Holds exactly one current `DashboardSnapshot`.
///
/// The fetcher is the only writer; presentation components read through
/// `current()` or react to changes through `subscribe()`. Replacement is
/// atomic: a reader sees the previous snapshot or the new one, never a
/// mixture of the two.
#[derive(Clone)]
pub struct ViewModelStore {
    tx: Arc<watch::Sender<DashboardSnapshot>>,
}

impl ViewModelStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(DashboardSnapshot::empty());
        Self { tx: Arc::new(tx) }
    }

    /// Full replacement of the current snapshot. Called only by the fetcher.
    pub fn replace(&self, snapshot: DashboardSnapshot) {
        self.tx.send_replace(snapshot);
    }

    pub fn current(&self) -> DashboardSnapshot {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardSnapshot> {
        self.tx.subscribe()
    }
}

impl Default for ViewModelStore {
    fn default() -> Self {
        Self::new()
    }
}
