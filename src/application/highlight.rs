// Highlight coordinator - time-bounded attention set with automatic decay
use crate::domain::highlight::HighlightSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};

pub const HIGHLIGHT_DECAY: Duration = Duration::from_millis(5000);

/// Two-state machine: Idle (empty set, no timer) and Active (non-empty set,
/// one pending expiry task). `activate` always cancels the previous timer
/// before arming a new one, so the newest activation wins and the countdown
/// restarts from the moment of the call.
#[derive(Clone)]
pub struct HighlightCoordinator {
    inner: Arc<Inner>,
}

struct Inner {
    state: watch::Sender<HighlightSet>,
    // Bumped on every transition; the expiry task only clears when the
    // epoch still matches the one it was spawned with.
    epoch: AtomicU64,
    pending: Mutex<Option<JoinHandle<()>>>,
    decay: Duration,
}

impl HighlightCoordinator {
    pub fn new() -> Self {
        Self::with_decay(HIGHLIGHT_DECAY)
    }

    pub fn with_decay(decay: Duration) -> Self {
        let (state, _rx) = watch::channel(HighlightSet::default());
        Self {
            inner: Arc::new(Inner {
                state,
                epoch: AtomicU64::new(0),
                pending: Mutex::new(None),
                decay,
            }),
        }
    }

    /// Idle -> Active (or Active -> Active with a fresh countdown).
    /// An empty id list is a no-op.
    pub fn activate(&self, ids: Vec<String>) {
        if ids.is_empty() {
            return;
        }

        let epoch = self.inner.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let expires_at = Instant::now() + self.inner.decay;
        self.inner
            .state
            .send_replace(HighlightSet::active(ids, expires_at));

        let inner = self.inner.clone();
        let expiry = tokio::spawn(async move {
            tokio::time::sleep_until(expires_at).await;
            // A newer activation (or clear) supersedes this countdown.
            if inner.epoch.load(Ordering::SeqCst) == epoch {
                inner.state.send_replace(HighlightSet::default());
            }
        });

        let mut pending = self.inner.pending.lock().unwrap();
        if let Some(previous) = pending.replace(expiry) {
            previous.abort();
        }
    }

    /// Manual Active -> Idle transition. Idempotent.
    pub fn clear(&self) {
        self.inner.epoch.fetch_add(1, Ordering::SeqCst);
        if let Some(pending) = self.inner.pending.lock().unwrap().take() {
            pending.abort();
        }
        if !self.inner.state.borrow().is_empty() {
            self.inner.state.send_replace(HighlightSet::default());
        }
    }

    pub fn current(&self) -> HighlightSet {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<HighlightSet> {
        self.inner.state.subscribe()
    }

    /// Teardown: drop the pending expiry task so no orphaned timer acts on
    /// stale state.
    pub fn shutdown(&self) {
        self.inner.epoch.fetch_add(1, Ordering::SeqCst);
        if let Some(pending) = self.inner.pending.lock().unwrap().take() {
            pending.abort();
        }
    }
}

impl Default for HighlightCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
