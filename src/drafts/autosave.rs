use log::debug;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::StoreInner;

/// Background task periodically refreshing the current draft.
///
/// The task is aborted when this guard is dropped, so a store going out of
/// scope never leaves a timer behind.
pub(crate) struct AutosaveTask {
    handle: JoinHandle<()>,
    interval: Duration,
}

impl AutosaveTask {
    /// Spawn the autosave loop. Must be called within a tokio runtime.
    pub(crate) fn spawn(inner: Arc<StoreInner>, interval: Duration) -> Self {
        let handle = tokio::spawn(async move {
            // First refresh happens one full interval after enabling
            let mut ticker = interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if inner.refresh_current().await {
                    debug!("Autosaved current draft in '{}'", inner.namespace);
                }
            }
        });

        Self { handle, interval }
    }

    pub(crate) fn interval(&self) -> Duration {
        self.interval
    }
}

impl Drop for AutosaveTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
