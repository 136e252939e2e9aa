//! Remote document polling.
//!
//! # Responsibilities
//! - Refresh the document once per interval, forever
//! - Keep the same cadence after failures (no backoff, no jitter)

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::document::DocumentStore;
use crate::sync::reload_logged;

pub struct RemotePoller {
    store: Arc<DocumentStore>,
    interval: Duration,
}

impl RemotePoller {
    pub fn new(store: Arc<DocumentStore>, interval: Duration) -> Self {
        Self { store, interval }
    }

    pub async fn run(self, shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            source = %self.store.source(),
            interval_secs = self.interval.as_secs(),
            "Remote poller starting"
        );

        let store = self.store;
        poll(self.interval, shutdown, move || {
            let store = Arc::clone(&store);
            async move { reload_logged(&store, "poll").await }
        })
        .await;

        tracing::info!("Remote poller stopped");
    }
}

/// Run `action` every `interval`, starting one interval from now.
pub async fn poll<F, Fut>(interval: Duration, mut shutdown: broadcast::Receiver<()>, mut action: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    // The initial load already happened, so the first tick is a full interval out.
    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                action().await;
            }
            _ = shutdown.recv() => {
                tracing::debug!("Poller received shutdown signal, exiting loop");
                break;
            }
        }
    }
}
