//! Background synchronization subsystem.
//!
//! # Data Flow
//! ```text
//! Local source (watcher.rs):
//!     notify event on parent dir
//!     → filter: write / rename / create of the document file
//!     → mpsc channel → debounce.rs (re-arm 500ms deadline per event)
//!     → DocumentStore::refresh()
//!
//! Remote source (poller.rs):
//!     fixed interval tick
//!     → DocumentStore::refresh()
//! ```
//!
//! # Design Decisions
//! - Exactly one loop per process, chosen from the source kind at startup
//! - Refresh failures are logged and swallowed; the loop keeps going
//! - Both loops stop on the shared shutdown signal

pub mod debounce;
pub mod poller;
pub mod watcher;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::document::{DocumentSource, DocumentStore};

pub use poller::RemotePoller;
pub use watcher::LocalWatcher;

/// Which background loop keeps a source fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Filesystem watch with debounce.
    Watch,
    /// Fixed-interval polling.
    Poll,
}

impl SyncMode {
    pub fn for_source(source: &DocumentSource) -> Self {
        if source.is_remote() {
            SyncMode::Poll
        } else {
            SyncMode::Watch
        }
    }
}

/// Spawn the loop matching the store's source.
///
/// `debounce` only applies to local sources; remote sources use the source's
/// poll interval.
pub fn spawn(store: Arc<DocumentStore>, debounce: Duration, shutdown: broadcast::Receiver<()>) -> JoinHandle<()> {
    let mode = SyncMode::for_source(store.source());
    tracing::info!(source = %store.source(), mode = ?mode, "Starting document sync");

    match mode {
        SyncMode::Poll => {
            let interval = store.source().poll_interval();
            let poller = RemotePoller::new(store, interval);
            tokio::spawn(poller.run(shutdown))
        }
        SyncMode::Watch => {
            let source = store.source().to_string();
            let watcher = LocalWatcher::new(store, debounce);
            tokio::spawn(async move {
                if let Err(e) = watcher.run(shutdown).await {
                    tracing::error!(source = %source, error = %e, "Document watcher failed, live reload disabled");
                }
            })
        }
    }
}

/// Refresh the store, logging instead of propagating failures.
pub(crate) async fn reload_logged(store: &DocumentStore, trigger: &'static str) {
    match store.refresh().await {
        Ok(document) => tracing::info!(
            source = %store.source(),
            trigger,
            revision = document.revision(),
            size = document.bytes().len(),
            "Document reloaded"
        ),
        Err(e) => tracing::warn!(
            source = %store.source(),
            trigger,
            error = %e,
            kind = e.kind(),
            "Document reload failed, keeping previous document"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Fetcher;
    use crate::lifecycle::Shutdown;

    #[test]
    fn test_mode_follows_source_kind() {
        let interval = Duration::from_secs(30);
        assert_eq!(
            SyncMode::for_source(&DocumentSource::classify("https://example.com/spec.json", interval)),
            SyncMode::Poll
        );
        assert_eq!(
            SyncMode::for_source(&DocumentSource::classify("./swagger.json", interval)),
            SyncMode::Watch
        );
    }

    #[tokio::test]
    async fn test_spawn_runs_the_loop_for_the_source_kind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swagger.json");
        std::fs::write(&path, br#"{"v":1}"#).unwrap();

        let source = DocumentSource::classify(path.to_str().unwrap(), Duration::from_secs(3600));
        let fetcher = Fetcher::new(Duration::from_secs(5), false).unwrap();
        let store = Arc::new(DocumentStore::load(source, fetcher).await.unwrap());

        let shutdown = Shutdown::new();
        let task = spawn(Arc::clone(&store), Duration::from_millis(50), shutdown.subscribe());

        // A poller with a one hour interval would never pick this up.
        tokio::time::sleep(Duration::from_millis(200)).await;
        std::fs::write(&path, br#"{"v":2}"#).unwrap();
        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        while store.revision() < 2 && tokio::time::Instant::now() < deadline {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert_eq!(&store.bytes()[..], br#"{"v":2}"#);

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(2), task).await.unwrap().unwrap();
    }
}
