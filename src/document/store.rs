//! The synchronized document store.
//!
//! Holds the last successfully fetched document and replaces it atomically
//! on refresh. Readers take a snapshot (`Arc<Document>`) without locking; a
//! refresh that fails at any stage leaves the snapshot untouched.

use std::sync::Arc;
use std::time::SystemTime;

use arc_swap::ArcSwap;
use bytes::Bytes;
use tokio::sync::Mutex;

use crate::document::error::{DocumentError, DocumentResult};
use crate::document::fetcher::Fetcher;
use crate::document::source::DocumentSource;
use crate::observability::metrics;

/// An immutable snapshot of the mirrored document.
#[derive(Debug, Clone)]
pub struct Document {
    bytes: Bytes,
    revision: u64,
    loaded_at: SystemTime,
}

impl Document {
    fn empty() -> Self {
        Self {
            bytes: Bytes::new(),
            revision: 0,
            loaded_at: SystemTime::UNIX_EPOCH,
        }
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Number of successful loads so far; 0 before the first one.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn loaded_at(&self) -> SystemTime {
        self.loaded_at
    }
}

/// Owns the current document and knows how to refresh it from its source.
pub struct DocumentStore {
    source: DocumentSource,
    fetcher: Fetcher,
    current: ArcSwap<Document>,
    /// Serializes refreshes so an older fetch never overwrites a newer one.
    refresh_lock: Mutex<()>,
}

impl DocumentStore {
    /// Create a store with no document loaded yet.
    pub fn new(source: DocumentSource, fetcher: Fetcher) -> Self {
        Self {
            source,
            fetcher,
            current: ArcSwap::from_pointee(Document::empty()),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Create a store and perform the initial load.
    ///
    /// Fails if the first refresh fails; the caller must not serve without a
    /// document.
    pub async fn load(source: DocumentSource, fetcher: Fetcher) -> DocumentResult<Self> {
        let store = Self::new(source, fetcher);
        let document = store.refresh().await?;
        tracing::info!(
            source = %store.source,
            kind = store.source.kind(),
            size = document.bytes.len(),
            "Initial document loaded"
        );
        Ok(store)
    }

    /// Fetch, validate and swap in a fresh copy of the document.
    pub async fn refresh(&self) -> DocumentResult<Arc<Document>> {
        let _guard = self.refresh_lock.lock().await;

        let result = self.fetch_valid().await;
        metrics::record_refresh(result.as_ref().err().map(DocumentError::kind));
        let bytes = result?;

        let revision = self.current.load().revision + 1;
        let document = Arc::new(Document {
            bytes,
            revision,
            loaded_at: SystemTime::now(),
        });
        self.current.store(Arc::clone(&document));
        metrics::record_document(document.bytes.len(), revision);

        tracing::debug!(
            source = %self.source,
            revision,
            size = document.bytes.len(),
            "Document refreshed"
        );
        Ok(document)
    }

    async fn fetch_valid(&self) -> DocumentResult<Bytes> {
        let bytes = self.fetcher.fetch(&self.source).await?;
        validate_json(&bytes).map_err(|e| DocumentError::InvalidDocument {
            source_desc: self.source.to_string(),
            reason: e.to_string(),
        })?;
        Ok(bytes)
    }

    /// Current snapshot.
    pub fn current(&self) -> Arc<Document> {
        self.current.load_full()
    }

    /// Current document bytes.
    pub fn bytes(&self) -> Bytes {
        self.current.load().bytes.clone()
    }

    pub fn revision(&self) -> u64 {
        self.current.load().revision
    }

    pub fn source(&self) -> &DocumentSource {
        &self.source
    }
}

fn validate_json(bytes: &[u8]) -> Result<(), serde_json::Error> {
    serde_json::from_slice::<serde::de::IgnoredAny>(bytes).map(|_| ())
}
