//! Fetching raw document bytes from a local file or a remote URL.
//!
//! # Responsibilities
//! - Read local files in full
//! - Issue a single GET with a bounded timeout for remote sources
//! - Map every failure onto [`DocumentError`]
//!
//! # Design Decisions
//! - The response body is taken as-is; the status code is only enforced
//!   when `require_success_status` is set
//! - No retries here; the sync loops decide when to try again

use std::path::Path;
use std::time::Duration;

use bytes::Bytes;
use tokio::time::timeout;
use url::Url;

use crate::config::SourceConfig;
use crate::document::error::{DocumentError, DocumentResult};
use crate::document::source::{DocumentSource, SourceLocation};

/// Produces the latest raw bytes for a [`DocumentSource`].
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    timeout: Duration,
    require_success_status: bool,
}

impl Fetcher {
    /// Create a fetcher with the given remote timeout.
    pub fn new(fetch_timeout: Duration, require_success_status: bool) -> DocumentResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(fetch_timeout)
            .user_agent(concat!("swagger-mirror/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DocumentError::FetchTransportError {
                source_desc: "http client".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            timeout: fetch_timeout,
            require_success_status,
        })
    }

    /// Create a fetcher from the `[source]` config section.
    pub fn from_config(config: &SourceConfig) -> DocumentResult<Self> {
        Self::new(config.fetch_timeout(), config.require_success_status)
    }

    /// Fetch the current bytes of `source`.
    pub async fn fetch(&self, source: &DocumentSource) -> DocumentResult<Bytes> {
        match source.location() {
            SourceLocation::Local(path) => self.fetch_local(path).await,
            SourceLocation::Remote(url) => self.fetch_remote(url).await,
        }
    }

    async fn fetch_local(&self, path: &Path) -> DocumentResult<Bytes> {
        match tokio::fs::read(path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(DocumentError::FetchNotFound {
                source_desc: path.display().to_string(),
            }),
            Err(error) => Err(DocumentError::FetchIo {
                source_desc: path.display().to_string(),
                error,
            }),
        }
    }

    async fn fetch_remote(&self, url: &Url) -> DocumentResult<Bytes> {
        let source_desc = url.to_string();
        let timeout_secs = self.timeout.as_secs();
        let timed_out = || DocumentError::FetchTimeout {
            source_desc: source_desc.clone(),
            timeout_secs,
        };

        let response = match timeout(self.timeout, self.client.get(url.clone()).send()).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) if e.is_timeout() => return Err(timed_out()),
            Ok(Err(e)) => {
                return Err(DocumentError::FetchTransportError {
                    source_desc: source_desc.clone(),
                    reason: e.to_string(),
                })
            }
            Err(_) => return Err(timed_out()),
        };

        let status = response.status();
        if !status.is_success() {
            if self.require_success_status {
                return Err(DocumentError::FetchStatus {
                    source_desc: source_desc.clone(),
                    status: status.as_u16(),
                });
            }
            tracing::warn!(source = %source_desc, status = %status, "Upstream answered with non-success status, using body anyway");
        }

        match timeout(self.timeout, response.bytes()).await {
            Ok(Ok(body)) => Ok(body),
            Ok(Err(e)) if e.is_timeout() => Err(timed_out()),
            Ok(Err(e)) => Err(DocumentError::FetchReadError {
                source_desc: source_desc.clone(),
                reason: e.to_string(),
            }),
            Err(_) => Err(timed_out()),
        }
    }
}
