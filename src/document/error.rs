//! Document fetch and validation errors.

use thiserror::Error;

/// Errors that can occur while fetching or validating the document.
///
/// Every variant names the source it came from so a log line is enough to
/// tell which upstream misbehaved.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Remote fetch did not complete within the configured timeout.
    #[error("fetching {source_desc} timed out after {timeout_secs} seconds")]
    FetchTimeout { source_desc: String, timeout_secs: u64 },

    /// Connection or request could not be completed.
    #[error("transport error fetching {source_desc}: {reason}")]
    FetchTransportError { source_desc: String, reason: String },

    /// The response body could not be read in full.
    #[error("failed to read response body from {source_desc}: {reason}")]
    FetchReadError { source_desc: String, reason: String },

    /// Upstream answered with a non-success status (only when status checks are enabled).
    #[error("{source_desc} answered with status {status}")]
    FetchStatus { source_desc: String, status: u16 },

    /// Local file does not exist.
    #[error("document file {source_desc} not found")]
    FetchNotFound { source_desc: String },

    /// Any other filesystem error.
    #[error("failed to read {source_desc}: {error}")]
    FetchIo {
        source_desc: String,
        #[source]
        error: std::io::Error,
    },

    /// Fetched bytes are not well-formed JSON.
    #[error("document from {source_desc} is not valid JSON: {reason}")]
    InvalidDocument { source_desc: String, reason: String },
}

impl DocumentError {
    /// Short, stable label used for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DocumentError::FetchTimeout { .. } => "fetch_timeout",
            DocumentError::FetchTransportError { .. } => "fetch_transport",
            DocumentError::FetchReadError { .. } => "fetch_read",
            DocumentError::FetchStatus { .. } => "fetch_status",
            DocumentError::FetchNotFound { .. } => "fetch_not_found",
            DocumentError::FetchIo { .. } => "fetch_io",
            DocumentError::InvalidDocument { .. } => "invalid_document",
        }
    }
}

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;
