//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (intervals and timeouts > 0, addresses parse)
//! - Detect conflicting serving paths
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MirrorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::MirrorConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `source.poll_interval_secs`.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &MirrorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }
    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::new("listener.request_timeout_secs", "must be greater than 0"));
    }

    if config.source.location.trim().is_empty() {
        errors.push(ValidationError::new("source.location", "must not be empty"));
    }
    if config.source.poll_interval_secs == 0 {
        errors.push(ValidationError::new("source.poll_interval_secs", "must be greater than 0"));
    }
    if config.source.fetch_timeout_secs == 0 {
        errors.push(ValidationError::new("source.fetch_timeout_secs", "must be greater than 0"));
    }
    if config.source.debounce_ms == 0 {
        errors.push(ValidationError::new("source.debounce_ms", "must be greater than 0"));
    }

    if !config.docs.document_path.starts_with('/') {
        errors.push(ValidationError::new("docs.document_path", "must start with '/'"));
    }
    if !config.docs.ui_path.starts_with('/') || config.docs.ui_path.len() < 2 {
        errors.push(ValidationError::new("docs.ui_path", "must start with '/' and not be the root"));
    }
    if has_route_syntax(&config.docs.document_path) {
        errors.push(ValidationError::new("docs.document_path", "must not contain '{', '}' or '*'"));
    }
    if has_route_syntax(&config.docs.ui_path) {
        errors.push(ValidationError::new("docs.ui_path", "must not contain '{', '}' or '*'"));
    }
    if config.docs.document_path.trim_end_matches('/') == config.docs.ui_path.trim_end_matches('/') {
        errors.push(ValidationError::new("docs.ui_path", "must differ from docs.document_path"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Captures and wildcards would be read as router patterns, not literal paths.
fn has_route_syntax(path: &str) -> bool {
    path.contains(['{', '}', '*'])
}
