//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the mirror.
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the document mirror.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct MirrorConfig {
    /// Listener configuration (bind address, request timeout).
    pub listener: ListenerConfig,

    /// Where the document comes from and how it is kept fresh.
    pub source: SourceConfig,

    /// Serving paths for the document and the documentation UI.
    pub docs: DocsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8585").
    pub bind_address: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8585".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Document source configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    /// Local path or remote URL of the document.
    pub location: String,

    /// Remote polling interval in seconds.
    pub poll_interval_secs: u64,

    /// Remote fetch timeout in seconds.
    pub fetch_timeout_secs: u64,

    /// Quiet period after the last file event before reloading, in milliseconds.
    pub debounce_ms: u64,

    /// Reject remote responses with a non-2xx status instead of using their body.
    pub require_success_status: bool,
}

impl SourceConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: "./swagger.json".to_string(),
            poll_interval_secs: 30,
            fetch_timeout_secs: 5,
            debounce_ms: 500,
            require_success_status: false,
        }
    }
}

/// Documentation serving configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DocsConfig {
    /// Path the raw document is served at.
    pub document_path: String,

    /// Mount point of the Swagger UI.
    pub ui_path: String,

    /// Keep authorization input across page reloads in the UI.
    pub persist_authorization: bool,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            document_path: "/swagger.json".to_string(),
            ui_path: "/docs".to_string(),
            persist_authorization: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
