//! Metrics collection and exposition.
//!
//! # Metrics
//! - `document_refresh_total` (counter): refresh attempts by outcome and error kind
//! - `document_size_bytes` (gauge): size of the document currently served
//! - `document_revision` (gauge): number of successful loads
//! - `document_requests_total` (counter): document endpoint hits
//!
//! Without an installed recorder every call is a no-op, so the store and
//! the server record unconditionally.

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its HTTP scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

/// Record a refresh attempt; `error_kind` is `None` on success.
pub fn record_refresh(error_kind: Option<&'static str>) {
    match error_kind {
        None => counter!("document_refresh_total", "outcome" => "success").increment(1),
        Some(kind) => {
            counter!("document_refresh_total", "outcome" => "failure", "error" => kind).increment(1)
        }
    }
}

/// Record the shape of the document now being served.
pub fn record_document(size: usize, revision: u64) {
    gauge!("document_size_bytes").set(size as f64);
    gauge!("document_revision").set(revision as f64);
}

pub fn record_document_request() {
    counter!("document_requests_total").increment(1);
}
