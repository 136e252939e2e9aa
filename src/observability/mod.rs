//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (refresh counters, document gauges)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, opt-in)
//! ```
//!
//! # Design Decisions
//! - Structured fields (source, revision, error) on every sync log line
//! - Metrics are cheap and no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
