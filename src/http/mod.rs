//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tracing + timeout layers)
//!     → GET /swagger.json → DocumentStore snapshot → application/json
//!     → GET /docs/...     → docs.rs (Swagger UI → fetches /swagger.json)
//!     → GET /healthz      → revision + source summary
//! ```

pub mod docs;
pub mod server;

pub use server::{AppState, HttpServer};
