//! Swagger Mirror Library
//!
//! Keeps an in-memory copy of a JSON API document in sync with a local file
//! or a remote URL, and serves it next to a Swagger UI.

pub mod cli;
pub mod config;
pub mod document;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod sync;

pub use config::schema::MirrorConfig;
pub use document::{DocumentSource, DocumentStore};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
