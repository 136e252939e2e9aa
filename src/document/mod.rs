//! Document mirroring subsystem.
//!
//! # Data Flow
//! ```text
//! source string (CLI / config)
//!     → source.rs (classify once: Local(path) | Remote(url))
//!     → fetcher.rs (read file | GET with timeout)
//!     → store.rs (validate JSON, atomic swap of Arc<Document>)
//!     → readers (HTTP handlers) take lock-free snapshots
//! ```
//!
//! # Design Decisions
//! - A failed refresh never touches the stored document
//! - The first load is fatal on failure; later ones are only logged
//! - Refreshes are serialized; reads never wait on them

pub mod error;
pub mod fetcher;
pub mod source;
pub mod store;

pub use error::{DocumentError, DocumentResult};
pub use fetcher::Fetcher;
pub use source::{DocumentSource, SourceLocation};
pub use store::{Document, DocumentStore};
