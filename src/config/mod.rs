//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → loader.rs (optional TOML file, parse & deserialize)
//!     → loader.rs (command-line overrides)
//!     → validation.rs (semantic checks)
//!     → MirrorConfig (validated, immutable)
//!     → handed to document, sync, http and observability at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; only the document is hot-reloaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{parse_config, resolve_config, ConfigError, ConfigOverrides};
pub use schema::MirrorConfig;
pub use schema::ListenerConfig;
pub use schema::SourceConfig;
pub use schema::DocsConfig;
pub use schema::ObservabilityConfig;
pub use validation::ValidationError;
