//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Resolve config → Initial document load (fatal) → Bind listener (fatal)
//!     → Spawn sync loop → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → sync loop exits → server drains → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds only after the document is loaded
//! - One broadcast signal stops every long-running task

pub mod shutdown;
pub mod signals;

pub use shutdown::{signalled, Shutdown};
