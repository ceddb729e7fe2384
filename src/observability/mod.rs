//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Registration, dispatch and middleware produce:
//!     → tracing events with structured fields (method, path, status)
//!     → logging.rs (subscriber: env filter + fmt layer)
//!     → stdout
//! ```
//!
//! # Design Decisions
//! - Structured fields, never preformatted messages
//! - Request ID flows from the HTTP layer into the logger middleware
//! - RUST_LOG overrides the configured level

pub mod logging;
