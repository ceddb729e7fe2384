//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Build engine → Bind listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     trigger() or Ctrl-C → Stop accepting → Drain in-flight requests → Exit
//! ```
//!
//! # Design Decisions
//! - Routes and groups are fixed before the listener binds
//! - One broadcast channel fans the shutdown signal out to every server

pub mod shutdown;

pub use shutdown::Shutdown;
