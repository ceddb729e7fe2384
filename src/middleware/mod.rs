//! Built-in middleware.
//!
//! # Chain Position
//! ```text
//! logger → recovery → [group middleware] → route handler
//! ```
//!
//! # Design Decisions
//! - Middleware are ordinary handlers; the engine has no special cases for them
//! - Recovery should sit early so it guards everything after it

pub mod logger;
pub mod recovery;

pub use logger::logger;
pub use recovery::recovery;
