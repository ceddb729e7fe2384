//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (setup phase):
//!     (method, pattern, handler)
//!     → pattern.rs (split into segments)
//!     → trie.rs (insert into the method's tree)
//!     → table.rs (store handler under "METHOD-pattern")
//!
//! Lookup (per request):
//!     (method, path)
//!     → table.rs (pick the method's tree)
//!     → trie.rs (first-match search)
//!     → table.rs (bind :name and *name from the matched pattern)
//!     → Return: RouteMatch or None
//! ```
//!
//! # Design Decisions
//! - Populated during setup, read-only while serving
//! - Deterministic: same registrations, same input, same match
//! - First match wins (ordered by insertion, not by specificity)

pub mod pattern;
pub mod table;
pub mod trie;

pub use pattern::{parse_pattern, Segment, SegmentKind};
pub use table::{Params, RouteMatch, RouteTable};
pub use trie::Node;
