//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layers, body collection)
//!     → request.rs (method, decoded path, query, headers, body)
//!     → engine (middleware + route handler chain)
//!     → response.rs (status, headers, body)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::Request;
pub use response::Response;
pub use server::HttpServer;
