//! HTTP request router with onion-style middleware chains.
//!
//! Routes are stored in one segment tree per method and support static
//! segments, `:name` parameters and `*name` wildcard suffixes. Every request
//! runs a linear chain: the middleware of each group whose prefix starts the
//! path, then the route handler (or a 404 handler). Any handler may call
//! [`Context::next`] to run the rest of the chain and resume afterwards.
//!
//! ```
//! use axum::http::StatusCode;
//! use switchyard::{Engine, Context};
//!
//! let mut engine = Engine::with_defaults();
//! engine.get("/hello/:name", |c: &mut Context| {
//!     let name = c.param("name").unwrap_or_default().to_string();
//!     c.string(StatusCode::OK, format!("hello {name}\n"));
//! });
//! let response = engine.dispatch("GET", "/hello/world");
//! assert_eq!(response.text(), "hello world\n");
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod files;
pub mod http;
pub mod lifecycle;
pub mod middleware;
pub mod observability;
pub mod routing;

pub use config::ServerConfig;
pub use engine::{handler, Context, Engine, GroupId, Handler, RouterGroup};
pub use error::{Error, Result};
pub use http::{HttpServer, Request, Response};
pub use lifecycle::Shutdown;
