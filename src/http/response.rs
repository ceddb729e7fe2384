//! Response produced by a handler chain.
//!
//! # Responsibilities
//! - Accumulate status, headers and body while the chain runs
//! - Convert into an axum response at the transport boundary
//!
//! # Design Decisions
//! - Status defaults to 200 OK, as if no handler set one
//! - Body writes append; a later handler sees and extends earlier output

use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

/// Status, headers and body written by handlers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Response {
    /// The body as UTF-8 text, lossily.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.headers, self.body).into_response()
    }
}
