//! Request logging middleware.

use std::time::Instant;

use crate::engine::{handler, Context, Handler};

/// Log status, method, path and latency once the rest of the chain has run.
pub fn logger() -> Handler {
    handler(|c: &mut Context| {
        let start = Instant::now();
        c.next();
        tracing::info!(
            status = c.response().status.as_u16(),
            method = %c.method(),
            path = %c.path(),
            request_id = c.header("x-request-id").unwrap_or("-"),
            elapsed = ?start.elapsed(),
            "Request handled"
        );
    })
}
