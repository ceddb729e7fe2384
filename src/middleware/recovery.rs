//! Panic recovery middleware.
//!
//! # Responsibilities
//! - Guard the rest of the chain with `catch_unwind`
//! - Turn a panic into a logged 500 response
//!
//! # Design Decisions
//! - The innermost recovery catches; outer ones see a normal return
//! - A caught panic ends the unwound handlers only; the chain then moves on
//!   past the handler that panicked, like any handler that returned

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use axum::http::StatusCode;

use crate::engine::{handler, Context, Handler};

/// Catch panics raised further down the chain and answer 500 instead.
pub fn recovery() -> Handler {
    handler(|c: &mut Context| {
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| c.next())) {
            tracing::error!(
                method = %c.method(),
                path = %c.path(),
                panic = %panic_message(payload.as_ref()),
                "Handler panicked"
            );
            c.fail(
                StatusCode::INTERNAL_SERVER_ERROR,
                StatusCode::INTERNAL_SERVER_ERROR
                    .canonical_reason()
                    .unwrap_or_default(),
            );
        }
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic payload"
    }
}
