//! Per-request dispatch context and the chain engine.
//!
//! # Chain States
//! ```text
//! index = -1            not started
//! index = 0..len-1      running handler[index]
//! index >= len          exhausted
//! index >= ABORT_INDEX  aborted, nothing further runs
//! ```
//!
//! # Control Flow
//! `next()` bumps the shared cursor and runs the remaining handlers in
//! order. A handler that calls `next()` itself resumes only after every
//! later handler has returned, which gives before/after ("onion") code
//! around the call. A handler that never calls `next()` still lets the
//! chain continue once it returns; the loop that invoked it moves on.
//!
//! Calling `next()` twice from the same handler double-advances the cursor.
//! That is the caller's responsibility and is not guarded against.

use std::sync::Arc;

use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use serde::Serialize;
use tera::Tera;

use crate::engine::handler::Handler;
use crate::http::{Request, Response};
use crate::routing::Params;

const NOT_STARTED: isize = -1;
const ABORT_INDEX: isize = isize::MAX / 2;

/// State for one request: parameters, handler chain, cursor and response.
pub struct Context {
    request: Request,
    params: Params,
    handlers: Vec<Handler>,
    index: isize,
    response: Response,
    templates: Arc<Tera>,
}

impl Context {
    /// A fresh context whose chain starts as `handlers`.
    pub fn new(request: Request, handlers: Vec<Handler>) -> Self {
        Self {
            request,
            params: Params::new(),
            handlers,
            index: NOT_STARTED,
            response: Response::default(),
            templates: Arc::default(),
        }
    }

    /// Run the rest of the chain.
    pub fn next(&mut self) {
        self.index += 1;
        while let Some(handler) = self.current() {
            handler(self);
            self.index += 1;
        }
    }

    fn current(&self) -> Option<Handler> {
        usize::try_from(self.index)
            .ok()
            .and_then(|i| self.handlers.get(i))
            .cloned()
    }

    /// Stop the chain; no handler after the current one will run.
    pub fn abort(&mut self) {
        self.index = ABORT_INDEX;
    }

    pub fn is_aborted(&self) -> bool {
        self.index >= ABORT_INDEX
    }

    /// Cursor position, `-1` before the chain starts.
    pub fn index(&self) -> isize {
        self.index
    }

    pub(crate) fn push_handler(&mut self, handler: Handler) {
        self.handlers.push(handler);
    }

    pub(crate) fn set_templates(&mut self, templates: Arc<Tera>) {
        self.templates = templates;
    }

    pub(crate) fn set_params(&mut self, params: Params) {
        self.params = params;
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    // Request side

    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn method(&self) -> &str {
        self.request.method()
    }

    pub fn path(&self) -> &str {
        self.request.path()
    }

    /// Path parameter bound by the matched route.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn query(&self, key: &str) -> Option<String> {
        self.request.query_value(key)
    }

    pub fn post_form(&self, key: &str) -> Option<String> {
        self.request.form_value(key)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.request.header(name)
    }

    pub fn body(&self) -> &[u8] {
        self.request.body()
    }

    // Response side

    pub fn response(&self) -> &Response {
        &self.response
    }

    pub fn response_mut(&mut self) -> &mut Response {
        &mut self.response
    }

    pub fn into_response(self) -> Response {
        self.response
    }

    pub fn status(&mut self, code: StatusCode) {
        self.response.status = code;
    }

    /// Set a response header. Invalid names or values are logged and dropped.
    pub fn set_header(&mut self, key: &str, value: &str) {
        match (
            HeaderName::from_bytes(key.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.response.headers.insert(name, value);
            }
            _ => tracing::warn!(header = %key, "Dropping invalid response header"),
        }
    }

    /// Plain-text response.
    pub fn string(&mut self, code: StatusCode, body: impl AsRef<str>) {
        self.set_header(header::CONTENT_TYPE.as_str(), "text/plain");
        self.status(code);
        self.write(body.as_ref().as_bytes());
    }

    /// JSON response. Serialization errors turn into a 500 carrying the error text.
    pub fn json<T: Serialize + ?Sized>(&mut self, code: StatusCode, value: &T) {
        match serde_json::to_vec(value) {
            Ok(bytes) => {
                self.set_header(header::CONTENT_TYPE.as_str(), "application/json");
                self.status(code);
                self.write(&bytes);
            }
            Err(e) => self.fail(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        }
    }

    /// Render template `name` with `value` as its context.
    ///
    /// A missing template or a render error turns into a 500 carrying the error text.
    pub fn html<T: Serialize + ?Sized>(&mut self, code: StatusCode, name: &str, value: &T) {
        let rendered = tera::Context::from_serialize(value)
            .and_then(|context| self.templates.render(name, &context));
        match rendered {
            Ok(page) => {
                self.set_header(header::CONTENT_TYPE.as_str(), "text/html");
                self.status(code);
                self.write(page.as_bytes());
            }
            Err(e) => {
                tracing::warn!(template = %name, error = %e, "Template render failed");
                self.fail(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
            }
        }
    }

    /// Raw bytes response.
    pub fn data(&mut self, code: StatusCode, data: impl AsRef<[u8]>) {
        self.status(code);
        self.write(data.as_ref());
    }

    /// Replace whatever was written so far with `reason`.
    pub fn fail(&mut self, code: StatusCode, reason: impl AsRef<str>) {
        self.response.body.clear();
        self.status(code);
        self.write(reason.as_ref().as_bytes());
    }

    fn write(&mut self, bytes: &[u8]) {
        self.response.body.extend_from_slice(bytes);
    }
}
