//! Request view handed to the dispatch engine.
//!
//! # Responsibilities
//! - Carry method, decoded path, raw query, headers and body
//! - Decode query strings and urlencoded form bodies on demand
//! - Build from an axum request head at the transport boundary
//!
//! # Design Decisions
//! - Method is kept as a string; the route table keys on it verbatim
//! - Path is percent-decoded once, before routing
//! - The body is fully buffered; handlers are synchronous

use axum::http::{header, request::Parts, HeaderMap, HeaderName, HeaderValue};

/// An inbound request as seen by handlers.
#[derive(Debug, Clone, Default)]
pub struct Request {
    method: String,
    path: String,
    query: String,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Request {
    /// A body-less request for `method` and an already decoded `path`.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Build from an HTTP request head and its collected body.
    pub fn from_parts(parts: &Parts, body: Vec<u8>) -> Self {
        let raw_path = parts.uri.path();
        let path = match urlencoding::decode(raw_path) {
            Ok(decoded) => decoded.into_owned(),
            Err(e) => {
                tracing::debug!(path = %raw_path, error = %e, "Path is not valid UTF-8 once decoded, routing raw path");
                raw_path.to_string()
            }
        };

        Self {
            method: parts.method.as_str().to_string(),
            path,
            query: parts.uri.query().unwrap_or_default().to_string(),
            headers: parts.headers.clone(),
            body,
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The raw query string, without the leading `?`.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// First value of `key` in the query string.
    pub fn query_value(&self, key: &str) -> Option<String> {
        find_urlencoded(self.query.as_bytes(), key)
    }

    /// First value of `key` in an urlencoded body, falling back to the query string.
    pub fn form_value(&self, key: &str) -> Option<String> {
        let is_form = self
            .header(header::CONTENT_TYPE.as_str())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            if let Some(value) = find_urlencoded(&self.body, key) {
                return Some(value);
            }
        }
        self.query_value(key)
    }
}

fn find_urlencoded(input: &[u8], key: &str) -> Option<String> {
    url::form_urlencoded::parse(input)
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
