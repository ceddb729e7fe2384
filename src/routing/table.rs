//! Route table: per-method trees plus the handler map.
//!
//! # Responsibilities
//! - Own one tree per HTTP method seen at registration
//! - Map `METHOD-pattern` keys to handlers
//! - Resolve a concrete path to its pattern and path parameters
//!
//! # Design Decisions
//! - Generic over the handler type; the tree never calls handlers
//! - Registering an existing key silently replaces its handler
//! - Parameters are extracted by re-parsing the matched pattern, not the tree path

use std::collections::HashMap;

use crate::routing::pattern::{parse_pattern, SegmentKind};
use crate::routing::trie::Node;

/// Path parameters bound by a match, name → captured text.
pub type Params = HashMap<String, String>;

/// Result of resolving a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// The registered pattern that matched, e.g. `/hello/:name`.
    pub pattern: String,
    pub params: Params,
}

/// Routes keyed by method, with their handlers.
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    roots: HashMap<String, Node>,
    handlers: HashMap<String, H>,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self {
            roots: HashMap::new(),
            handlers: HashMap::new(),
        }
    }
}

fn route_key(method: &str, pattern: &str) -> String {
    format!("{method}-{pattern}")
}

impl<H> RouteTable<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `method` and `pattern`.
    pub fn add_route(&mut self, method: &str, pattern: &str, handler: H) {
        let segments = parse_pattern(pattern);
        self.roots
            .entry(method.to_string())
            .or_insert_with(Node::root)
            .insert(pattern, &segments, 0);
        self.handlers.insert(route_key(method, pattern), handler);
    }

    /// Resolve `path` under `method` to the matched pattern and its parameters.
    pub fn get_route(&self, method: &str, path: &str) -> Option<RouteMatch> {
        let root = self.roots.get(method)?;
        let search = parse_pattern(path);
        let node = root.search(&search, 0)?;

        let mut params = Params::new();
        for (index, segment) in parse_pattern(node.pattern()).iter().enumerate() {
            match segment.kind() {
                SegmentKind::Named(name) => {
                    if let Some(value) = search.get(index) {
                        params.insert(name.to_string(), value.raw().to_string());
                    }
                }
                SegmentKind::Wildcard(name) if !name.is_empty() => {
                    let rest: Vec<&str> = search.iter().skip(index).map(|s| s.raw()).collect();
                    params.insert(name.to_string(), rest.join("/"));
                }
                _ => {}
            }
        }

        Some(RouteMatch {
            pattern: node.pattern().to_string(),
            params,
        })
    }

    /// The handler registered under exactly `method` and `pattern`.
    pub fn handler(&self, method: &str, pattern: &str) -> Option<&H> {
        self.handlers.get(&route_key(method, pattern))
    }

    /// Resolve `path` and fetch its handler in one step.
    pub fn lookup(&self, method: &str, path: &str) -> Option<(&H, RouteMatch)> {
        let matched = self.get_route(method, path)?;
        let handler = self.handler(method, &matched.pattern)?;
        Some((handler, matched))
    }

    /// The tree for `method`, if any route was registered under it.
    pub fn root(&self, method: &str) -> Option<&Node> {
        self.roots.get(method)
    }

    /// Number of distinct `method`/`pattern` registrations.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
