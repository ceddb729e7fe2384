//! Segment prefix tree.
//!
//! # Responsibilities
//! - Store registered patterns, one node per segment position
//! - Resolve a concrete path to the node that terminates a pattern
//!
//! # Design Decisions
//! - Children are an ordered list; insertion order decides precedence
//! - First match wins, for both child reuse on insert and candidate order on search
//! - A dynamic child absorbs later static inserts at the same depth
//! - Wildcard nodes accept everything from their depth onward
//! - Nodes are never pruned

use crate::routing::pattern::{is_dynamic, Segment};

/// A single position in the route tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    /// Full pattern, set only on nodes that terminate a registered route.
    pattern: String,
    /// Raw segment text, e.g. `:lang`.
    part: String,
    children: Vec<Node>,
    is_dynamic: bool,
}

impl Node {
    /// An empty root node.
    pub fn root() -> Self {
        Self::default()
    }

    fn child(part: &str) -> Self {
        Self {
            pattern: String::new(),
            part: part.to_string(),
            children: Vec::new(),
            is_dynamic: is_dynamic(part),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn part(&self) -> &str {
        &self.part
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn is_dynamic(&self) -> bool {
        self.is_dynamic
    }

    /// True if this node terminates a registered pattern.
    pub fn is_terminal(&self) -> bool {
        !self.pattern.is_empty()
    }

    fn accepts(&self, part: &str) -> bool {
        self.part == part || self.is_dynamic
    }

    /// Insert `pattern`, whose parsed form is `segments`, below this node.
    ///
    /// `depth` is the index of the segment this node's children are matched
    /// against. Re-inserting a pattern reuses the existing path and only
    /// rewrites the terminal `pattern`.
    pub fn insert(&mut self, pattern: &str, segments: &[Segment<'_>], depth: usize) {
        let Some(segment) = segments.get(depth) else {
            self.pattern = pattern.to_string();
            return;
        };

        let part = segment.raw();
        let index = match self.children.iter().position(|child| child.accepts(part)) {
            Some(index) => index,
            None => {
                self.children.push(Node::child(part));
                self.children.len() - 1
            }
        };

        self.children[index].insert(pattern, segments, depth + 1);
    }

    /// Find the terminal node matching `segments` from `depth` onward.
    pub fn search(&self, segments: &[Segment<'_>], depth: usize) -> Option<&Node> {
        if depth == segments.len() || self.part.starts_with('*') {
            return self.is_terminal().then_some(self);
        }

        let part = segments[depth].raw();
        self.children
            .iter()
            .filter(|child| child.accepts(part))
            .find_map(|child| child.search(segments, depth + 1))
    }
}
