//! Route pattern parsing.
//!
//! # Responsibilities
//! - Split a pattern (or a concrete request path) on `/`
//! - Drop empty segments (leading, trailing, doubled slashes)
//! - Classify each segment as static, named parameter or wildcard
//!
//! # Design Decisions
//! - Parsing never fails; any string yields a (possibly empty) sequence
//! - Segments borrow from the input, no allocation per segment
//! - The first `*` segment ends parsing, whatever text follows it

/// What a single pattern segment matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind<'a> {
    /// Literal text, matched exactly.
    Static(&'a str),
    /// `:name`, binds exactly one path segment.
    Named(&'a str),
    /// `*name` or bare `*`, binds the remainder of the path.
    Wildcard(&'a str),
}

/// One `/`-separated token of a route pattern or request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    raw: &'a str,
}

impl<'a> Segment<'a> {
    /// Wrap a raw, non-empty segment.
    pub fn new(raw: &'a str) -> Self {
        Self { raw }
    }

    /// The segment exactly as written, including any `:` or `*` marker.
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    pub fn kind(&self) -> SegmentKind<'a> {
        if let Some(name) = self.raw.strip_prefix(':') {
            SegmentKind::Named(name)
        } else if let Some(name) = self.raw.strip_prefix('*') {
            SegmentKind::Wildcard(name)
        } else {
            SegmentKind::Static(self.raw)
        }
    }

    /// True for `:name` and `*name` segments.
    pub fn is_dynamic(&self) -> bool {
        is_dynamic(self.raw)
    }

    pub fn is_wildcard(&self) -> bool {
        self.raw.starts_with('*')
    }
}

/// Returns true if a raw segment starts with a parameter marker.
pub(crate) fn is_dynamic(raw: &str) -> bool {
    raw.starts_with(':') || raw.starts_with('*')
}

/// Parse a pattern or path into its segments.
///
/// `"/p/:lang/doc"` yields `p`, `:lang`, `doc`. `"/p/*name/*"` yields `p`,
/// `*name`: nothing after the first wildcard is kept. `"/"` and `""` yield
/// an empty sequence.
pub fn parse_pattern(pattern: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    for raw in pattern.split('/').filter(|s| !s.is_empty()) {
        let segment = Segment::new(raw);
        segments.push(segment);
        if segment.is_wildcard() {
            break;
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raws(pattern: &str) -> Vec<&str> {
        parse_pattern(pattern).iter().map(Segment::raw).collect()
    }

    #[test]
    fn test_parse_named_and_wildcard() {
        assert_eq!(raws("/p/:name"), vec!["p", ":name"]);
        assert_eq!(raws("/p/*"), vec!["p", "*"]);
        assert_eq!(raws("/p/*name/*"), vec!["p", "*name"]);
    }

    #[test]
    fn test_wildcard_stops_mid_pattern() {
        assert_eq!(raws("/assets/*filepath/test"), vec!["assets", "*filepath"]);
    }

    #[test]
    fn test_empty_segments_dropped() {
        assert!(parse_pattern("/").is_empty());
        assert!(parse_pattern("").is_empty());
        assert!(parse_pattern("///").is_empty());
        assert_eq!(raws("//a//b/"), vec!["a", "b"]);
    }

    #[test]
    fn test_segment_kinds() {
        let segments = parse_pattern("/static/:id/*rest");
        assert_eq!(segments[0].kind(), SegmentKind::Static("static"));
        assert_eq!(segments[1].kind(), SegmentKind::Named("id"));
        assert_eq!(segments[2].kind(), SegmentKind::Wildcard("rest"));
        assert!(!segments[0].is_dynamic());
        assert!(segments[1].is_dynamic());
        assert!(segments[2].is_dynamic());

        let bare = parse_pattern("/*");
        assert_eq!(bare[0].kind(), SegmentKind::Wildcard(""));
    }

    #[test]
    fn test_reparse_is_stable_without_wildcards() {
        for pattern in ["/", "/a", "/a/b/c", "//x//:y/", "/p/:lang/doc", "a/b"] {
            let first = raws(pattern);
            let rejoined = format!("/{}", first.join("/"));
            assert_eq!(raws(&rejoined), first, "pattern {pattern:?}");
        }
    }
}
