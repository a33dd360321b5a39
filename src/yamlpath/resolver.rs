//! Depth-first search for the node under an offset.
//!
//! The resolver walks the tree from the root, descending into the one child
//! whose range contains the offset, and records the mapping key or sequence
//! index taken at every step. Children are tried in document order and the
//! first match wins.

use super::ast::PathSegment;
use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::document::node::{MappingEntry, Node};

/// Resolves offsets to path segments, reporting its search to a sink.
#[derive(Debug, Clone, Default)]
pub struct PathResolver<S = LogSink> {
    sink: S,
}

impl<S: DiagnosticSink> PathResolver<S> {
    pub fn with_sink(sink: S) -> Self {
        Self { sink }
    }

    /// Returns the segments leading from `root` to the most specific node
    /// containing `offset`.
    ///
    /// The result is empty when nothing contains the offset, and also when
    /// the root itself is the target (a bare scalar document).
    ///
    /// # Example
    ///
    /// ```
    /// use yamlpath_copier::diagnostics::NullSink;
    /// use yamlpath_copier::document::parse_yaml;
    /// use yamlpath_copier::yamlpath::{PathResolver, PathSegment};
    ///
    /// let doc = parse_yaml("a: [10, 20, 30]").unwrap();
    /// let resolver = PathResolver::with_sink(NullSink);
    /// let segments = resolver.find_path(doc.root().unwrap(), 8);
    /// assert_eq!(segments, vec![PathSegment::key("a"), PathSegment::Index(1)]);
    /// ```
    pub fn find_path(&self, root: &Node, offset: usize) -> Vec<PathSegment> {
        self.search(Some(root), offset, 0).unwrap_or_default()
    }

    /// Returns `None` when no path runs through `node`.
    fn search(
        &self,
        node: Option<&Node>,
        offset: usize,
        depth: usize,
    ) -> Option<Vec<PathSegment>> {
        let Some(node) = node else {
            self.trace(depth, format_args!("No node"));
            return None;
        };

        let Some(range) = node.range() else {
            self.trace(depth, format_args!("No range on node"));
            return None;
        };

        if !range.contains(offset) {
            self.trace(
                depth,
                format_args!("Offset {} outside range [{}, {}]", offset, range.start, range.end),
            );
            return None;
        }

        self.trace(
            depth,
            format_args!(
                "Checking node, offset {} in range [{}, {}]",
                offset, range.start, range.end
            ),
        );

        let found = match node {
            Node::Mapping { entries, .. } => self.search_mapping(entries, offset, depth),
            Node::Sequence { items, .. } => self.search_sequence(items, offset, depth),
            Node::Scalar { .. } => return Some(Vec::new()),
        };

        if found.is_none() {
            self.trace(depth, format_args!("No match found"));
        }
        found
    }

    fn search_mapping(
        &self,
        entries: &[MappingEntry],
        offset: usize,
        depth: usize,
    ) -> Option<Vec<PathSegment>> {
        self.trace(depth, format_args!("Node type: Map ({} items)", entries.len()));

        for entry in entries {
            let key_text = entry.key.scalar_text();

            if let (Some(text), Some(key_range)) = (key_text, entry.key.range()) {
                if key_range.contains(offset) {
                    self.trace(depth, format_args!("Found key: {}", text));
                    return Some(vec![PathSegment::key(text)]);
                }
            }

            let Some(value) = entry.value.as_ref() else {
                continue;
            };
            let Some(value_range) = value.range() else {
                continue;
            };
            if !value_range.contains(offset) {
                continue;
            }

            self.trace(
                depth,
                format_args!("Found value for key: {}", key_text.unwrap_or("?")),
            );
            // The first entry whose value contains the offset decides the
            // outcome; later siblings are not consulted.
            let rest = self.search(Some(value), offset, depth + 1)?;
            let mut segments: Vec<PathSegment> =
                key_text.map(PathSegment::key).into_iter().collect();
            segments.extend(rest);
            return Some(segments);
        }

        None
    }

    fn search_sequence(
        &self,
        items: &[Node],
        offset: usize,
        depth: usize,
    ) -> Option<Vec<PathSegment>> {
        self.trace(depth, format_args!("Node type: Sequence ({} items)", items.len()));

        for (index, item) in items.iter().enumerate() {
            let should_check = match item.range() {
                Some(range) => {
                    let inside = range.contains(offset);
                    self.trace(
                        depth,
                        format_args!(
                            "Item [{}]: range [{}, {}], offset {} {}",
                            index,
                            range.start,
                            range.end,
                            offset,
                            if inside { "INSIDE" } else { "outside" }
                        ),
                    );
                    inside
                }
                // Partial trees can hold items without a span; try them anyway
                None => {
                    self.trace(depth, format_args!("Item [{}]: no range, checking anyway", index));
                    true
                }
            };

            if !should_check {
                continue;
            }

            if let Some(rest) = self.search(Some(item), offset, depth + 1) {
                self.trace(depth, format_args!("Found match in item [{}]", index));
                let mut segments = vec![PathSegment::Index(index)];
                segments.extend(rest);
                return Some(segments);
            }
        }

        None
    }

    fn trace(&self, depth: usize, message: std::fmt::Arguments<'_>) {
        self.sink.trace(depth, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{NullSink, RecordingSink};
    use crate::document::node::Range;

    fn scalar(start: usize, end: usize, value: &str) -> Node {
        Node::Scalar {
            range: Some(Range::new(start, end)),
            value: value.to_string(),
        }
    }

    fn resolver() -> PathResolver<NullSink> {
        PathResolver::with_sink(NullSink)
    }

    #[test]
    fn test_offset_outside_root_is_empty() {
        let root = Node::Mapping {
            range: Some(Range::new(0, 4)),
            entries: vec![MappingEntry::new(scalar(0, 1, "a"), Some(scalar(3, 4, "1")))],
        };
        assert!(resolver().find_path(&root, 10).is_empty());
    }

    #[test]
    fn test_root_scalar_is_empty() {
        assert!(resolver().find_path(&scalar(0, 5, "hello"), 2).is_empty());
    }

    #[test]
    fn test_rangeless_root_is_empty() {
        let root = Node::Mapping {
            range: None,
            entries: Vec::new(),
        };
        assert!(resolver().find_path(&root, 0).is_empty());
    }

    #[test]
    fn test_key_hit_stops_descent() {
        let inner = Node::Mapping {
            range: Some(Range::new(3, 7)),
            entries: vec![MappingEntry::new(scalar(3, 4, "b"), Some(scalar(6, 7, "1")))],
        };
        let root = Node::Mapping {
            range: Some(Range::new(0, 7)),
            entries: vec![MappingEntry::new(scalar(0, 1, "a"), Some(inner))],
        };
        assert_eq!(resolver().find_path(&root, 0), vec![PathSegment::key("a")]);
        assert_eq!(
            resolver().find_path(&root, 6),
            vec![PathSegment::key("a"), PathSegment::key("b")]
        );
    }

    #[test]
    fn test_first_containing_value_decides() {
        // Overlapping siblings: the first value contains the offset but has
        // nothing inside it, so the second entry is never tried.
        let first = Node::Sequence {
            range: Some(Range::new(2, 9)),
            items: Vec::new(),
        };
        let root = Node::Mapping {
            range: Some(Range::new(0, 9)),
            entries: vec![
                MappingEntry::new(scalar(0, 1, "a"), Some(first)),
                MappingEntry::new(scalar(5, 6, "b"), Some(scalar(8, 9, "2"))),
            ],
        };
        assert!(resolver().find_path(&root, 8).is_empty());
    }

    #[test]
    fn test_missing_value_is_skipped() {
        let root = Node::Mapping {
            range: Some(Range::new(0, 7)),
            entries: vec![
                MappingEntry::new(scalar(0, 1, "a"), None),
                MappingEntry::new(scalar(3, 4, "b"), Some(scalar(6, 7, "2"))),
            ],
        };
        assert_eq!(resolver().find_path(&root, 6), vec![PathSegment::key("b")]);
    }

    #[test]
    fn test_collection_key_adds_no_segment() {
        let key = Node::Sequence {
            range: Some(Range::new(2, 8)),
            items: vec![scalar(3, 4, "x")],
        };
        let root = Node::Mapping {
            range: Some(Range::new(0, 12)),
            entries: vec![MappingEntry::new(key, Some(scalar(11, 12, "v")))],
        };
        assert!(resolver().find_path(&root, 3).is_empty());
        assert!(resolver().find_path(&root, 11).is_empty());
    }

    #[test]
    fn test_rangeless_sequence_item_is_attempted() {
        let root = Node::Sequence {
            range: Some(Range::new(0, 20)),
            items: vec![
                Node::Scalar {
                    range: None,
                    value: String::new(),
                },
                Node::Mapping {
                    range: None,
                    entries: Vec::new(),
                },
                scalar(10, 12, "ok"),
            ],
        };
        assert_eq!(resolver().find_path(&root, 11), vec![PathSegment::Index(2)]);
    }

    #[test]
    fn test_failed_item_continues_to_next() {
        let empty = Node::Sequence {
            range: Some(Range::new(2, 6)),
            items: Vec::new(),
        };
        let root = Node::Sequence {
            range: Some(Range::new(0, 10)),
            items: vec![empty, scalar(5, 8, "x")],
        };
        assert_eq!(resolver().find_path(&root, 5), vec![PathSegment::Index(1)]);
    }

    #[test]
    fn test_trace_reports_search() {
        let sink = RecordingSink::new();
        let root = Node::Mapping {
            range: Some(Range::new(0, 4)),
            entries: vec![MappingEntry::new(scalar(0, 1, "a"), Some(scalar(3, 4, "1")))],
        };
        let segments = PathResolver::with_sink(&sink).find_path(&root, 3);
        assert_eq!(segments, vec![PathSegment::key("a")]);

        let lines = sink.lines();
        assert_eq!(lines[0], "Checking node, offset 3 in range [0, 4]");
        assert!(lines.contains(&"Found value for key: a".to_string()));
        assert!(lines.contains(&"  Checking node, offset 3 in range [3, 4]".to_string()));
    }
}
