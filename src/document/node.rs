//! Syntax tree node representation with source ranges.
//!
//! Every node records the span of characters it occupies in the source text.
//! Offsets are counted in characters (Unicode scalar values), not bytes, to
//! match the positions reported by `yaml-rust2` markers.
//!
//! # Example
//!
//! ```
//! use yamlpath_copier::document::node::{Node, NodeKind, Range};
//!
//! let node = Node::Scalar {
//!     range: Some(Range::new(3, 8)),
//!     value: "hello".to_string(),
//! };
//! assert_eq!(node.kind(), NodeKind::Scalar);
//! assert!(node.range().unwrap().contains(8));
//! ```

/// A span of characters in the original YAML source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    /// Offset of the first character of the token
    pub start: usize,
    /// Offset one past the last character of the token
    pub end: usize,
}

impl Range {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns true when `offset` falls within `[start, end]`.
    ///
    /// Both ends are inclusive, so a cursor placed immediately after a token
    /// still counts as touching it.
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset <= self.end
    }
}

/// The structural kind of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Mapping,
    Sequence,
    Scalar,
}

/// A key/value pair inside a mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingEntry {
    pub key: Node,
    /// `None` when the key has no value yet (`key:` with nothing after it)
    pub value: Option<Node>,
}

impl MappingEntry {
    pub fn new(key: Node, value: Option<Node>) -> Self {
        Self { key, value }
    }
}

/// A node in a parsed YAML document.
///
/// Ranges are optional: implicit empty scalars (an empty sequence item, an
/// omitted key) have no text in the source and therefore no span.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A block or flow mapping, entries in document order
    Mapping {
        range: Option<Range>,
        entries: Vec<MappingEntry>,
    },
    /// A block or flow sequence, items in document order
    Sequence {
        range: Option<Range>,
        items: Vec<Node>,
    },
    /// A leaf value. Aliases are represented as scalars holding `*name`.
    Scalar { range: Option<Range>, value: String },
}

impl Node {
    pub fn range(&self) -> Option<Range> {
        match self {
            Node::Mapping { range, .. }
            | Node::Sequence { range, .. }
            | Node::Scalar { range, .. } => *range,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Mapping { .. } => NodeKind::Mapping,
            Node::Sequence { .. } => NodeKind::Sequence,
            Node::Scalar { .. } => NodeKind::Scalar,
        }
    }

    /// Returns the textual value of a scalar node.
    ///
    /// Collections used as mapping keys have no textual value.
    pub fn scalar_text(&self) -> Option<&str> {
        match self {
            Node::Scalar { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Number of direct children (entries or items).
    pub fn len(&self) -> usize {
        match self {
            Node::Mapping { entries, .. } => entries.len(),
            Node::Sequence { items, .. } => items.len(),
            Node::Scalar { .. } => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up the value of the first entry whose key text equals `key`.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Mapping { entries, .. } => entries
                .iter()
                .find(|entry| entry.key.scalar_text() == Some(key))
                .and_then(|entry| entry.value.as_ref()),
            _ => None,
        }
    }

    /// Returns the item at `index` of a sequence.
    pub fn item(&self, index: usize) -> Option<&Node> {
        match self {
            Node::Sequence { items, .. } => items.get(index),
            _ => None,
        }
    }
}

/// A parsed YAML document.
///
/// The root is `None` for empty or comment-only input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct YamlDocument {
    pub root: Option<Node>,
}

impl YamlDocument {
    pub fn new(root: Option<Node>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }
}
