//! Path segments and the formatted YAML path.

use serde::Serialize;
use std::fmt;

/// One step from a node to one of its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// A mapping key (`name`)
    Key(String),
    /// A sequence position (`[0]`)
    Index(usize),
}

impl PathSegment {
    pub fn key(name: impl Into<String>) -> Self {
        PathSegment::Key(name.into())
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(name) => write!(f, "{}", name),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// Joins raw segments into a display path.
///
/// Index segments attach to the preceding token without a separator; keys
/// start a new token; tokens are joined with `.`. Returns `None` for an
/// empty segment list, which means "no path", not "empty path".
///
/// # Example
///
/// ```
/// use yamlpath_copier::yamlpath::{format_segments, PathSegment};
///
/// let segments = vec![
///     PathSegment::key("a"),
///     PathSegment::Index(0),
///     PathSegment::key("b"),
/// ];
/// assert_eq!(format_segments(&segments).as_deref(), Some("a[0].b"));
/// assert_eq!(format_segments(&[]), None);
/// ```
pub fn format_segments(segments: &[PathSegment]) -> Option<String> {
    if segments.is_empty() {
        return None;
    }

    let mut tokens: Vec<String> = Vec::new();
    for segment in segments {
        if let (PathSegment::Index(_), Some(last)) = (segment, tokens.last_mut()) {
            last.push_str(&segment.to_string());
            continue;
        }
        tokens.push(segment.to_string());
    }

    Some(tokens.join("."))
}

/// A resolved path from the document root to the node under the cursor.
///
/// Always holds at least one segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YamlPath {
    segments: Vec<PathSegment>,
}

impl YamlPath {
    /// Builds a path from raw segments; `None` if there are none.
    pub fn from_segments(segments: Vec<PathSegment>) -> Option<Self> {
        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
}

impl fmt::Display for YamlPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_segments(&self.segments).unwrap_or_default())
    }
}
