//! Cursor-to-path resolution for YAML documents.
//!
//! A request flows one way: text + position → offset → (tree, offset) →
//! raw segments → formatted path.
//!
//! # Path Syntax
//!
//! - `key` - a mapping key
//! - `parent.child` - nested mapping keys
//! - `key[0]` - an item of the sequence stored under `key`
//! - `[0]` - an item of a top-level sequence
//!
//! # Examples
//!
//! ```
//! use yamlpath_copier::yamlpath::{find_yaml_path, Position};
//!
//! let text = "a:\n  - b: 1\n  - b: 2\n";
//! let path = find_yaml_path(text, Position::new(2, 7)).unwrap().unwrap();
//! assert_eq!(path.to_string(), "a[1].b");
//! ```

pub mod ast;
pub mod offset;
pub mod resolver;

pub use ast::{format_segments, PathSegment, YamlPath};
pub use offset::{offset_at, Position};
pub use resolver::PathResolver;

use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::document::parse_yaml;
use crate::error::Result;

/// Resolves the path of the node at `position` in `text`.
///
/// Returns `Ok(None)` when the position is not inside any addressable node.
///
/// # Errors
///
/// - `Error::Parse` if `text` is not valid YAML
/// - `Error::StalePosition` if `position` does not exist in `text`
pub fn find_yaml_path(text: &str, position: Position) -> Result<Option<YamlPath>> {
    find_yaml_path_with(text, position, LogSink)
}

/// Like `find_yaml_path`, tracing the search to `sink`.
pub fn find_yaml_path_with<S: DiagnosticSink>(
    text: &str,
    position: Position,
    sink: S,
) -> Result<Option<YamlPath>> {
    let document = parse_yaml(text)?;
    let offset = offset_at(text, position)?;
    sink.trace(0, format_args!("Offset: {}", offset));

    let Some(root) = document.root() else {
        sink.trace(0, format_args!("Empty document"));
        return Ok(None);
    };

    let resolver = PathResolver::with_sink(&sink);
    let segments = resolver.find_path(root, offset);
    sink.trace(
        0,
        format_args!(
            "Raw path: [{}]",
            segments
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    );

    let path = YamlPath::from_segments(segments);
    if let Some(path) = &path {
        sink.trace(0, format_args!("Final path: {}", path));
    }
    Ok(path)
}
