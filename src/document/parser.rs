//! YAML parsing with source range tracking.
//!
//! This module turns YAML text into a `YamlDocument` whose nodes carry the
//! character range they occupy in the source. It drives `yaml-rust2`'s event
//! parser through a `MarkedEventReceiver` and recovers each node's extent from
//! the event markers plus a scan of the source text.
//!
//! # Example
//!
//! ```
//! use yamlpath_copier::document::parse_yaml;
//!
//! let doc = parse_yaml("name: Alice").unwrap();
//! let root = doc.root().unwrap();
//! let name = root.get("name").unwrap();
//! assert_eq!(name.scalar_text(), Some("Alice"));
//! assert_eq!(name.range().unwrap().start, 6);
//! ```

use super::node::{MappingEntry, Node, Range, YamlDocument};
use crate::error::Result;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

/// Parses YAML text into a `YamlDocument`.
///
/// Only the first document of a multi-document stream is parsed. Empty or
/// comment-only input produces a document without a root.
///
/// # Errors
///
/// Returns `Error::Parse` if the text is not valid YAML.
///
/// # Examples
///
/// ```
/// use yamlpath_copier::document::parse_yaml;
///
/// assert!(parse_yaml("items: [1, 2, 3]").is_ok());
/// assert!(parse_yaml("key: [unclosed").is_err());
/// assert!(parse_yaml("").unwrap().root().is_none());
/// ```
pub fn parse_yaml(text: &str) -> Result<YamlDocument> {
    let mut parser = Parser::new_from_str(text);
    let mut builder = TreeBuilder::new(text);

    parser.load(&mut builder, false)?;

    Ok(YamlDocument::new(builder.root))
}

/// Receives parser events and assembles the ranged tree.
struct TreeBuilder {
    /// Source text indexed by character, the unit `Marker::index` counts in
    source: Vec<char>,
    stack: Vec<Frame>,
    root: Option<Node>,
}

/// A collection still receiving children.
enum Frame {
    Sequence {
        start: usize,
        items: Vec<Node>,
    },
    Mapping {
        start: usize,
        entries: Vec<MappingEntry>,
        pending_key: Option<Node>,
    },
}

impl TreeBuilder {
    fn new(text: &str) -> Self {
        Self {
            source: text.chars().collect(),
            stack: Vec::new(),
            root: None,
        }
    }

    fn char_at(&self, index: usize) -> Option<char> {
        self.source.get(index).copied()
    }

    /// Attaches a finished node to the innermost open collection.
    fn push_complete(&mut self, node: Node) {
        match self.stack.last_mut() {
            None => {
                if self.root.is_none() {
                    self.root = Some(node);
                }
            }
            Some(Frame::Sequence { items, .. }) => items.push(node),
            Some(Frame::Mapping {
                entries,
                pending_key,
                ..
            }) => match pending_key.take() {
                None => *pending_key = Some(node),
                Some(key) => {
                    // An implicit empty value has no source text
                    let value = match node {
                        Node::Scalar { range: None, .. } => None,
                        other => Some(other),
                    };
                    entries.push(MappingEntry::new(key, value));
                }
            },
        }
    }

    fn on_scalar(&mut self, value: String, style: TScalarStyle, marker: Marker) {
        let start = marker.index();

        let is_plain = !matches!(
            style,
            TScalarStyle::SingleQuoted
                | TScalarStyle::DoubleQuoted
                | TScalarStyle::Literal
                | TScalarStyle::Folded
        );
        // yaml-rust2 reports an implicit empty node as a plain "~" that is
        // not actually present in the source.
        let implicit = value.is_empty() || (value == "~" && self.char_at(start) != Some('~'));
        if is_plain && implicit {
            self.push_complete(Node::Scalar {
                range: None,
                value: String::new(),
            });
            return;
        }

        let (start, end) = match style {
            TScalarStyle::SingleQuoted => (start, self.single_quoted_end(start)),
            TScalarStyle::DoubleQuoted => (start, self.double_quoted_end(start)),
            TScalarStyle::Literal | TScalarStyle::Folded => {
                let header = self.block_scalar_header(start);
                (header, self.block_scalar_end(header))
            }
            _ => (start, self.plain_end(start, &value)),
        };

        self.push_complete(Node::Scalar {
            range: Some(Range::new(start, end)),
            value,
        });
    }

    fn on_alias(&mut self, marker: Marker) {
        let start = marker.index();
        let mut end = start + 1;
        while let Some(ch) = self.char_at(end) {
            if ch.is_whitespace() || is_flow_indicator(ch) {
                break;
            }
            end += 1;
        }
        let value: String = self
            .source
            .get(start..end)
            .map(|chars| chars.iter().collect())
            .unwrap_or_default();
        self.push_complete(Node::Scalar {
            range: Some(Range::new(start, end)),
            value,
        });
    }

    /// Walks the source alongside the parsed value. Line folding turns breaks
    /// and indentation into single spaces, so runs of blanks are matched
    /// loosely on both sides.
    fn plain_end(&self, start: usize, value: &str) -> usize {
        let expected: Vec<char> = value.chars().collect();
        let mut i = start;
        let mut j = 0;

        while j < expected.len() {
            let Some(ch) = self.char_at(i) else { break };
            if ch == expected[j] {
                i += 1;
                j += 1;
            } else if ch.is_whitespace() {
                while self.char_at(i).is_some_and(char::is_whitespace) {
                    i += 1;
                }
                while j < expected.len() && expected[j].is_whitespace() {
                    j += 1;
                }
            } else {
                break;
            }
        }

        i
    }

    fn single_quoted_end(&self, start: usize) -> usize {
        let mut i = start + 1;
        while let Some(ch) = self.char_at(i) {
            if ch == '\'' {
                if self.char_at(i + 1) == Some('\'') {
                    i += 2;
                    continue;
                }
                return i + 1;
            }
            i += 1;
        }
        i
    }

    fn double_quoted_end(&self, start: usize) -> usize {
        let mut i = start + 1;
        while let Some(ch) = self.char_at(i) {
            match ch {
                '\\' => i += 2,
                '"' => return i + 1,
                _ => i += 1,
            }
        }
        i.min(self.source.len())
    }

    /// Finds the `|`/`>` indicator of a block scalar.
    ///
    /// `yaml-rust2` marks block scalars at their first content line, or at
    /// whatever token follows when there is no content, so the header is on
    /// the closest non-blank line above the marker. At the end of input an
    /// empty block scalar is marked at the header itself.
    fn block_scalar_header(&self, marker: usize) -> usize {
        let mut line = self.line_start(marker);
        while let Some(previous) = self.previous_line_start(line) {
            if let Some(header) = self.find_header_indicator(previous) {
                return header;
            }
            if previous + self.line_indent(previous) < self.line_content_end(previous) {
                break;
            }
            line = previous;
        }
        marker
    }

    /// Position of a block scalar indicator on the line starting at `line`.
    ///
    /// The indicator stands alone as a token, optionally followed by
    /// chomping/indentation indicators, then only blanks or a comment.
    fn find_header_indicator(&self, line: usize) -> Option<usize> {
        let line_end = self.line_content_end(line);
        (line..line_end).find(|&i| {
            if !matches!(self.source[i], '|' | '>') {
                return false;
            }
            if i > line && !self.source[i - 1].is_whitespace() {
                return false;
            }
            let mut j = i + 1;
            while j < line_end && matches!(self.source[j], '+' | '-' | '1'..='9') {
                j += 1;
            }
            if j == line_end {
                return true;
            }
            if !self.source[j].is_whitespace() {
                return false;
            }
            while j < line_end && self.source[j].is_whitespace() {
                j += 1;
            }
            j == line_end || self.source[j] == '#'
        })
    }

    /// A literal or folded scalar runs from its `|`/`>` header through the
    /// last non-blank line indented deeper than the header's line.
    fn block_scalar_end(&self, start: usize) -> usize {
        let header_indent = self.line_indent(self.line_start(start));
        let mut end = self.line_content_end(start);
        let mut content_indent = None;
        let mut cursor = self.next_line_start(start);

        while let Some(line) = cursor {
            let indent = self.line_indent(line);
            let line_end = self.line_content_end(line);
            let blank = line + indent >= line_end;

            if !blank {
                let required = *content_indent.get_or_insert(indent);
                if indent <= header_indent || indent < required {
                    break;
                }
                end = line_end;
            }
            cursor = self.next_line_start(line);
        }

        end
    }

    fn line_start(&self, index: usize) -> usize {
        let mut i = index.min(self.source.len());
        while i > 0 && !matches!(self.source[i - 1], '\n' | '\r') {
            i -= 1;
        }
        i
    }

    fn previous_line_start(&self, line_start: usize) -> Option<usize> {
        let mut i = line_start;
        if i > 0 && self.source[i - 1] == '\n' {
            i -= 1;
        }
        if i > 0 && self.source[i - 1] == '\r' {
            i -= 1;
        }
        (i < line_start).then(|| self.line_start(i))
    }

    fn line_indent(&self, line_start: usize) -> usize {
        let mut i = line_start;
        while self.char_at(i) == Some(' ') {
            i += 1;
        }
        i - line_start
    }

    /// Offset of the line break ending the line that contains `index`, with
    /// trailing blanks trimmed off.
    fn line_content_end(&self, index: usize) -> usize {
        let mut i = index;
        while !matches!(self.char_at(i), None | Some('\n' | '\r')) {
            i += 1;
        }
        while i > index && matches!(self.source[i - 1], ' ' | '\t') {
            i -= 1;
        }
        i
    }

    fn next_line_start(&self, index: usize) -> Option<usize> {
        let mut i = index;
        loop {
            match self.char_at(i)? {
                '\r' if self.char_at(i + 1) == Some('\n') => return Some(i + 2),
                '\n' | '\r' => return Some(i + 1),
                _ => i += 1,
            }
        }
    }

    /// Flow collections end just past their closing bracket; block
    /// collections end where their last child ends.
    fn collection_end(
        &self,
        marker: Marker,
        close: char,
        start: usize,
        last_child_end: Option<usize>,
    ) -> usize {
        if self.char_at(marker.index()) == Some(close) {
            marker.index() + 1
        } else {
            last_child_end.unwrap_or(start).max(start)
        }
    }
}

impl MarkedEventReceiver for TreeBuilder {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        match ev {
            Event::Scalar(value, style, ..) => self.on_scalar(value, style, marker),

            Event::Alias(..) => self.on_alias(marker),

            Event::SequenceStart(..) => {
                self.stack.push(Frame::Sequence {
                    start: marker.index(),
                    items: Vec::new(),
                });
            }

            Event::SequenceEnd => {
                let Some(Frame::Sequence { start, items }) = self.stack.pop() else {
                    log::warn!("Unbalanced sequence end at offset {}", marker.index());
                    return;
                };
                let first_start = items.iter().find_map(Node::range).map(|r| r.start);
                let start = first_start.map_or(start, |first| first.min(start));
                let last_end = items.iter().rev().find_map(Node::range).map(|r| r.end);
                let end = self.collection_end(marker, ']', start, last_end);
                self.push_complete(Node::Sequence {
                    range: Some(Range::new(start, end)),
                    items,
                });
            }

            Event::MappingStart(..) => {
                self.stack.push(Frame::Mapping {
                    start: marker.index(),
                    entries: Vec::new(),
                    pending_key: None,
                });
            }

            Event::MappingEnd => {
                let Some(Frame::Mapping {
                    start,
                    mut entries,
                    pending_key,
                }) = self.stack.pop()
                else {
                    log::warn!("Unbalanced mapping end at offset {}", marker.index());
                    return;
                };
                if let Some(key) = pending_key {
                    entries.push(MappingEntry::new(key, None));
                }
                // Block mappings are marked at the first `:`, not the first key
                let first_start = entries
                    .iter()
                    .find_map(|entry| {
                        entry
                            .key
                            .range()
                            .or_else(|| entry.value.as_ref().and_then(Node::range))
                    })
                    .map(|r| r.start);
                let start = first_start.map_or(start, |first| first.min(start));
                let last_end = entries
                    .iter()
                    .rev()
                    .find_map(|entry| {
                        entry
                            .value
                            .as_ref()
                            .and_then(Node::range)
                            .or_else(|| entry.key.range())
                    })
                    .map(|r| r.end);
                let end = self.collection_end(marker, '}', start, last_end);
                self.push_complete(Node::Mapping {
                    range: Some(Range::new(start, end)),
                    entries,
                });
            }

            _ => {}
        }
    }
}

fn is_flow_indicator(ch: char) -> bool {
    matches!(ch, ',' | '[' | ']' | '{' | '}')
}
