//! Translation from `(line, character)` positions to absolute offsets.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A zero-based cursor position, as reported by an editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

impl Position {
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.character)
    }
}

/// Converts a position into a character offset within `text`.
///
/// `\n`, `\r\n` and a lone `\r` all end a line, and each is counted at its
/// real width so offsets line up with the parser's character indices. The
/// column may point at the end of the line but not past it.
///
/// # Errors
///
/// Returns `Error::StalePosition` when the line or column does not exist in
/// `text`, which usually means the text changed after the position was taken.
///
/// # Example
///
/// ```
/// use yamlpath_copier::yamlpath::{offset_at, Position};
///
/// assert_eq!(offset_at("a: 1\nb: 2", Position::new(1, 3)).unwrap(), 8);
/// assert!(offset_at("a: 1", Position::new(4, 0)).is_err());
/// ```
pub fn offset_at(text: &str, position: Position) -> Result<usize> {
    let stale = || Error::StalePosition {
        line: position.line,
        character: position.character,
    };

    let mut chars = text.chars().peekable();
    let mut offset = 0;
    let mut line = 0;

    while line < position.line {
        match chars.next() {
            None => return Err(stale()),
            Some('\r') => {
                offset += 1;
                if chars.peek() == Some(&'\n') {
                    chars.next();
                    offset += 1;
                }
                line += 1;
            }
            Some('\n') => {
                offset += 1;
                line += 1;
            }
            Some(_) => offset += 1,
        }
    }

    let line_len = chars.take_while(|ch| !matches!(ch, '\n' | '\r')).count();
    if position.character > line_len {
        return Err(stale());
    }

    Ok(offset + position.character)
}
