//! Error types for YAML path resolution.

use thiserror::Error;

/// Errors that abort a path resolution request.
///
/// Finding no path is not an error: resolvers report it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The document text is not valid YAML.
    #[error("{message}")]
    Parse { message: String },

    /// The cursor position does not fit the text it was captured against.
    #[error("Position {line}:{character} is outside the document")]
    StalePosition { line: usize, character: usize },
}

impl From<yaml_rust2::ScanError> for Error {
    fn from(err: yaml_rust2::ScanError) -> Self {
        Error::Parse {
            message: err.to_string(),
        }
    }
}

/// Result type for resolution operations.
pub type Result<T> = std::result::Result<T, Error>;
