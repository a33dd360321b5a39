//! yamlpath-copier - resolve the YAML path under a cursor.
//!
//! Given the text of a YAML document and a zero-based `(line, character)`
//! position, this crate answers "which key/index chain leads to the node
//! under the cursor?", e.g. `services.web.ports[0]`.
//!
//! # Example
//!
//! ```
//! use yamlpath_copier::yamlpath::{find_yaml_path, Position};
//!
//! let text = "services:\n  web:\n    ports:\n      - 8080\n";
//! let path = find_yaml_path(text, Position::new(3, 9)).unwrap();
//! assert_eq!(path.unwrap().to_string(), "services.web.ports[0]");
//! ```

pub mod clipboard;
pub mod config;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod file;
pub mod logging;
pub mod yamlpath;

pub use error::{Error, Result};
