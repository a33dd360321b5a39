//! YAML documents as syntax trees annotated with source ranges.
//!
//! The parser walks `yaml-rust2` events and records, for every node, the span
//! of characters it occupies in the original text.

pub mod node;
pub mod parser;

pub use node::{MappingEntry, Node, NodeKind, Range, YamlDocument};
pub use parser::parse_yaml;
