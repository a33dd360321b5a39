//! Reading YAML documents from disk or stdin.

pub mod loader;
