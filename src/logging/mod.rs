//! Logger setup for the command-line tool.
//!
//! Messages are written to stderr as bare text so stdout carries only the
//! resolved path. `RUST_LOG`, when set, overrides the configured level.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::io::Write;

/// Installs the global logger at `level`.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(level: LevelFilter) {
    let mut builder = build(level);
    let _ = builder.try_init();
}

/// Builds the logger without installing it.
pub fn build(level: LevelFilter) -> Builder {
    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .parse_env(Env::default())
        .target(Target::Stderr)
        .format(|buf, record| writeln!(buf, "{}", record.args()));
    builder
}
