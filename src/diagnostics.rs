//! Trace sinks for the path resolver.
//!
//! The resolver reports each step of its search to a `DiagnosticSink` that
//! the caller hands in, instead of writing to a global logger. This keeps
//! resolution a pure function of its inputs while still letting the binary
//! surface the search at debug level.

use std::cell::RefCell;
use std::fmt;

/// Receives trace messages from the resolver.
pub trait DiagnosticSink {
    /// Records one step of the search at the given tree depth.
    fn trace(&self, depth: usize, message: fmt::Arguments<'_>);
}

/// Forwards traces to the `log` crate at debug level, indented by depth.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn trace(&self, depth: usize, message: fmt::Arguments<'_>) {
        log::debug!("{}{}", "  ".repeat(depth), message);
    }
}

/// Discards all traces.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn trace(&self, _depth: usize, _message: fmt::Arguments<'_>) {}
}

/// Keeps every trace in memory, mostly useful in tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    lines: RefCell<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded lines, each prefixed with its indentation.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn trace(&self, depth: usize, message: fmt::Arguments<'_>) {
        self.lines
            .borrow_mut()
            .push(format!("{}{}", "  ".repeat(depth), message));
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn trace(&self, depth: usize, message: fmt::Arguments<'_>) {
        (**self).trace(depth, message)
    }
}
