// SPDX-License-Identifier: MIT OR Apache-2.0

//! # In-Memory Sink
//!
//! Captures finished lines in memory instead of writing them to stderr, for:
//!
//! - Unit testing code that logs
//! - Programmatically examining log output
//! - Embedding the logger where stderr is redirected or unavailable

use crate::Severity;
use crate::sink::Sink;
use std::sync::Mutex;

/// A sink that stores each line in a `Vec<String>`.
///
/// # Example
///
/// ```rust
/// use sevlog::{InMemorySink, Logger, LoggerConfig, Severity};
/// use std::sync::Arc;
///
/// let sink = Arc::new(InMemorySink::new());
/// let logger = Logger::new(LoggerConfig::default(), sink.clone());
///
/// logger.warn("app", "disk at %d%%", &sevlog::args![93]);
///
/// assert_eq!(sink.drain_logs(), "WARN app: disk at 93%");
/// assert_eq!(sink.drain_logs(), "");
/// ```
#[derive(Debug)]
pub struct InMemorySink {
    lines: Mutex<Vec<String>>,
}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// - Debug: Derived, required by Sink
// - Default: Implemented with obvious zero-value (empty buffer)
// - Clone: NOT implemented - a copy would silently stop seeing new lines
// - PartialEq/Eq/Hash: NOT implemented - comparing mutex state is not meaningful
// - Send/Sync: Automatically implemented due to Mutex usage (required for Sink trait)

impl Default for InMemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySink {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(Vec::new()),
        }
    }

    /// Removes every captured line, returning them in the order they were written.
    pub fn drain_lines(&self) -> Vec<String> {
        // a poisoned lock still holds intact lines
        let mut lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *lines)
    }

    /// Removes every captured line, joined by newlines.
    pub fn drain_logs(&self) -> String {
        self.drain_lines().join("\n")
    }

    /// Number of lines currently held.
    pub fn len(&self) -> usize {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Sink for InMemorySink {
    fn write_line(&self, _severity: Severity, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn keeps_lines_in_order() {
        let sink = InMemorySink::new();
        sink.write_line(Severity::Info, "first");
        sink.write_line(Severity::Error, "second");
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.drain_lines(), vec!["first", "second"]);
        assert!(sink.is_empty());
    }

    #[test]
    fn collects_from_many_threads() {
        let sink = Arc::new(InMemorySink::new());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let sink = sink.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        sink.write_line(Severity::Debug, &format!("{t}-{i}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("writer thread should finish");
        }
        assert_eq!(sink.drain_lines().len(), 100);
    }
}
