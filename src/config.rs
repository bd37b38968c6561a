// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logger configuration.
//!
//! There is no file or environment configuration: a [`LoggerConfig`] is built in code and handed to
//! [`Logger::new`](crate::Logger::new). Callers that keep the level in their own configuration can
//! parse it with [`Severity`]'s `FromStr`.

use crate::Severity;

/// Default capacity, in bytes, of the buffer a message is rendered into.
pub const DEFAULT_LINE_CAPACITY: usize = 200;

/// ```
/// use sevlog::{LoggerConfig, Severity};
/// let config = LoggerConfig::default()
///     .with_threshold(Severity::Info)
///     .with_line_capacity(80);
/// assert_eq!(config.threshold(), Severity::Info);
/// assert_eq!(config.line_capacity(), 80);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoggerConfig {
    threshold: Severity,
    line_capacity: usize,
}

impl LoggerConfig {
    pub const fn new() -> Self {
        Self {
            threshold: Severity::Debug,
            line_capacity: DEFAULT_LINE_CAPACITY,
        }
    }

    /// The initial threshold. Lines below it are discarded.
    pub const fn with_threshold(mut self, threshold: Severity) -> Self {
        self.threshold = threshold;
        self
    }

    /// The longest rendered message, in bytes, before truncation.
    pub const fn with_line_capacity(mut self, line_capacity: usize) -> Self {
        self.line_capacity = line_capacity;
        self
    }

    pub const fn threshold(&self) -> Severity {
        self.threshold
    }

    pub const fn line_capacity(&self) -> usize {
        self.line_capacity
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::new()
    }
}
