// SPDX-License-Identifier: MIT OR Apache-2.0

//! The decorated output line.
//!
//! A [`LogLine`] borrows everything it prints: it lives only between rendering the caller's message
//! and handing the finished text to a [`Sink`](crate::Sink).

use crate::Severity;
use crate::system_error::SystemError;
use std::fmt::Display;

/**
One line of output, before the trailing newline.

Leveled lines render as `<SEVERITY> <appname>: <message>`. When the severity is ERROR or FATAL and a
system error with a non-zero code is attached, ` (errno=<code>: <description>)` follows the message.

```
use sevlog::{LogLine, Severity, SystemError};
let line = LogLine::new(Severity::Info, "app", "hello");
assert_eq!(line.to_string(), "INFO app: hello");

let line = LogLine::new(Severity::Warn, "app", "odd").with_system_error(SystemError::new(2));
assert_eq!(line.to_string(), "WARN app: odd");
```
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLine<'a> {
    severity: Severity,
    appname: &'a str,
    message: &'a str,
    system_error: Option<SystemError>,
}

impl<'a> LogLine<'a> {
    pub fn new(severity: Severity, appname: &'a str, message: &'a str) -> Self {
        Self {
            severity,
            appname,
            message,
            system_error: None,
        }
    }

    pub fn with_system_error(mut self, system_error: SystemError) -> Self {
        self.system_error = Some(system_error);
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The system error that will be printed, if any.
    pub fn suffix(&self) -> Option<SystemError> {
        self.system_error
            .filter(|err| err.is_set() && self.severity.carries_system_error())
    }
}

impl Display for LogLine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.severity, self.appname, self.message)?;
        if let Some(err) = self.suffix() {
            write!(f, " ({err})")?;
        }
        Ok(())
    }
}

/// The unconditional error report: `<appname>: ERROR <message> (errno=<code>: <description>)`.
///
/// The errno is always printed, even when it is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorReport<'a> {
    pub appname: &'a str,
    pub message: &'a str,
    pub system_error: SystemError,
}

impl Display for ErrorReport<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: ERROR {} ({})",
            self.appname, self.message, self.system_error
        )
    }
}
