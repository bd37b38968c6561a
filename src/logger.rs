// SPDX-License-Identifier: MIT OR Apache-2.0

//! The logger component.
//!
//! A [`Logger`] owns its threshold and its [`Sink`]. Nothing about it is process-wide: tests and
//! embedders build as many independent loggers as they like, and [`crate::global`] holds one more
//! for call sites that want free functions.
//!
//! # Contract
//!
//! No logging call returns an error or panics. Every failure inside the logger (an unknown level,
//! a malformed template, a buffer that cannot be allocated, a truncated message) is turned into a
//! diagnostic line of its own, written under the internal label `logging`.

use crate::Severity;
use crate::args::{Arg, Args};
use crate::config::LoggerConfig;
use crate::format::{FormatError, Template};
use crate::line_buffer::LineBuffer;
use crate::log_line::{ErrorReport, LogLine};
use crate::sink::Sink;
use crate::stderror_sink::StdErrorSink;
use crate::system_error::{ENOMEM, SystemError};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// The label the logger uses when it reports its own failures.
pub const SELF_LABEL: &str = "logging";

/// Whether a truncated message is followed by a truncation warning.
///
/// The logger's own diagnostics never warn about their own truncation, so a tiny line capacity cannot
/// make one warning produce another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Caller,
    Internal,
}

/**
A leveled logger.

```
use sevlog::{InMemorySink, Logger, LoggerConfig, Severity, SystemError};
use std::sync::Arc;

let sink = Arc::new(InMemorySink::new());
let logger = Logger::new(LoggerConfig::default(), sink.clone());
logger.set_threshold(Severity::Info);

logger.debug("app", "hello", &sevlog::Args::new());
logger.info("app", "hello", &sevlog::Args::new());
logger.error("app", "failed: %s", &sevlog::args!["disk"]);

assert_eq!(sink.drain_lines(), vec!["INFO app: hello", "ERROR app: failed: disk"]);
```
*/
#[derive(Debug)]
pub struct Logger {
    threshold: AtomicU8,
    line_capacity: usize,
    sink: Arc<dyn Sink>,
}

impl Logger {
    pub fn new(config: LoggerConfig, sink: Arc<dyn Sink>) -> Self {
        Self {
            threshold: AtomicU8::new(config.threshold() as u8),
            line_capacity: config.line_capacity(),
            sink,
        }
    }

    /// A logger writing to the process's diagnostic stream.
    pub fn stderr(config: LoggerConfig) -> Self {
        Self::new(config, Arc::new(StdErrorSink::new()))
    }

    /// Sets the minimum severity of the lines that are written. Affects only later calls.
    pub fn set_threshold(&self, threshold: Severity) {
        self.threshold.store(threshold as u8, Ordering::Relaxed);
    }

    /// Sets the threshold from an integer level, clamping it into `Debug..=Fatal`.
    pub fn set_threshold_raw(&self, raw: i32) {
        self.set_threshold(Severity::clamped(raw));
    }

    pub fn threshold(&self) -> Severity {
        Severity::from_u8(self.threshold.load(Ordering::Relaxed))
    }

    /// Whether a line at `severity` would currently be written.
    #[inline]
    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.threshold()
    }

    pub fn line_capacity(&self) -> usize {
        self.line_capacity
    }

    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    /// Renders `format` with `args` and writes it at `severity`.
    pub fn log(&self, severity: Severity, appname: &str, format: &str, args: &Args<'_>) {
        self.emit(severity, appname, format, args, None, Origin::Caller);
    }

    /**
    Like [`Logger::log`], with the system error the caller observed.

    The error is appended as ` (errno=<code>: <description>)` when `severity` is ERROR or FATAL and
    the code is non-zero; otherwise it is ignored.
    */
    pub fn log_caused(
        &self,
        severity: Severity,
        appname: &str,
        format: &str,
        args: &Args<'_>,
        cause: SystemError,
    ) {
        self.emit(severity, appname, format, args, Some(cause), Origin::Caller);
    }

    /// Logs at an integer level. An integer that names no severity is itself reported as an error
    /// and nothing else is written.
    pub fn log_raw(&self, level: i32, appname: &str, format: &str, args: &Args<'_>) {
        match Severity::try_from(level) {
            Ok(severity) => self.log(severity, appname, format, args),
            Err(_) => self.self_log(
                Severity::Error,
                "Log-level %d unknown",
                &Args::from(vec![Arg::from(level)]),
            ),
        }
    }

    pub fn debug(&self, appname: &str, format: &str, args: &Args<'_>) {
        self.log(Severity::Debug, appname, format, args);
    }

    pub fn info(&self, appname: &str, format: &str, args: &Args<'_>) {
        self.log(Severity::Info, appname, format, args);
    }

    pub fn warn(&self, appname: &str, format: &str, args: &Args<'_>) {
        self.log(Severity::Warn, appname, format, args);
    }

    pub fn error(&self, appname: &str, format: &str, args: &Args<'_>) {
        self.log(Severity::Error, appname, format, args);
    }

    pub fn fatal(&self, appname: &str, format: &str, args: &Args<'_>) {
        self.log(Severity::Fatal, appname, format, args);
    }

    /**
    Writes `<appname>: ERROR <message> (errno=<code>: <description>)` regardless of the threshold.

    This path renders nothing into a bounded buffer and hands the sink formatted arguments, so it
    allocates nothing on its way to a sink that writes them directly, such as [`StdErrorSink`]. It is
    safe to use when a line buffer could not be allocated.
    */
    pub fn report_system_error(&self, appname: &str, message: &str, system_error: SystemError) {
        let report = ErrorReport {
            appname,
            message,
            system_error,
        };
        self.sink.write_args(Severity::Error, format_args!("{report}"));
    }

    /// [`Logger::report_system_error`] with the calling thread's last OS error, captured first.
    pub fn report_last_os_error(&self, appname: &str, message: &str) {
        let system_error = SystemError::last_os_error();
        self.report_system_error(appname, message, system_error);
    }

    fn self_log(&self, severity: Severity, format: &str, args: &Args<'_>) {
        self.emit(severity, SELF_LABEL, format, args, None, Origin::Internal);
    }

    fn emit(
        &self,
        severity: Severity,
        appname: &str,
        format: &str,
        args: &Args<'_>,
        cause: Option<SystemError>,
        origin: Origin,
    ) {
        if !self.enabled(severity) {
            return;
        }
        let Ok(mut buffer) = LineBuffer::acquire(self.line_capacity) else {
            self.report_system_error(
                SELF_LABEL,
                "Could not allocate memory for log line string!",
                SystemError::new(ENOMEM),
            );
            return;
        };
        if let Err(err) = Template::parse(format).and_then(|t| t.render(args, &mut buffer)) {
            drop(buffer);
            self.report_malformed(appname, &err, origin);
            return;
        }

        let mut line = LogLine::new(severity, appname, buffer.as_str());
        if let Some(cause) = cause {
            line = line.with_system_error(cause);
        }
        self.sink.write_args(severity, format_args!("{line}"));

        let overflow = buffer.overflow();
        drop(buffer);
        if overflow > 0 && origin == Origin::Caller {
            self.self_log(
                Severity::Warn,
                "Log line was truncated by %d chars",
                &Args::from(vec![Arg::from(overflow)]),
            );
        }
    }

    fn report_malformed(&self, appname: &str, err: &FormatError, origin: Origin) {
        if origin == Origin::Internal {
            // internal templates always match their arguments
            return;
        }
        self.self_log(
            Severity::Error,
            "Malformed log call from %s: %s",
            &Args::from(vec![Arg::from(appname), Arg::from(err.to_string())]),
        );
    }
}

impl Default for Logger {
    /// A stderr logger with [`LoggerConfig::default`].
    fn default() -> Self {
        Self::stderr(LoggerConfig::default())
    }
}
