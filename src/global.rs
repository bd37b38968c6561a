// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide logger.
//!
//! Most code should hold a [`Logger`] and pass it where it is needed. For call sites where that is
//! impractical, this module keeps one shared instance and mirrors the logger's API as free
//! functions; the `log_*!` macros log through it.
//!
//! # Default Behavior
//!
//! The first use initializes a stderr logger with [`LoggerConfig::default`], so logging works
//! without any setup. To log somewhere else, call [`init_global`] before anything logs.
//!
//! # Thread Safety
//!
//! The instance lives in a `OnceLock` and its threshold is atomic, so every function here can be
//! called from any thread. Concurrent callers may interleave their lines.
//!
//! # Examples
//!
//! ```
//! use sevlog::{global, Severity};
//!
//! global::set_threshold(Severity::Warn);
//! assert_eq!(global::threshold(), Severity::Warn);
//! sevlog::log_info!("app", "not written");
//! sevlog::log_warn!("app", "%d retries left", 2);
//! ```

use crate::args::Args;
use crate::config::LoggerConfig;
use crate::logger::Logger;
use crate::system_error::SystemError;
use crate::Severity;
use std::sync::OnceLock;

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Returns the process-wide logger, initializing it with a default stderr logger if needed.
pub fn global() -> &'static Logger {
    GLOBAL_LOGGER.get_or_init(|| Logger::stderr(LoggerConfig::default()))
}

/**
Installs `logger` as the process-wide logger.

This can succeed only once, and only before anything has used the global logger. Otherwise the logger
is handed back unchanged.

```
use sevlog::{global, InMemorySink, Logger, LoggerConfig};
use std::sync::Arc;

let sink = Arc::new(InMemorySink::new());
let installed = global::init_global(Logger::new(LoggerConfig::default(), sink.clone())).is_ok();
sevlog::log_info!("app", "hello");
if installed {
    assert_eq!(sink.drain_logs(), "INFO app: hello");
}
```
*/
pub fn init_global(logger: Logger) -> Result<(), Logger> {
    GLOBAL_LOGGER.set(logger)
}

pub fn set_threshold(threshold: Severity) {
    global().set_threshold(threshold);
}

/// Sets the process-wide threshold from an integer level, clamping it into `Debug..=Fatal`.
pub fn set_threshold_raw(raw: i32) {
    global().set_threshold_raw(raw);
}

pub fn threshold() -> Severity {
    global().threshold()
}

pub fn enabled(severity: Severity) -> bool {
    global().enabled(severity)
}

pub fn vlog_debug(appname: &str, format: &str, args: &Args<'_>) {
    global().debug(appname, format, args);
}

pub fn vlog_info(appname: &str, format: &str, args: &Args<'_>) {
    global().info(appname, format, args);
}

pub fn vlog_warn(appname: &str, format: &str, args: &Args<'_>) {
    global().warn(appname, format, args);
}

pub fn vlog_error(appname: &str, format: &str, args: &Args<'_>) {
    global().error(appname, format, args);
}

pub fn vlog_fatal(appname: &str, format: &str, args: &Args<'_>) {
    global().fatal(appname, format, args);
}

/// See [`Logger::report_system_error`].
pub fn report_system_error(appname: &str, message: &str, system_error: SystemError) {
    global().report_system_error(appname, message, system_error);
}

/// See [`Logger::report_last_os_error`].
pub fn report_last_os_error(appname: &str, message: &str) {
    let system_error = SystemError::last_os_error();
    global().report_system_error(appname, message, system_error);
}
