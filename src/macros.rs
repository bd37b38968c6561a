// SPDX-License-Identifier: MIT OR Apache-2.0

//! Variadic call sites.
//!
//! The `log_*!` macros are the variadic form of the process-wide logging functions: they check the
//! threshold first, and only then capture their arguments into an [`Args`](crate::Args) and forward
//! it, so a filtered call allocates nothing and evaluates none of its arguments.
//!
//! ```
//! let path = "/var/data";
//! sevlog::log_info!("loader", "scanning %s", path);
//!
//! let err = std::io::Error::from_raw_os_error(2);
//! sevlog::log_error!(cause: &err, "loader", "cannot open %s", path);
//! ```

/// Captures values into an [`Args`](crate::Args) list.
///
/// ```
/// let args = sevlog::args!["disk", 3u8, -1, 0.5, 'x', true];
/// assert_eq!(args.len(), 6);
/// assert!(sevlog::args![].is_empty());
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Args::new()
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::Args::from(::std::vec![$($crate::Arg::from($arg)),+])
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($severity:expr, cause: $cause:expr, $appname:expr, $format:expr $(, $arg:expr)* $(,)?) => {{
        let __logger = $crate::global::global();
        if __logger.enabled($severity) {
            __logger.log_caused(
                $severity,
                $appname,
                $format,
                &$crate::args![$($arg),*],
                $crate::SystemError::from($cause),
            );
        }
    }};
    ($severity:expr, $appname:expr, $format:expr $(, $arg:expr)* $(,)?) => {{
        let __logger = $crate::global::global();
        if __logger.enabled($severity) {
            __logger.log($severity, $appname, $format, &$crate::args![$($arg),*]);
        }
    }};
}

/// Logs at DEBUG through the process-wide logger: `log_debug!(appname, format, args...)`.
#[macro_export]
macro_rules! log_debug {
    ($($tokens:tt)*) => {
        $crate::__log_at!($crate::Severity::Debug, $($tokens)*)
    };
}

/// Logs at INFO through the process-wide logger: `log_info!(appname, format, args...)`.
#[macro_export]
macro_rules! log_info {
    ($($tokens:tt)*) => {
        $crate::__log_at!($crate::Severity::Info, $($tokens)*)
    };
}

/// Logs at WARN through the process-wide logger: `log_warn!(appname, format, args...)`.
#[macro_export]
macro_rules! log_warn {
    ($($tokens:tt)*) => {
        $crate::__log_at!($crate::Severity::Warn, $($tokens)*)
    };
}

/**
Logs at ERROR through the process-wide logger.

`log_error!(appname, format, args...)`, or `log_error!(cause: err, appname, format, args...)` to
append the system error `err` (anything convertible into a [`SystemError`](crate::SystemError), such
as `&std::io::Error` or a raw code).
*/
#[macro_export]
macro_rules! log_error {
    ($($tokens:tt)*) => {
        $crate::__log_at!($crate::Severity::Error, $($tokens)*)
    };
}

/// Logs at FATAL through the process-wide logger. Accepts a leading `cause: err` like
/// [`log_error!`]. Does not terminate the process.
#[macro_export]
macro_rules! log_fatal {
    ($($tokens:tt)*) => {
        $crate::__log_at!($crate::Severity::Fatal, $($tokens)*)
    };
}
