// SPDX-License-Identifier: MIT OR Apache-2.0

//! Explicit operating-system error context.
//!
//! Instead of reading an ambient "last error" indicator at render time, callers hand the error
//! they observed to the log call. A code of zero means "no error" and never produces a suffix.

#[cfg(unix)]
use std::ffi::CStr;
use std::fmt::{self, Display};
use std::io;

/// `errno` value reported when a line buffer cannot be allocated.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) const ENOMEM: i32 = libc::ENOMEM;
#[cfg(target_arch = "wasm32")]
pub(crate) const ENOMEM: i32 = 12;

/// An `errno`-style operating system error code.
///
/// ```
/// use sevlog::SystemError;
/// let err = std::io::Error::from_raw_os_error(2);
/// let sys = SystemError::from(&err);
/// assert_eq!(sys.code(), 2);
/// assert!(sys.is_set());
/// assert!(!sys.description().contains("os error"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SystemError {
    code: i32,
}

impl SystemError {
    /// No pending error.
    pub const NONE: SystemError = SystemError { code: 0 };

    pub const fn new(code: i32) -> Self {
        Self { code }
    }

    /// Captures the calling thread's last OS error.
    pub fn last_os_error() -> Self {
        Self::from(&io::Error::last_os_error())
    }

    pub const fn code(self) -> i32 {
        self.code
    }

    pub const fn is_set(self) -> bool {
        self.code != 0
    }

    /// The platform's human-readable text for this code, as `strerror` would print it.
    pub fn description(self) -> String {
        let mut text = String::new();
        let _ = self.write_description(&mut text);
        text
    }

    /// Writes the description into `out` without allocating.
    #[cfg(unix)]
    fn write_description<W: fmt::Write>(self, out: &mut W) -> fmt::Result {
        let mut buf = [0 as libc::c_char; 256];
        // SAFETY: `buf` is valid for writes of its whole length.
        unsafe { libc::strerror_r(self.code, buf.as_mut_ptr(), buf.len()) };
        buf[buf.len() - 1] = 0;
        // SAFETY: `buf` is NUL-terminated.
        let text = unsafe { CStr::from_ptr(buf.as_ptr()) };
        if text.is_empty() {
            return write!(out, "Unknown error {}", self.code);
        }
        for chunk in text.to_bytes().utf8_chunks() {
            out.write_str(chunk.valid())?;
            if !chunk.invalid().is_empty() {
                out.write_char(char::REPLACEMENT_CHARACTER)?;
            }
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn write_description<W: fmt::Write>(self, out: &mut W) -> fmt::Result {
        let text = io::Error::from_raw_os_error(self.code).to_string();
        let suffix = format!(" (os error {})", self.code);
        out.write_str(text.strip_suffix(suffix.as_str()).unwrap_or(&text))
    }
}

/// Takes the raw OS code; errors that did not originate from the OS carry none.
impl From<&io::Error> for SystemError {
    fn from(err: &io::Error) -> Self {
        Self::new(err.raw_os_error().unwrap_or(0))
    }
}

impl From<io::Error> for SystemError {
    fn from(err: io::Error) -> Self {
        Self::from(&err)
    }
}

impl From<i32> for SystemError {
    fn from(code: i32) -> Self {
        Self::new(code)
    }
}

/// Renders as `errno=<code>: <description>`, the body of the parenthesised suffix.
impl Display for SystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "errno={}: ", self.code)?;
        self.write_description(f)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn description_matches_io_error_text() {
        let sys = SystemError::new(libc::ENOENT);
        let full = io::Error::from_raw_os_error(libc::ENOENT).to_string();
        assert!(full.starts_with(&sys.description()));
        assert!(!sys.description().is_empty());
    }

    #[test]
    fn non_os_errors_are_not_set() {
        let err = io::Error::new(io::ErrorKind::Other, "custom");
        assert!(!SystemError::from(&err).is_set());
        assert_eq!(SystemError::default(), SystemError::NONE);
    }

    #[test]
    fn unknown_codes_still_describe_themselves() {
        let sys = SystemError::new(99_999);
        assert!(!sys.description().is_empty());
        assert!(sys.to_string().starts_with("errno=99999: "));
    }

    #[test]
    fn displays_as_suffix_body() {
        let sys = SystemError::new(libc::ENOMEM);
        let shown = sys.to_string();
        assert!(shown.starts_with(&format!("errno={}: ", libc::ENOMEM)));
        assert!(shown.ends_with(&sys.description()));
    }
}
