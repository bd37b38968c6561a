// SPDX-License-Identifier: MIT OR Apache-2.0

//! Severity levels.
//!
//! Severities are totally ordered by increasing urgency, and the same type is used both to tag
//! emitted lines and as the filter threshold of a [`Logger`](crate::Logger).

use std::fmt::Display;
use std::str::FromStr;

/// The severity of a log line.
///
/// ```
/// use sevlog::Severity;
/// assert!(Severity::Debug < Severity::Fatal);
/// assert_eq!(Severity::Warn.to_string(), "WARN");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Severity {
    /// Detailed diagnostics. The most permissive threshold.
    #[default]
    Debug = 0,
    /// Progress of the application.
    Info = 1,
    /// Suspicious condition.
    Warn = 2,
    /// Runtime error. Carries system error context when available.
    Error = 3,
    /// Unrecoverable error. Carries system error context when available.
    Fatal = 4,
}

/// Returned when an integer or a name does not denote a [`Severity`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeverityError {
    #[error("Log-level {0} unknown")]
    UnknownValue(i32),
    #[error("unknown log level name {0:?}")]
    UnknownName(String),
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    /// The tag written at the start of each line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    /**
    Converts any integer into a severity, clamping out-of-range values.

    Values below [`Severity::Debug`] become `Debug`; values above [`Severity::Fatal`] become `Fatal`.
    */
    pub const fn clamped(raw: i32) -> Self {
        match raw {
            i32::MIN..=0 => Severity::Debug,
            1 => Severity::Info,
            2 => Severity::Warn,
            3 => Severity::Error,
            _ => Severity::Fatal,
        }
    }

    /// Whether lines at this severity carry system error context.
    pub const fn carries_system_error(self) -> bool {
        matches!(self, Severity::Error | Severity::Fatal)
    }

    pub(crate) const fn from_u8(raw: u8) -> Self {
        Self::clamped(raw as i32)
    }
}

impl TryFrom<i32> for Severity {
    type Error = SeverityError;

    fn try_from(raw: i32) -> Result<Self, SeverityError> {
        match raw {
            0..=4 => Ok(Self::clamped(raw)),
            other => Err(SeverityError::UnknownValue(other)),
        }
    }
}

impl From<Severity> for i32 {
    fn from(severity: Severity) -> Self {
        severity as i32
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses level names case-insensitively, for callers that read the threshold from their own
/// configuration. `WARNING` is accepted as a synonym for `WARN`.
impl FromStr for Severity {
    type Err = SeverityError;

    fn from_str(s: &str) -> Result<Self, SeverityError> {
        let name = s.trim();
        Severity::ALL
            .into_iter()
            .find(|severity| severity.as_str().eq_ignore_ascii_case(name))
            .or_else(|| name.eq_ignore_ascii_case("warning").then_some(Severity::Warn))
            .ok_or_else(|| SeverityError::UnknownName(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities_are_ordered_by_urgency() {
        for pair in Severity::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn clamped_saturates_at_both_ends() {
        assert_eq!(Severity::clamped(-7), Severity::Debug);
        assert_eq!(Severity::clamped(i32::MIN), Severity::Debug);
        assert_eq!(Severity::clamped(2), Severity::Warn);
        assert_eq!(Severity::clamped(5), Severity::Fatal);
        assert_eq!(Severity::clamped(i32::MAX), Severity::Fatal);
    }

    #[test]
    fn try_from_rejects_unknown_values() {
        assert_eq!(Severity::try_from(3), Ok(Severity::Error));
        assert_eq!(Severity::try_from(9), Err(SeverityError::UnknownValue(9)));
        assert_eq!(
            SeverityError::UnknownValue(9).to_string(),
            "Log-level 9 unknown"
        );
    }

    #[test]
    fn parses_names() {
        assert_eq!("info".parse::<Severity>(), Ok(Severity::Info));
        assert_eq!(" FATAL ".parse::<Severity>(), Ok(Severity::Fatal));
        assert_eq!("Warning".parse::<Severity>(), Ok(Severity::Warn));
        assert!("verbose".parse::<Severity>().is_err());
    }

    #[test]
    fn only_error_and_fatal_carry_system_errors() {
        let carrying: Vec<_> = Severity::ALL
            .into_iter()
            .filter(|s| s.carries_system_error())
            .collect();
        assert_eq!(carrying, vec![Severity::Error, Severity::Fatal]);
    }
}
