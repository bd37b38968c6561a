// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::Severity;
use std::fmt::{Arguments, Debug};

pub trait Sink: Debug + Send + Sync {
    /**
    Writes one finished line.

    `line` has no trailing newline; the sink terminates it.  `severity` is the severity the line was
    tagged with, for sinks that route by it.  Implementations must not panic when their output fails:
    a failed write is dropped.
    */
    fn write_line(&self, severity: Severity, line: &str);

    /**
    Writes one line that is still in its formatted form.

    The default renders `line` into a `String` and calls [`Sink::write_line`]. Sinks that can write
    formatted text directly should override it, so that error reports reach them without an allocation.
    */
    fn write_args(&self, severity: Severity, line: Arguments<'_>) {
        self.write_line(severity, &line.to_string());
    }
}

/*
Boilerplate notes.

# Sink

Clone, Eq, Hash, Default and Display say nothing useful about where output goes, so the trait asks only for Debug (loggers print their sink) and Send/Sync
(one sink is shared by every thread that logs).
*/
