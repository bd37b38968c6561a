// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::Severity;
use crate::sink::Sink;

/**
The default sink: the process's diagnostic stream.

Each line goes out in one locked write, so lines from concurrent callers may interleave with each other
but are never split.
 */
#[derive(Debug, Clone)]
pub struct StdErrorSink {}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// - Debug/Clone: Already derived - appropriate for zero-sized struct
// - Copy: Implemented - safe for zero-sized struct with no heap allocation
// - PartialEq/Eq: Implemented - all instances are equivalent (zero-sized)
// - Default: Implemented - provides convenient zero-argument constructor
// - Display: NOT implemented - no meaningful string representation for stderr
// - Send/Sync: Automatically implemented - zero-sized struct is always thread-safe

impl Copy for StdErrorSink {}

impl PartialEq for StdErrorSink {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for StdErrorSink {}

impl Default for StdErrorSink {
    fn default() -> Self {
        Self::new()
    }
}

impl StdErrorSink {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Sink for StdErrorSink {
    fn write_line(&self, severity: Severity, line: &str) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            use std::io::Write;
            let _ = severity;
            let mut lock = std::io::stderr().lock();
            // a diagnostic stream that refuses output has nowhere left to report to
            let _ = lock
                .write_all(line.as_bytes())
                .and_then(|()| lock.write_all(b"\n"));
        }
        #[cfg(target_arch = "wasm32")]
        {
            let msg = wasm_bindgen::JsValue::from_str(line);
            match severity {
                Severity::Debug => web_sys::console::debug_1(&msg),
                Severity::Info => web_sys::console::info_1(&msg),
                Severity::Warn => web_sys::console::warn_1(&msg),
                Severity::Error | Severity::Fatal => web_sys::console::error_1(&msg),
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn write_args(&self, _severity: Severity, line: std::fmt::Arguments<'_>) {
        use std::io::Write;
        let mut lock = std::io::stderr().lock();
        let _ = lock
            .write_fmt(line)
            .and_then(|()| lock.write_all(b"\n"));
    }
}
