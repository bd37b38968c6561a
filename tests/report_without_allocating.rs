// SPDX-License-Identifier: MIT OR Apache-2.0

//! The unconditional error report must reach a sink without touching the heap, since it is the
//! path taken when a line buffer could not be allocated.
#![cfg(unix)]

use sevlog::{Logger, LoggerConfig, Severity, Sink, SystemError};
use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::fmt::{Arguments, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

struct CountingAlloc;

static ALLOCATIONS: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    static COUNTING: Cell<bool> = const { Cell::new(false) };
}

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNTING.try_with(Cell::get).unwrap_or(false) {
            ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
        }
        // SAFETY: forwarded unchanged to the system allocator.
        unsafe { System.alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        // SAFETY: `ptr` came from `System.alloc` with this layout.
        unsafe { System.dealloc(ptr, layout) }
    }
}

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

/// Keeps the last line in a buffer reserved up front.
#[derive(Debug)]
struct ReservedSink {
    last: Mutex<String>,
}

impl Sink for ReservedSink {
    fn write_line(&self, severity: Severity, line: &str) {
        self.write_args(severity, format_args!("{line}"));
    }

    fn write_args(&self, _severity: Severity, line: Arguments<'_>) {
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        last.clear();
        let _ = last.write_fmt(line);
    }
}

#[test]
fn test_report_system_error_does_not_allocate() {
    let sink = Arc::new(ReservedSink {
        last: Mutex::new(String::with_capacity(1024)),
    });
    let logger = Logger::new(LoggerConfig::default(), sink.clone());
    let cause = SystemError::new(libc::ENOMEM);
    let expected = format!(
        "logging: ERROR out of room (errno={}: {})",
        libc::ENOMEM,
        cause.description()
    );

    COUNTING.set(true);
    logger.report_system_error("logging", "out of room", cause);
    COUNTING.set(false);

    assert_eq!(ALLOCATIONS.load(Ordering::Relaxed), 0);
    assert_eq!(*sink.last.lock().unwrap(), expected);
}
