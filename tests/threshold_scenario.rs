// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end behavior of independent loggers capturing into memory.
#![cfg(not(target_arch = "wasm32"))]

use sevlog::{Args, InMemorySink, Logger, LoggerConfig, Severity, SystemError, args};
use std::sync::Arc;

fn capture() -> (Logger, Arc<InMemorySink>) {
    let sink = Arc::new(InMemorySink::new());
    (Logger::new(LoggerConfig::default(), sink.clone()), sink)
}

#[test]
fn test_info_threshold_scenario() {
    let (logger, sink) = capture();
    logger.set_threshold(Severity::Info);

    logger.debug("app", "hello", &Args::new());
    assert!(sink.is_empty());

    logger.info("app", "hello", &Args::new());
    assert_eq!(sink.drain_logs(), "INFO app: hello");

    logger.error("app", "failed: %s", &args!["disk"]);
    assert_eq!(sink.drain_logs(), "ERROR app: failed: disk");
}

#[test]
fn test_plain_message_has_no_suffix() {
    let (logger, sink) = capture();
    for severity in Severity::ALL {
        logger.log(severity, "svc", "plain text", &Args::new());
    }
    assert_eq!(
        sink.drain_lines(),
        vec![
            "DEBUG svc: plain text",
            "INFO svc: plain text",
            "WARN svc: plain text",
            "ERROR svc: plain text",
            "FATAL svc: plain text",
        ]
    );
}

#[test]
fn test_clamped_thresholds_match_their_bounds() {
    let (low, low_sink) = capture();
    let (debug, debug_sink) = capture();
    low.set_threshold_raw(-100);
    debug.set_threshold(Severity::Debug);

    let (high, high_sink) = capture();
    let (fatal, fatal_sink) = capture();
    high.set_threshold_raw(100);
    fatal.set_threshold(Severity::Fatal);

    for severity in Severity::ALL {
        for logger in [&low, &debug, &high, &fatal] {
            logger.log(severity, "app", "%s", &args![severity.as_str()]);
        }
    }
    assert_eq!(low_sink.drain_lines(), debug_sink.drain_lines());
    assert_eq!(high_sink.drain_lines(), fatal_sink.drain_lines());
}

#[test]
fn test_io_error_context() {
    let (logger, sink) = capture();
    let err = std::fs::File::open("/definitely/not/here/sevlog").unwrap_err();
    let cause = SystemError::from(&err);
    assert_eq!(cause.code(), libc::ENOENT);

    logger.log_caused(Severity::Warn, "loader", "open failed", &Args::new(), cause);
    logger.log_caused(Severity::Error, "loader", "open failed", &Args::new(), cause);

    let lines = sink.drain_lines();
    assert_eq!(lines[0], "WARN loader: open failed");
    assert_eq!(
        lines[1],
        format!(
            "ERROR loader: open failed (errno={}: {})",
            libc::ENOENT,
            cause.description()
        )
    );
}

#[test]
fn test_long_message_is_truncated_and_reported() {
    let (logger, sink) = capture();
    let long = "x".repeat(250);
    logger.info("app", "%s", &args![long.as_str()]);

    let lines = sink.drain_lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], format!("INFO app: {}", "x".repeat(200)));
    assert_eq!(lines[1], "WARN logging: Log line was truncated by 50 chars");
}
