// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide logger and the `log_*!` macros.

#[cfg(target_arch = "wasm32")]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

use sevlog::{InMemorySink, Logger, LoggerConfig, Severity, SystemError, global};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

const EPIPE: i32 = 32;
const EIO: i32 = 5;

static SINK: OnceLock<Arc<InMemorySink>> = OnceLock::new();
static TEST_LOGGER_GUARD: Mutex<()> = Mutex::new(());

/// Installs the capturing logger once and serializes tests that share it.
fn setup() -> (MutexGuard<'static, ()>, Arc<InMemorySink>) {
    let guard = TEST_LOGGER_GUARD
        .lock()
        .unwrap_or_else(|e| e.into_inner());
    let sink = SINK
        .get_or_init(|| {
            let sink = Arc::new(InMemorySink::new());
            let logger = Logger::new(LoggerConfig::default(), sink.clone());
            assert!(global::init_global(logger).is_ok());
            sink
        })
        .clone();
    global::set_threshold(Severity::Debug);
    sink.drain_lines();
    (guard, sink)
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn test_macros_log_through_global() {
    let (_guard, sink) = setup();
    global::set_threshold(Severity::Info);

    sevlog::log_debug!("app", "hello");
    sevlog::log_info!("app", "hello");
    sevlog::log_error!("app", "failed: %s", "disk");
    sevlog::log_warn!("app", "%d of %d", 1, 2,);

    assert_eq!(
        sink.drain_lines(),
        vec!["INFO app: hello", "ERROR app: failed: disk", "WARN app: 1 of 2"]
    );
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn test_filtered_macro_does_not_evaluate_arguments() {
    let (_guard, sink) = setup();
    global::set_threshold(Severity::Fatal);

    let mut evaluated = false;
    sevlog::log_warn!("app", "%d", {
        evaluated = true;
        1
    });
    assert!(!evaluated);
    assert!(sink.is_empty());
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn test_cause_only_decorates_error_and_fatal() {
    let (_guard, sink) = setup();
    let err = std::io::Error::from_raw_os_error(EPIPE);
    let description = SystemError::from(&err).description();

    sevlog::log_info!(cause: &err, "net", "peer gone");
    sevlog::log_fatal!(cause: &err, "net", "peer %s gone", "10.0.0.2");
    sevlog::log_error!(cause: 0, "net", "nothing pending");

    assert_eq!(
        sink.drain_lines(),
        vec![
            "INFO net: peer gone".to_string(),
            format!("FATAL net: peer 10.0.0.2 gone (errno={}: {description})", EPIPE),
            "ERROR net: nothing pending".to_string(),
        ]
    );
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn test_free_functions() {
    let (_guard, sink) = setup();

    global::set_threshold_raw(99);
    assert_eq!(global::threshold(), Severity::Fatal);
    global::vlog_error("app", "dropped", &sevlog::args![]);
    global::vlog_fatal("app", "kept %c", &sevlog::args!['!']);

    global::set_threshold_raw(-1);
    assert!(global::enabled(Severity::Debug));
    global::vlog_debug("app", "%s", &sevlog::args!["debug"]);
    global::vlog_info("app", "%s", &sevlog::args!["info"]);
    global::vlog_warn("app", "%s", &sevlog::args!["warn"]);
    global::report_system_error("app", "gave up", SystemError::new(EIO));

    let lines = sink.drain_lines();
    assert_eq!(
        &lines[..4],
        &["FATAL app: kept !", "DEBUG app: debug", "INFO app: info", "WARN app: warn"]
    );
    assert!(lines[4].starts_with(&format!("app: ERROR gave up (errno={}: ", EIO)));
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn test_second_install_is_refused() {
    let (_guard, _sink) = setup();
    let refused = global::init_global(Logger::default());
    assert!(refused.is_err());
}
