//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# sevlog

sevlog is a minimal leveled logger.  It renders printf-style messages into a bounded buffer and writes
them, one line each, to the process's diagnostic stream.

# Levels

Five severities, ordered by urgency:

| Name  | Line tag | Carries system error context |
|-------|----------|------------------------------|
| debug | `DEBUG`  | no                           |
| info  | `INFO`   | no                           |
| warn  | `WARN`   | no                           |
| error | `ERROR`  | yes                          |
| fatal | `FATAL`  | yes                          |

A [`Logger`] writes a line only when its severity is at or above the logger's threshold.  The
threshold starts at `DEBUG` and can be changed at any time; out-of-range integer levels are clamped.

# Output

```text
INFO app: hello
ERROR app: cannot open /var/data (errno=2: No such file or directory)
app: ERROR cannot open /var/data (errno=2: No such file or directory)
```

The first two are leveled lines; the errno suffix appears only on `ERROR` and `FATAL` lines that were
given a non-zero [`SystemError`].  The third is the unconditional report written by
[`Logger::report_system_error`], which ignores the threshold.

# The API

```rust
use sevlog::{InMemorySink, Logger, LoggerConfig, Severity};
use std::sync::Arc;

let sink = Arc::new(InMemorySink::new());
let logger = Logger::new(LoggerConfig::default().with_threshold(Severity::Info), sink.clone());

logger.debug("app", "hello", &sevlog::args![]);
logger.info("app", "hello", &sevlog::args![]);
logger.error("app", "failed: %s", &sevlog::args!["disk"]);

assert_eq!(sink.drain_logs(), "INFO app: hello\nERROR app: failed: disk");
```

Arguments are captured as a typed [`Args`] list, which is checked against the template before
anything is rendered.  Wrappers can forward an `Args` unchanged.

For call sites without a logger at hand, [`global`] holds a process-wide instance and the
[`log_debug!`] … [`log_fatal!`] macros log through it.

# Failure

Logging never fails and never panics.  A malformed template, an unknown integer level, a message longer
than the buffer, or a buffer that cannot be allocated each produce a diagnostic line of their own under
the label `logging`, and the caller carries on.
*/

mod args;
mod config;
mod format;
pub mod global;
mod inmemory_sink;
mod level;
mod line_buffer;
mod log_line;
mod logger;
mod macros;
mod sink;
mod stderror_sink;
mod system_error;

pub use args::{Arg, ArgKind, Args};
pub use config::{DEFAULT_LINE_CAPACITY, LoggerConfig};
pub use format::{FormatError, Template};
pub use inmemory_sink::InMemorySink;
pub use level::{Severity, SeverityError};
pub use line_buffer::LineBuffer;
pub use log_line::{ErrorReport, LogLine};
pub use logger::{Logger, SELF_LABEL};
pub use sink::Sink;
pub use stderror_sink::StdErrorSink;
pub use system_error::SystemError;
