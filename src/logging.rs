//! Tracing setup
//!
//! Non-blocking daily rolling file in the configured log directory, plus an
//! optional console layer on stderr. The returned guard must outlive the program's
//! last log line.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log file prefix inside the log directory
pub const LOG_FILE_PREFIX: &str = "youchat.log";

/// Build the filter: explicit directive, then `RUST_LOG`, then the config default.
pub fn build_filter(explicit: Option<&str>, fallback: &str) -> EnvFilter {
    if let Some(directive) = explicit {
        if let Ok(filter) = EnvFilter::try_new(directive) {
            return filter;
        }
    }
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber
///
/// The console layer is only added when `console` is set so log lines do
/// not interleave with command output. Returns `None` if a subscriber was
/// already installed or no file writer could be created.
pub fn init(log_dir: &Path, filter: EnvFilter, console: bool) -> Option<WorkerGuard> {
    let appender = std::fs::create_dir_all(log_dir)
        .map_err(|e| e.to_string())
        .and_then(|_| {
            RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(LOG_FILE_PREFIX)
                .build(log_dir)
                .map_err(|e| e.to_string())
        });

    let (file_layer, guard) = match appender {
        Ok(appender) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(non_blocking).with_ansi(false)),
                Some(guard),
            )
        }
        Err(e) => {
            eprintln!("Warning: file logging disabled ({}): {}", log_dir.display(), e);
            (None, None)
        }
    };
    let console_layer =
        console.then(|| fmt::layer().with_writer(std::io::stderr).with_target(false));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .ok()?;
    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_directive_wins() {
        let filter = build_filter(Some("youchat=trace"), "warn");
        assert!(filter.to_string().contains("youchat=trace"));
    }
}
