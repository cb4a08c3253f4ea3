//! Log output for the command-line tools.
//!
//! The library only emits `tracing` events; installing a subscriber is left to the
//! process, once, at startup.

use tracing_subscriber::EnvFilter;

/// Accepted values for `--log-level`.
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Install a human-readable subscriber writing to stderr.
///
/// Lines carry timestamp, level, source file and line. `RUST_LOG` overrides `level`.
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .try_init();
}
