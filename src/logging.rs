#![cfg(feature = "std")]

use std::env;

use log::LevelFilter;

/// Environment variable holding the log level (`error`, `warn`, `info`, `debug`, `trace`).
pub const LOG_ENV: &str = "NETSHIPS_LOG";

/// Initialize logging with a level taken from the `NETSHIPS_LOG` environment variable.
/// Defaults to `info` if the variable is not set or invalid. Safe to call more than once.
pub fn init_logging() {
    let level = env::var(LOG_ENV)
        .ok()
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(LevelFilter::Info);
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .try_init();
}
