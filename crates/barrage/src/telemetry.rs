//! Logging bootstrap for binaries.

use tracing_subscriber::EnvFilter;

/// Environment variable read for the log filter.
pub const LOG_ENV: &str = "BARRAGE_LOG";

/// Installs a `fmt` subscriber.
///
/// The filter comes from `BARRAGE_LOG`, then `default_level`; an invalid
/// directive falls back to `info`. Returns `false` if a global subscriber
/// was already installed.
pub fn init(default_level: &str) -> bool {
    let level = std::env::var(LOG_ENV).unwrap_or_else(|_| default_level.to_string());
    let filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!(level = %level, "telemetry initialized");
    }
    installed
}
