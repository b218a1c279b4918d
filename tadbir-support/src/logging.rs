//! Tracing initialization for Tadbir binaries.
//!
//! Logs go to stderr so that stdout stays reserved for the
//! settlement report. `RUST_LOG` wins over the verbosity flag
//! (e.g. `RUST_LOG=tadbir_container=trace`).

use tracing_subscriber::EnvFilter;

/// Maps a `-v` count to a default filter directive.
///
/// ```
/// use tadbir_support::logging::default_directive;
///
/// assert_eq!(default_directive(0), "warn");
/// assert_eq!(default_directive(2), "debug");
/// assert_eq!(default_directive(9), "trace");
/// ```
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global fmt subscriber.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_tracing(verbosity: u8) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
