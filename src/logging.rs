//! Diagnostic logging setup for the binary.
//!
//! Library code only emits `tracing` events; the subscriber is installed here
//! and writes to stderr so stdout stays clean for the release summary or JSON.

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive, e.g. `git_release=debug`
pub const LOG_ENV_VAR: &str = "GIT_RELEASE_LOG";

/// Default filter for a `-v` count
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "git_release=info,warn",
        2 => "git_release=debug,info",
        _ => "trace",
    }
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1)
        .try_init();
}
