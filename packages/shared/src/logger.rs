//! Logging setup for the wscat binaries.

use std::io::IsTerminal;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default filter directive for the given targets.
///
/// Crate names are normalized the way `tracing` reports module paths
/// (`wscat-client` becomes `wscat_client`).
pub fn default_directive(targets: &[&str], default_log_level: &str) -> String {
    targets
        .iter()
        .map(|target| format!("{}={}", target.replace('-', "_"), default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// Log lines go to standard error so that standard output only carries
/// received frames. The level can be overridden with `RUST_LOG`.
///
/// # Arguments
///
/// * `targets` - Crate or binary names to enable (e.g. `["wscat-client", "wscat"]`)
/// * `default_log_level` - The default log level (e.g. "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use wscat_shared::logger::setup_logger;
///
/// setup_logger(&["wscat-client", "wscat"], "info");
/// ```
pub fn setup_logger(targets: &[&str], default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(targets, default_log_level).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(cfg!(debug_assertions)),
        )
        .init();
}
