//! Logging setup utilities for the kinkyu binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The default directives cover the calling binary's crate and this shared
/// crate; the `RUST_LOG` environment variable overrides them entirely.
///
/// # Arguments
///
/// * `app_target` - The tracing target of the calling crate (e.g., "kinkyu_server")
/// * `default_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use kinkyu_shared::logger::setup_logger;
///
/// setup_logger("kinkyu_server", "debug");
/// ```
pub fn setup_logger(app_target: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}={},kinkyu_shared={}",
                    app_target, default_log_level, default_log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
