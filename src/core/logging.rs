//! Logging configuration and initialization
//!
//! Sets up the tracing subscriber used throughout the application.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logging system with the specified level
///
/// The configured level is used unless `RUST_LOG` overrides it. Unknown
/// level names fall back to "info".
pub fn init_logging(log_level: &str) {
    let level = log_level.trim().to_lowercase();

    let final_level = match level.as_str() {
        "debug" | "info" | "warn" | "error" | "trace" => level.as_str(),
        "warning" => "warn",
        _ => "info",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(final_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
