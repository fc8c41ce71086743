//! Tracing setup for the farmyard binary

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize tracing with an optional level override
///
/// The override wins over `RUST_LOG`; with neither set, `info` applies.
pub fn init_tracing(log_level: Option<&str>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    fmt().with_env_filter(filter).with_target(false).init();
}
