use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the global `tracing` subscriber. The level comes from `RUST_LOG`
/// and defaults to `info` for this crate and `warn` for dependencies.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,kalaconnect=info,tower_http=info"));

    // Ignore the error if a subscriber is already installed (tests call this repeatedly).
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init();
}
