use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Logs go to stderr so they stay out of the listing.
///
/// Uses `RUST_LOG` when set, otherwise only warnings and errors are shown.
/// Calling it again is a no-op.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
