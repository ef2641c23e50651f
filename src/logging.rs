use tracing_subscriber::EnvFilter;

/// Logs go to stderr so they never interleave with the terminal on stdout.
/// Level comes from `RUST_LOG`, defaulting to `warn`. Calling twice is a no-op.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
