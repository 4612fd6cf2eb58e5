use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Filter comes from `ASSETFINDER_LOG`, then
/// `RUST_LOG`, defaulting to `warn`. Output goes to stderr so stdout stays
/// machine-readable.
pub fn init() {
    let filter = std::env::var("ASSETFINDER_LOG")
        .ok()
        .and_then(|v| EnvFilter::try_new(v).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
