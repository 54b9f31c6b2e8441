use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Filtering comes from `RUST_LOG`, `warn` by
/// default; output goes to stderr so stdout stays usable for `--json`.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
