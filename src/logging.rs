use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber. Logs go to stderr so stdout carries only
/// command output. Verbosity comes from `RUST_LOG` (default: `warn`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_writer(std::io::stderr)
        .init();
}
