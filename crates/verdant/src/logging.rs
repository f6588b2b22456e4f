use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "VERDANT_LOG";

/// Logs go to stderr, filtered by `VERDANT_LOG` (default `warn`).
pub(crate) fn setup_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
