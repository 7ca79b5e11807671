use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter; `RUST_LOG` is the fallback.
pub const LOG_LEVEL_ENV: &str = "SMART_DIET_LOG_LEVEL";

/// Install the global subscriber. Logs go to stderr so stdout stays usable for output.
pub fn init() {
    let log_env = std::env::var(LOG_LEVEL_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_new(&log_env).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .try_init();

    tracing::debug!(%log_env, "log filter");
}
