use std::error::Error;

use tracing_subscriber::EnvFilter;

use crate::core::config::data::DEFAULT_LOG_LEVEL;

/// Environment variable holding a tracing filter; wins over the config file.
pub const LOG_ENV: &str = "CHARCARD_LOG";

/// Pick the filter directive: the environment first, then the configured
/// level.
pub fn filter_directive(env_value: Option<String>, configured: &str) -> String {
    env_value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| configured.to_string())
}

/// Parse a directive, falling back to the default level when it is invalid.
pub fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Install the process-wide subscriber. Logs go to stderr so command output
/// on stdout stays machine-readable.
pub fn init_logging(configured: &str) -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let directive = filter_directive(std::env::var(LOG_ENV).ok(), configured);
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(&directive))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
}
