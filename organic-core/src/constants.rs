/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable controlling tracing filters.
pub const LOG_ENV_VAR: &str = "ORGANIC_LOG";

/// Prefix for configuration environment overrides.
pub const ENV_PREFIX: &str = "ORGANIC_";

/// Name of the dedicated scheduler thread.
pub const SCHEDULER_THREAD_NAME: &str = "organic-scoring";
