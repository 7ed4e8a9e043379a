//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt};

use bankauth_core::config::LoggingConfig;
use bankauth_core::error::AppError;

/// Output format of the global subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    /// Picks the configured format, falling back to pretty output in
    /// development and JSON everywhere else.
    pub fn resolve(configured: Option<&str>, development: bool) -> Self {
        match configured {
            Some(format) if format.eq_ignore_ascii_case("json") => Self::Json,
            Some(format) if format.eq_ignore_ascii_case("pretty") => Self::Pretty,
            _ if development => Self::Pretty,
            _ => Self::Json,
        }
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &LoggingConfig, development: bool) -> Result<(), AppError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let installed = match LogFormat::resolve(config.format.as_deref(), development) {
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .try_init(),
        LogFormat::Pretty => fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
    };

    installed.map_err(|e| AppError::configuration(format!("Failed to initialize logging: {e}")))
}
