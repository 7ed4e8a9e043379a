//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod auth;
pub mod database;
pub mod logging;
pub mod server;
pub mod shutdown;
pub mod worker;

use serde::{Deserialize, Serialize};

pub use self::auth::{AuthConfig, TOKEN_KEY_SIZE};
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::server::{GrpcConfig, HttpConfig};
pub use self::shutdown::ShutdownConfig;
pub use self::worker::WorkerConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Deployment environment: `"development"` or `"production"`.
    #[serde(default = "default_environment")]
    pub environment: String,
    /// HTTP gateway settings.
    #[serde(default)]
    pub http: HttpConfig,
    /// gRPC server settings.
    #[serde(default)]
    pub grpc: GrpcConfig,
    /// Token settings.
    pub auth: AuthConfig,
    /// Session store database settings.
    pub database: DatabaseConfig,
    /// Background task processor settings.
    #[serde(default)]
    pub worker: WorkerConfig,
    /// Graceful shutdown settings.
    #[serde(default)]
    pub shutdown: ShutdownConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `BANKAUTH__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("BANKAUTH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would only fail later at runtime.
    pub fn validate(&self) -> Result<(), AppError> {
        self.auth.validate()?;
        if self.worker.concurrency == 0 {
            return Err(AppError::configuration(
                "worker.concurrency must be at least 1",
            ));
        }
        Ok(())
    }

    /// Returns `true` when running in the development environment.
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

fn default_environment() -> String {
    "development".to_string()
}
