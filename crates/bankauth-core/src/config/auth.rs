//! Token configuration.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Required length in bytes of the symmetric token key (AES-256).
pub const TOKEN_KEY_SIZE: usize = 32;

/// Token signing and lifetime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Symmetric key used to encrypt and authenticate tokens. Must be exactly
    /// [`TOKEN_KEY_SIZE`] bytes long.
    pub token_symmetric_key: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_minutes: i64,
    /// Refresh token TTL in hours.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_hours: i64,
}

impl AuthConfig {
    /// Builds a config for `key` with default lifetimes.
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            token_symmetric_key: key.into(),
            access_token_ttl_minutes: default_access_ttl(),
            refresh_token_ttl_hours: default_refresh_ttl(),
        }
    }

    /// Validates key length and token lifetimes.
    pub fn validate(&self) -> Result<(), AppError> {
        let len = self.token_symmetric_key.len();
        if len != TOKEN_KEY_SIZE {
            return Err(AppError::configuration(format!(
                "auth.token_symmetric_key must be exactly {TOKEN_KEY_SIZE} bytes, got {len}"
            )));
        }
        self.access_token_duration()?;
        self.refresh_token_duration()?;
        Ok(())
    }

    /// Lifetime of access tokens.
    pub fn access_token_duration(&self) -> Result<Duration, AppError> {
        token_ttl(
            "auth.access_token_ttl_minutes",
            self.access_token_ttl_minutes,
            Duration::try_minutes(self.access_token_ttl_minutes),
        )
    }

    /// Lifetime of refresh tokens.
    pub fn refresh_token_duration(&self) -> Result<Duration, AppError> {
        token_ttl(
            "auth.refresh_token_ttl_hours",
            self.refresh_token_ttl_hours,
            Duration::try_hours(self.refresh_token_ttl_hours),
        )
    }
}

/// A TTL must be positive and yield an expiry chrono can represent.
fn token_ttl(field: &str, raw: i64, duration: Option<Duration>) -> Result<Duration, AppError> {
    if raw <= 0 {
        return Err(AppError::configuration(format!("{field} must be positive")));
    }
    match duration {
        Some(duration) if Utc::now().checked_add_signed(duration).is_some() => Ok(duration),
        _ => Err(AppError::configuration(format!(
            "{field} is too large: {raw}"
        ))),
    }
}

fn default_access_ttl() -> i64 {
    15
}

fn default_refresh_ttl() -> i64 {
    24
}
