//! Token maker contract.

use chrono::Duration;
use thiserror::Error;

use bankauth_core::error::{AppError, ErrorKind};

use super::payload::Payload;

/// Errors produced while creating or verifying tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Authentication or decoding failed: tampered, truncated, foreign key.
    #[error("token is invalid")]
    InvalidToken,

    /// The token authenticated but its expiry has passed.
    #[error("token has expired")]
    ExpiredToken,

    /// The symmetric key does not have the length the cipher requires.
    #[error("invalid key size: must be exactly {expected} bytes, got {actual}")]
    InvalidKeySize {
        /// Required key length.
        expected: usize,
        /// Supplied key length.
        actual: usize,
    },

    /// The lifetime is not positive or its expiry cannot be represented.
    #[error("token duration is out of range")]
    InvalidDuration,

    /// Serialization or encryption of a payload failed.
    #[error("failed to seal token: {0}")]
    Seal(String),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InvalidToken | TokenError::ExpiredToken => {
                AppError::with_source(ErrorKind::Authentication, "authentication failed", err)
            }
            TokenError::InvalidKeySize { .. } => {
                AppError::with_source(ErrorKind::Configuration, err.to_string(), err)
            }
            TokenError::InvalidDuration | TokenError::Seal(_) => {
                AppError::with_source(ErrorKind::Internal, "failed to issue token", err)
            }
        }
    }
}

/// Creates and verifies opaque bearer tokens.
///
/// Implementations hold only immutable key material and are safe to share
/// across any number of concurrent requests.
pub trait TokenMaker: Send + Sync + std::fmt::Debug {
    /// Issues a token for `username` that expires after `duration`.
    fn create_token(&self, username: &str, duration: Duration)
    -> Result<(String, Payload), TokenError>;

    /// Authenticates `token` and returns its payload if it has not expired.
    fn verify_token(&self, token: &str) -> Result<Payload, TokenError>;
}
