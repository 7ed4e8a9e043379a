//! Identity payload embedded in every access and refresh token.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::maker::TokenError;

/// Claims carried inside a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// Unique token ID, fresh per issuance. For refresh tokens this is also
    /// the ID of the session the token belongs to.
    pub id: Uuid,
    /// Username the token was issued for.
    pub username: String,
    /// Issuance time.
    pub issued_at: DateTime<Utc>,
    /// Expiration time.
    pub expires_at: DateTime<Utc>,
}

impl Payload {
    /// Builds a payload for `username` valid for `duration` from `now`.
    pub fn new(username: &str, duration: Duration, now: DateTime<Utc>) -> Result<Self, TokenError> {
        if duration <= Duration::zero() {
            return Err(TokenError::InvalidDuration);
        }

        let expires_at = now
            .checked_add_signed(duration)
            .ok_or(TokenError::InvalidDuration)?;

        Ok(Self {
            id: Uuid::new_v4(),
            username: username.to_string(),
            issued_at: now,
            expires_at,
        })
    }

    /// Checks the payload against `now`.
    ///
    /// Only called on payloads that already passed authentication.
    pub fn validate_at(&self, now: DateTime<Utc>) -> Result<(), TokenError> {
        if self.expires_at <= self.issued_at {
            return Err(TokenError::InvalidToken);
        }
        if now > self.expires_at {
            return Err(TokenError::ExpiredToken);
        }
        Ok(())
    }
}
