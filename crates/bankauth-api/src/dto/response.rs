//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bankauth_auth::{Payload, RenewedAccessToken};

/// Access-token renewal response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenewAccessTokenResponse {
    pub access_token: String,
    pub access_token_expires_at: DateTime<Utc>,
}

impl From<RenewedAccessToken> for RenewAccessTokenResponse {
    fn from(renewed: RenewedAccessToken) -> Self {
        Self {
            access_token: renewed.access_token,
            access_token_expires_at: renewed.access_token_expires_at,
        }
    }
}

/// Identity behind the presented access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfoResponse {
    pub username: String,
    pub token_id: Uuid,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<Payload> for UserInfoResponse {
    fn from(payload: Payload) -> Self {
        Self {
            username: payload.username,
            token_id: payload.id,
            issued_at: payload.issued_at,
            expires_at: payload.expires_at,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
