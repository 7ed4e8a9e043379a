//! Session record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Server-side record binding a refresh token to a user.
///
/// Created at login and blocked by operators elsewhere; this crate only
/// reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Equal to the `id` of the refresh token's payload.
    pub id: Uuid,
    pub username: String,
    /// The exact refresh token string issued for this session.
    pub refresh_token: String,
    pub user_agent: String,
    pub client_ip: String,
    pub is_blocked: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
