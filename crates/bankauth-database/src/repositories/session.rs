//! Session repository backed by the `sessions` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use bankauth_auth::session::{Session, SessionStore, StoreError};

#[derive(Debug, FromRow)]
struct SessionRow {
    id: Uuid,
    username: String,
    refresh_token: String,
    user_agent: String,
    client_ip: String,
    is_blocked: bool,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            refresh_token: row.refresh_token,
            user_agent: row.user_agent,
            client_ip: row.client_ip,
            is_blocked: row.is_blocked,
            created_at: row.created_at,
            expires_at: row.expires_at,
        }
    }
}

/// Read-only access to persisted sessions.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a session by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Session>, sqlx::Error> {
        let row = sqlx::query_as::<_, SessionRow>(
            "SELECT id, username, refresh_token, user_agent, client_ip, is_blocked, \
             created_at, expires_at FROM sessions WHERE id = $1 LIMIT 1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Session::from))
    }
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn get_session(&self, id: Uuid) -> Result<Session, StoreError> {
        match self.find_by_id(id).await {
            Ok(Some(session)) => Ok(session),
            Ok(None) => Err(StoreError::NotFound),
            Err(e) => {
                error!(session_id = %id, error = %e, "Failed to load session");
                Err(StoreError::Unavailable(e.to_string()))
            }
        }
    }
}
