//! Session store contract.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::model::Session;

/// Errors returned by a [`SessionStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("session not found")]
    NotFound,

    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Read access to persisted sessions.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Loads the session with the given ID.
    async fn get_session(&self, id: Uuid) -> Result<Session, StoreError>;
}
