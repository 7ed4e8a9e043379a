//! Audit trail for access-token renewals.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use bankauth_auth::RenewedAccessToken;

use crate::distributor::TaskDistributor;
use crate::executor::{TaskExecutionError, TaskHandler};
use crate::task::Task;

/// Task type enqueued after every successful renewal.
pub const TOKEN_RENEWED: &str = "token_renewed";

/// Payload of a [`TOKEN_RENEWED`] task. Never carries the token itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRenewedTask {
    pub session_id: Uuid,
    pub username: String,
    pub access_token_id: Uuid,
    pub expires_at: DateTime<Utc>,
    /// Transport the renewal arrived on: `"http"` or `"grpc"`.
    pub transport: String,
}

impl TokenRenewedTask {
    pub fn new(renewed: &RenewedAccessToken, transport: &str) -> Self {
        Self {
            session_id: renewed.session_id,
            username: renewed.payload.username.clone(),
            access_token_id: renewed.payload.id,
            expires_at: renewed.access_token_expires_at,
            transport: transport.to_string(),
        }
    }

    pub fn into_task(self) -> Result<Task, serde_json::Error> {
        Ok(Task::new(TOKEN_RENEWED, serde_json::to_value(self)?))
    }
}

/// Enqueues a [`TOKEN_RENEWED`] task for `renewed`.
///
/// Failures are logged; the renewal itself has already succeeded.
pub async fn enqueue_token_renewed(
    distributor: &dyn TaskDistributor,
    renewed: &RenewedAccessToken,
    transport: &str,
) {
    let result = match TokenRenewedTask::new(renewed, transport).into_task() {
        Ok(task) => distributor.enqueue(task).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        warn!(session_id = %renewed.session_id, error = %e, "Failed to enqueue renewal audit task");
    }
}

/// Writes renewal events to the audit log target.
#[derive(Debug, Default)]
pub struct TokenRenewedAuditHandler;

#[async_trait]
impl TaskHandler for TokenRenewedAuditHandler {
    fn task_type(&self) -> &str {
        TOKEN_RENEWED
    }

    async fn execute(&self, task: &Task) -> Result<(), TaskExecutionError> {
        let event: TokenRenewedTask = serde_json::from_value(task.payload.clone())?;

        info!(
            target: "audit",
            session_id = %event.session_id,
            username = %event.username,
            access_token_id = %event.access_token_id,
            expires_at = %event.expires_at,
            transport = %event.transport,
            "Access token renewed"
        );
        Ok(())
    }
}
