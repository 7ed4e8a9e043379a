//! Task envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A unit of background work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    /// Selects the handler (e.g. `"token_renewed"`).
    pub task_type: String,
    /// Handler-specific payload.
    pub payload: Value,
    pub enqueued_at: DateTime<Utc>,
}

impl Task {
    pub fn new(task_type: impl Into<String>, payload: Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            task_type: task_type.into(),
            payload,
            enqueued_at: Utc::now(),
        }
    }
}
