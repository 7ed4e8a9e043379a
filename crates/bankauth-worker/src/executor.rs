//! Task executor: dispatches tasks to registered handlers.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use bankauth_core::error::AppError;

use crate::task::Task;

/// Handles one task type.
#[async_trait]
pub trait TaskHandler: Send + Sync + std::fmt::Debug {
    /// The task type this handler processes.
    fn task_type(&self) -> &str;

    async fn execute(&self, task: &Task) -> Result<(), TaskExecutionError>;
}

/// Error from task execution. Tasks are never retried.
#[derive(Debug, thiserror::Error)]
pub enum TaskExecutionError {
    #[error("no handler registered for task type '{0}'")]
    UnknownType(String),

    #[error("invalid task payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("task failed: {0}")]
    Failed(String),

    #[error("internal error: {0}")]
    Internal(#[from] AppError),
}

/// Registry of task handlers keyed by task type.
#[derive(Debug, Default)]
pub struct TaskExecutor {
    handlers: HashMap<String, Arc<dyn TaskHandler>>,
}

impl TaskExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, replacing any previous handler for its type.
    pub fn register(&mut self, handler: Arc<dyn TaskHandler>) {
        let task_type = handler.task_type().to_string();
        info!(task_type = %task_type, "Registered task handler");
        self.handlers.insert(task_type, handler);
    }

    /// Execute a task with the handler registered for its type.
    pub async fn execute(&self, task: &Task) -> Result<(), TaskExecutionError> {
        let handler = self
            .handlers
            .get(&task.task_type)
            .ok_or_else(|| TaskExecutionError::UnknownType(task.task_type.clone()))?;

        handler.execute(task).await
    }

    pub fn has_handler(&self, task_type: &str) -> bool {
        self.handlers.contains_key(task_type)
    }
}
