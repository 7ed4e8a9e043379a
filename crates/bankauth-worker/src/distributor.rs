//! Task distribution.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

use bankauth_core::error::AppError;

use crate::task::Task;

/// Hands tasks to the processor.
#[async_trait]
pub trait TaskDistributor: Send + Sync + std::fmt::Debug {
    /// Enqueue a task. Waits while the queue is full.
    async fn enqueue(&self, task: Task) -> Result<(), AppError>;
}

/// Receiving half of an in-process task queue.
pub type TaskReceiver = mpsc::Receiver<Task>;

/// Distributor backed by a bounded in-process channel.
#[derive(Debug, Clone)]
pub struct ChannelTaskDistributor {
    sender: mpsc::Sender<Task>,
}

/// Creates a bounded queue holding at most `capacity` pending tasks.
pub fn task_channel(capacity: usize) -> (ChannelTaskDistributor, TaskReceiver) {
    let (sender, receiver) = mpsc::channel(capacity.max(1));
    (ChannelTaskDistributor { sender }, receiver)
}

#[async_trait]
impl TaskDistributor for ChannelTaskDistributor {
    async fn enqueue(&self, task: Task) -> Result<(), AppError> {
        let id = task.id;
        let task_type = task.task_type.clone();

        self.sender
            .send(task)
            .await
            .map_err(|_| AppError::internal("Task processor is not accepting tasks"))?;

        debug!(task_id = %id, task_type = %task_type, "Enqueued task");
        Ok(())
    }
}
