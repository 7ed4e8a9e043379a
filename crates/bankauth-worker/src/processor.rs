//! Task processor service unit.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use bankauth_core::config::WorkerConfig;
use bankauth_core::error::AppError;
use bankauth_core::traits::{ServiceError, ServiceUnit};

use crate::distributor::TaskReceiver;
use crate::executor::TaskExecutor;
use crate::task::Task;

const UNIT_NAME: &str = "task-processor";

/// Pulls tasks off the queue and runs them with bounded concurrency.
///
/// On shutdown it stops taking tasks from the queue, gives running tasks the
/// grace period to finish, then aborts whatever is left.
#[derive(Debug)]
pub struct TaskProcessor {
    receiver: TaskReceiver,
    executor: Arc<TaskExecutor>,
    concurrency: usize,
    grace_period: Duration,
}

impl TaskProcessor {
    pub fn new(
        receiver: TaskReceiver,
        executor: Arc<TaskExecutor>,
        config: &WorkerConfig,
        grace_period: Duration,
    ) -> Self {
        Self {
            receiver,
            executor,
            concurrency: config.concurrency.max(1),
            grace_period,
        }
    }
}

#[async_trait]
impl ServiceUnit for TaskProcessor {
    fn name(&self) -> &'static str {
        UNIT_NAME
    }

    async fn serve(self: Box<Self>, shutdown: CancellationToken) -> Result<(), ServiceError> {
        let Self {
            mut receiver,
            executor,
            concurrency,
            grace_period,
        } = *self;

        info!(concurrency, "Start task processor");

        let semaphore = Arc::new(Semaphore::new(concurrency));
        let mut in_flight = JoinSet::new();

        loop {
            let permit = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                permit = semaphore.clone().acquire_owned() => permit.map_err(|e| {
                    ServiceError::failed(UNIT_NAME, AppError::internal(e.to_string()))
                })?,
            };

            let task = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                task = receiver.recv() => task,
            };

            let Some(task) = task else {
                info!("Task queue closed");
                break;
            };

            let executor = Arc::clone(&executor);
            in_flight.spawn(async move {
                let _permit = permit;
                run_task(&executor, task).await;
            });

            while in_flight.try_join_next().is_some() {}
        }

        info!("Shutting down task processor...");
        receiver.close();

        let drained = tokio::time::timeout(grace_period, async {
            while in_flight.join_next().await.is_some() {}
        })
        .await;

        if drained.is_err() {
            warn!(
                remaining = in_flight.len(),
                "Grace period elapsed, aborting running tasks"
            );
            in_flight.abort_all();
            while in_flight.join_next().await.is_some() {}
        }

        if !shutdown.is_cancelled() {
            return Err(ServiceError::failed(
                UNIT_NAME,
                AppError::service_failure("task queue closed unexpectedly"),
            ));
        }

        info!("Task processor stopped");
        Err(ServiceError::Stopped(UNIT_NAME))
    }
}

async fn run_task(executor: &TaskExecutor, task: Task) {
    match executor.execute(&task).await {
        Ok(()) => info!(task_id = %task.id, task_type = %task.task_type, "Processed task"),
        Err(e) => error!(
            task_id = %task.id,
            task_type = %task.task_type,
            error = %e,
            "Task failed"
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::distributor::{TaskDistributor, task_channel};
    use crate::executor::{TaskExecutionError, TaskHandler};

    #[derive(Debug, Default)]
    struct CountingHandler {
        count: AtomicUsize,
    }

    #[async_trait]
    impl TaskHandler for CountingHandler {
        fn task_type(&self) -> &str {
            "count"
        }

        async fn execute(&self, _task: &Task) -> Result<(), TaskExecutionError> {
            self.count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[derive(Debug)]
    struct StuckHandler;

    #[async_trait]
    impl TaskHandler for StuckHandler {
        fn task_type(&self) -> &str {
            "stuck"
        }

        async fn execute(&self, _task: &Task) -> Result<(), TaskExecutionError> {
            std::future::pending::<()>().await;
            Ok(())
        }
    }

    fn config() -> WorkerConfig {
        WorkerConfig {
            enabled: true,
            concurrency: 2,
            queue_capacity: 16,
        }
    }

    #[tokio::test]
    async fn test_processes_tasks_until_shutdown() {
        let handler = Arc::new(CountingHandler::default());
        let mut executor = TaskExecutor::new();
        executor.register(handler.clone());

        let (distributor, receiver) = task_channel(16);
        let processor = TaskProcessor::new(
            receiver,
            Arc::new(executor),
            &config(),
            Duration::from_secs(1),
        );

        let token = CancellationToken::new();
        let handle = tokio::spawn(Box::new(processor).serve(token.clone()));

        for _ in 0..5 {
            distributor
                .enqueue(Task::new("count", serde_json::Value::Null))
                .await
                .unwrap();
        }

        while handler.count.load(Ordering::SeqCst) < 5 {
            tokio::task::yield_now().await;
        }

        token.cancel();
        let result = handle.await.unwrap();
        assert!(matches!(result, Err(ServiceError::Stopped(UNIT_NAME))));
        assert!(distributor
            .enqueue(Task::new("count", serde_json::Value::Null))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_closed_queue_without_shutdown_is_failure() {
        let handler = Arc::new(CountingHandler::default());
        let mut executor = TaskExecutor::new();
        executor.register(handler.clone());

        let (distributor, receiver) = task_channel(4);
        let processor = TaskProcessor::new(
            receiver,
            Arc::new(executor),
            &config(),
            Duration::from_secs(1),
        );

        let token = CancellationToken::new();
        let handle = tokio::spawn(Box::new(processor).serve(token.clone()));

        distributor
            .enqueue(Task::new("count", serde_json::Value::Null))
            .await
            .unwrap();
        drop(distributor);

        let result = handle.await.unwrap();
        match result {
            Err(ServiceError::Failed { unit, .. }) => assert_eq!(unit, UNIT_NAME),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(!token.is_cancelled());
        assert_eq!(handler.count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stuck_task_aborted_after_grace_period() {
        let mut executor = TaskExecutor::new();
        executor.register(Arc::new(StuckHandler));

        let (distributor, receiver) = task_channel(4);
        let processor = TaskProcessor::new(
            receiver,
            Arc::new(executor),
            &config(),
            Duration::from_secs(5),
        );

        let token = CancellationToken::new();
        let handle = tokio::spawn(Box::new(processor).serve(token.clone()));

        distributor
            .enqueue(Task::new("stuck", serde_json::Value::Null))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        let started = tokio::time::Instant::now();
        token.cancel();
        let result = handle.await.unwrap();

        assert!(result.unwrap_err().is_shutdown());
        assert!(started.elapsed() >= Duration::from_secs(5));
    }
}
