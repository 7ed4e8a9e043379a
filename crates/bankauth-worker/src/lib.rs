//! Background task processing for bankauth.
//!
//! This crate provides:
//! - A task distributor that request handlers enqueue work through
//! - A task executor that dispatches tasks to the handler registered for
//!   their type
//! - A task processor service unit with bounded concurrency and graceful
//!   draining on shutdown
//! - Built-in task handlers

pub mod distributor;
pub mod executor;
pub mod jobs;
pub mod processor;
pub mod task;

pub use distributor::{ChannelTaskDistributor, TaskDistributor, TaskReceiver, task_channel};
pub use executor::{TaskExecutionError, TaskExecutor, TaskHandler};
pub use processor::TaskProcessor;
pub use task::Task;
