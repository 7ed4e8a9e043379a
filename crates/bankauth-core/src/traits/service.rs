//! Long-running service unit trait.

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::error::AppError;

/// Outcome of a service unit that stopped serving.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The unit stopped because the shutdown signal fired. Treated as success.
    #[error("{0} stopped by shutdown")]
    Stopped(&'static str),

    /// The unit stopped for any other reason.
    #[error("{unit} failed: {source}")]
    Failed {
        /// Name of the failing unit.
        unit: &'static str,
        /// Underlying cause.
        #[source]
        source: AppError,
    },
}

impl ServiceError {
    /// Wraps an error as an unexpected failure of `unit`.
    pub fn failed(unit: &'static str, source: AppError) -> Self {
        Self::Failed { unit, source }
    }

    /// Returns `true` if this is the intentional-shutdown sentinel.
    pub fn is_shutdown(&self) -> bool {
        matches!(self, Self::Stopped(_))
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        let message = err.to_string();
        AppError::with_source(crate::error::ErrorKind::ServiceFailure, message, err)
    }
}

/// A network service or processor supervised by the lifecycle orchestrator.
///
/// Implementations receive the shared cancellation token and must stop
/// accepting new work once it fires, then return after draining in-flight
/// work. Listeners are bound before `serve` is called so that address errors
/// surface at startup.
#[async_trait]
pub trait ServiceUnit: Send + 'static {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Runs the serve loop until failure or shutdown.
    async fn serve(self: Box<Self>, shutdown: CancellationToken) -> Result<(), ServiceError>;
}
