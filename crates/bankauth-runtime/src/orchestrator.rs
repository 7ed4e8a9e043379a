//! Service lifecycle orchestrator.
//!
//! Every unit is started with a clone of one shared [`CancellationToken`].
//! Units stop cooperatively once the token fires; a unit still running when
//! the grace period elapses is dropped, which aborts whatever it was
//! awaiting. The first unexpected failure cancels the token for everyone
//! else and is what [`Orchestrator::run`] returns.

use std::time::Duration;

use tokio::task::JoinSet;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, error, info, info_span, warn};

use bankauth_core::error::AppError;
use bankauth_core::traits::{ServiceError, ServiceUnit};

/// Supervises a set of service units until all of them have stopped.
pub struct Orchestrator {
    grace: Duration,
    units: Vec<Box<dyn ServiceUnit>>,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.units.iter().map(|unit| unit.name()).collect();
        f.debug_struct("Orchestrator")
            .field("grace", &self.grace)
            .field("units", &names)
            .finish()
    }
}

impl Orchestrator {
    pub fn new(grace: Duration) -> Self {
        Self {
            grace,
            units: Vec::new(),
        }
    }

    /// Registers a unit to be started by [`run`](Self::run).
    pub fn add(&mut self, unit: Box<dyn ServiceUnit>) -> &mut Self {
        self.units.push(unit);
        self
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Runs every unit concurrently and waits for all of them to stop.
    ///
    /// Returns `Ok` when the token was cancelled externally and no unit
    /// failed. Otherwise returns the first unexpected failure.
    pub async fn run(self, shutdown: CancellationToken) -> Result<(), ServiceError> {
        let grace = self.grace;
        let mut tasks = JoinSet::new();

        for unit in self.units {
            let name = unit.name();
            info!(unit = name, "Starting service unit");
            let span = info_span!("unit", unit = name);
            let token = shutdown.clone();
            tasks.spawn(
                async move { (name, supervise(unit, token, grace).await) }.instrument(span),
            );
        }

        let mut first_failure: Option<ServiceError> = None;

        while let Some(joined) = tasks.join_next().await {
            let (name, outcome) = match joined {
                Ok(result) => result,
                Err(e) => (
                    "service-task",
                    Err(ServiceError::failed(
                        "service-task",
                        AppError::internal(format!("service task panicked: {e}")),
                    )),
                ),
            };

            match outcome {
                Ok(()) | Err(ServiceError::Stopped(_)) => {
                    info!(unit = name, "Service unit stopped");
                }
                Err(err) => {
                    error!(unit = name, error = %err, "Service unit failed");
                    if first_failure.is_none() {
                        shutdown.cancel();
                        first_failure = Some(err);
                    }
                }
            }
        }

        match first_failure {
            Some(err) => Err(err),
            None => {
                info!("All service units stopped");
                Ok(())
            }
        }
    }
}

/// Runs one unit, bounding its drain time once the token fires.
async fn supervise(
    unit: Box<dyn ServiceUnit>,
    shutdown: CancellationToken,
    grace: Duration,
) -> Result<(), ServiceError> {
    let name = unit.name();
    let mut serve = unit.serve(shutdown.clone());

    tokio::select! {
        biased;
        result = &mut serve => return result,
        _ = shutdown.cancelled() => {}
    }

    match timeout(grace, serve).await {
        Ok(result) => result,
        Err(_) => {
            warn!(
                unit = name,
                grace_ms = grace.as_millis() as u64,
                "Grace period elapsed, force-terminating unit"
            );
            Err(ServiceError::Stopped(name))
        }
    }
}
