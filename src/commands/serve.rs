//! Server startup: wires the session store, token maker and every service
//! unit, then hands them to the orchestrator.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use bankauth_api::{AppState, HttpGateway};
use bankauth_auth::{AeadTokenMaker, Authorizer, SessionRotation, TokenMaker};
use bankauth_core::config::AppConfig;
use bankauth_core::error::AppError;
use bankauth_database::{DatabasePool, SessionRepository};
use bankauth_grpc::{AuthService, GrpcServer};
use bankauth_runtime::{Orchestrator, cancel_on_signal, init_logging};
use bankauth_worker::jobs::TokenRenewedAuditHandler;
use bankauth_worker::{TaskDistributor, TaskExecutor, TaskProcessor, task_channel};

/// Load configuration, install logging and run until shutdown.
pub async fn execute(env: &str) -> anyhow::Result<()> {
    let config = AppConfig::load(env)?;
    init_logging(&config.logging, config.is_development())?;

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }
    Ok(())
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        "Starting bankauth"
    );

    // ── Token maker ──────────────────────────────────────────────
    let maker: Arc<dyn TokenMaker> =
        Arc::new(AeadTokenMaker::new(config.auth.token_symmetric_key.as_bytes())?);

    // ── Session store ────────────────────────────────────────────
    info!("Connecting to database...");
    let database = DatabasePool::connect(&config.database).await?;
    let store = Arc::new(SessionRepository::new(database.pool().clone()));

    // ── Shared auth services ─────────────────────────────────────
    let authorizer = Arc::new(Authorizer::new(Arc::clone(&maker)));
    let rotation = Arc::new(SessionRotation::new(
        maker,
        store,
        config.auth.access_token_duration()?,
    ));
    let (distributor, receiver) = task_channel(config.worker.queue_capacity);
    let tasks: Arc<dyn TaskDistributor> = Arc::new(distributor);

    // ── Service units ────────────────────────────────────────────
    let grace = config.shutdown.grace_period();
    let mut orchestrator = Orchestrator::new(grace);

    let grpc = GrpcServer::bind(
        &config.grpc,
        AuthService::new(
            Arc::clone(&authorizer),
            Arc::clone(&rotation),
            Arc::clone(&tasks),
        ),
    )
    .await?;
    orchestrator.add(Box::new(grpc));

    let state = AppState {
        authorizer,
        rotation,
        tasks,
        max_body_bytes: config.http.max_body_bytes,
    };
    let gateway = HttpGateway::bind(&config.http, state).await?;
    orchestrator.add(Box::new(gateway));

    if config.worker.enabled {
        let mut executor = TaskExecutor::new();
        executor.register(Arc::new(TokenRenewedAuditHandler));
        orchestrator.add(Box::new(TaskProcessor::new(
            receiver,
            Arc::new(executor),
            &config.worker,
            grace,
        )));
    } else {
        info!("Task processor disabled");
        drop(receiver);
    }

    // ── Run until a signal or the first unit failure ─────────────
    let shutdown = CancellationToken::new();
    tokio::spawn(cancel_on_signal(shutdown.clone()));

    let result = orchestrator.run(shutdown).await;

    database.close().await;
    info!("Server shutdown complete");

    result.map_err(AppError::from)
}
