//! HTTP gateway service unit.

use std::net::SocketAddr;

use async_trait::async_trait;
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use bankauth_core::config::HttpConfig;
use bankauth_core::error::{AppError, ErrorKind};
use bankauth_core::traits::{ServiceError, ServiceUnit};

use crate::router::build_router;
use crate::state::AppState;

const UNIT_NAME: &str = "http-gateway";

/// Serves the HTTP router until the shutdown token fires.
///
/// The listener is bound at construction so an unusable address fails
/// startup rather than the running service.
#[derive(Debug)]
pub struct HttpGateway {
    listener: TcpListener,
    router: Router,
}

impl HttpGateway {
    /// Binds the configured address.
    pub async fn bind(config: &HttpConfig, state: AppState) -> Result<Self, AppError> {
        let addr = config.address();
        let listener = TcpListener::bind(&addr).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Failed to bind HTTP gateway to {addr}: {e}"),
                e,
            )
        })?;

        Ok(Self::from_listener(listener, state))
    }

    /// Wraps an already bound listener.
    pub fn from_listener(listener: TcpListener, state: AppState) -> Self {
        Self {
            listener,
            router: build_router(state),
        }
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

#[async_trait]
impl ServiceUnit for HttpGateway {
    fn name(&self) -> &'static str {
        UNIT_NAME
    }

    async fn serve(self: Box<Self>, shutdown: CancellationToken) -> Result<(), ServiceError> {
        let Self { listener, router } = *self;

        if let Ok(addr) = listener.local_addr() {
            info!(%addr, "Start HTTP gateway server");
        }

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown.clone().cancelled_owned())
            .await
            .map_err(|e| ServiceError::failed(UNIT_NAME, AppError::from(e)))?;

        if shutdown.is_cancelled() {
            info!("HTTP gateway server stopped");
            Err(ServiceError::Stopped(UNIT_NAME))
        } else {
            Err(ServiceError::failed(
                UNIT_NAME,
                AppError::service_failure("HTTP gateway stopped unexpectedly"),
            ))
        }
    }
}
