//! gRPC server service unit.

use std::net::SocketAddr;

use async_trait::async_trait;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tokio_util::sync::CancellationToken;
use tonic::transport::Server;
use tracing::info;

use bankauth_core::config::GrpcConfig;
use bankauth_core::error::{AppError, ErrorKind};
use bankauth_core::traits::{ServiceError, ServiceUnit};

use crate::server::AuthServer;
use crate::service::AuthService;

const UNIT_NAME: &str = "grpc-server";

/// Serves `bank.Auth` and `grpc.health.v1.Health` until shutdown.
#[derive(Debug)]
pub struct GrpcServer {
    listener: TcpListener,
    service: AuthService,
}

impl GrpcServer {
    /// Binds the configured address.
    pub async fn bind(config: &GrpcConfig, service: AuthService) -> Result<Self, AppError> {
        let addr = config.address();
        let listener = TcpListener::bind(&addr).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Failed to bind gRPC server to {addr}: {e}"),
                e,
            )
        })?;

        Ok(Self::from_listener(listener, service))
    }

    pub fn from_listener(listener: TcpListener, service: AuthService) -> Self {
        Self { listener, service }
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

#[async_trait]
impl ServiceUnit for GrpcServer {
    fn name(&self) -> &'static str {
        UNIT_NAME
    }

    async fn serve(self: Box<Self>, shutdown: CancellationToken) -> Result<(), ServiceError> {
        let Self { listener, service } = *self;

        let (mut health, health_service) = tonic_health::server::health_reporter();
        health.set_serving::<AuthServer<AuthService>>().await;

        if let Ok(addr) = listener.local_addr() {
            info!(%addr, "Start gRPC server");
        }

        Server::builder()
            .add_service(health_service)
            .add_service(AuthServer::new(service))
            .serve_with_incoming_shutdown(
                TcpListenerStream::new(listener),
                shutdown.clone().cancelled_owned(),
            )
            .await
            .map_err(|e| {
                ServiceError::failed(
                    UNIT_NAME,
                    AppError::with_source(ErrorKind::ServiceFailure, "gRPC server failed", e),
                )
            })?;

        if shutdown.is_cancelled() {
            info!("gRPC server stopped");
            Err(ServiceError::Stopped(UNIT_NAME))
        } else {
            Err(ServiceError::failed(
                UNIT_NAME,
                AppError::service_failure("gRPC server stopped unexpectedly"),
            ))
        }
    }
}
