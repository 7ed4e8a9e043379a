//! `bank.Auth` implementation.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tonic::{Request, Response, Status};
use tracing::{info, warn};

use bankauth_auth::{Authorizer, Payload, SessionRotation};
use bankauth_core::error::AppError;
use bankauth_worker::TaskDistributor;
use bankauth_worker::jobs::enqueue_token_renewed;

use crate::carrier::MetadataCarrier;
use crate::error::to_status;
use crate::pb;
use crate::server::Auth;

/// RPC handlers backed by the shared authorizer and rotation protocol.
#[derive(Debug, Clone)]
pub struct AuthService {
    authorizer: Arc<Authorizer>,
    rotation: Arc<SessionRotation>,
    tasks: Arc<dyn TaskDistributor>,
}

impl AuthService {
    pub fn new(
        authorizer: Arc<Authorizer>,
        rotation: Arc<SessionRotation>,
        tasks: Arc<dyn TaskDistributor>,
    ) -> Self {
        Self {
            authorizer,
            rotation,
            tasks,
        }
    }

    /// Resolves the bearer token in the request metadata.
    pub fn authorize<T>(&self, request: &Request<T>) -> Result<Payload, Status> {
        self.authorizer
            .authorize(&MetadataCarrier(request.metadata()))
            .map_err(|failure| {
                warn!(
                    reason = failure.reason(),
                    detail = %failure,
                    "Rejected unauthenticated RPC"
                );
                to_status(failure.into())
            })
    }

    async fn renew(
        &self,
        request: pb::RenewAccessTokenRequest,
    ) -> Result<pb::RenewAccessTokenResponse, Status> {
        if request.refresh_token.is_empty() {
            return Err(to_status(AppError::validation("refresh_token is required")));
        }

        let renewed = self
            .rotation
            .renew_access_token(&request.refresh_token)
            .await
            .map_err(|e| to_status(e.into()))?;

        enqueue_token_renewed(self.tasks.as_ref(), &renewed, "grpc").await;

        Ok(pb::RenewAccessTokenResponse {
            access_token: renewed.access_token,
            access_token_expires_at: Some(pb::timestamp(renewed.access_token_expires_at)),
        })
    }
}

#[async_trait]
impl Auth for AuthService {
    async fn renew_access_token(
        &self,
        request: Request<pb::RenewAccessTokenRequest>,
    ) -> Result<Response<pb::RenewAccessTokenResponse>, Status> {
        let started = Instant::now();
        let result = self.renew(request.into_inner()).await;
        log_call("RenewAccessToken", started, &result);
        result.map(Response::new)
    }

    async fn who_am_i(
        &self,
        request: Request<pb::WhoAmIRequest>,
    ) -> Result<Response<pb::WhoAmIResponse>, Status> {
        let started = Instant::now();
        let result = self.authorize(&request).map(|payload| pb::WhoAmIResponse {
            username: payload.username,
            token_id: payload.id.to_string(),
            issued_at: Some(pb::timestamp(payload.issued_at)),
            expires_at: Some(pb::timestamp(payload.expires_at)),
        });
        log_call("WhoAmI", started, &result);
        result.map(Response::new)
    }
}

fn log_call<T>(method: &str, started: Instant, result: &Result<T, Status>) {
    let duration_ms = started.elapsed().as_millis() as u64;
    match result {
        Ok(_) => info!(method, code = "OK", duration_ms, "received a gRPC request"),
        Err(status) => info!(
            method,
            code = ?status.code(),
            duration_ms,
            "received a gRPC request"
        ),
    }
}
