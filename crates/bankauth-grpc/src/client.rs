//! Client for `bank.Auth`.

use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};
use tonic::{IntoRequest, Response, Status};

use crate::pb;
use crate::server::{RENEW_ACCESS_TOKEN_PATH, WHO_AM_I_PATH};

/// Unary client over a tonic channel.
#[derive(Debug, Clone)]
pub struct AuthClient {
    inner: tonic::client::Grpc<Channel>,
}

impl AuthClient {
    /// Connects to `dst`, e.g. `http://127.0.0.1:9090`.
    pub async fn connect(dst: String) -> Result<Self, tonic::transport::Error> {
        let channel = Endpoint::new(dst)?.connect().await?;
        Ok(Self::new(channel))
    }

    pub fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    pub async fn renew_access_token(
        &mut self,
        request: impl IntoRequest<pb::RenewAccessTokenRequest>,
    ) -> Result<Response<pb::RenewAccessTokenResponse>, Status> {
        self.ready().await?;
        self.inner
            .unary(
                request.into_request(),
                PathAndQuery::from_static(RENEW_ACCESS_TOKEN_PATH),
                ProstCodec::default(),
            )
            .await
    }

    pub async fn who_am_i(
        &mut self,
        request: impl IntoRequest<pb::WhoAmIRequest>,
    ) -> Result<Response<pb::WhoAmIResponse>, Status> {
        self.ready().await?;
        self.inner
            .unary(
                request.into_request(),
                PathAndQuery::from_static(WHO_AM_I_PATH),
                ProstCodec::default(),
            )
            .await
    }

    async fn ready(&mut self) -> Result<(), Status> {
        self.inner
            .ready()
            .await
            .map_err(|e| Status::unknown(format!("Service was not ready: {e}")))
    }
}
