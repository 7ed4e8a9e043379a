//! Server scaffolding for `bank.Auth`.
//!
//! Routes requests by path to the [`Auth`] implementation, in the shape
//! `tonic-build` generates.

use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};

use async_trait::async_trait;
use tonic::codegen::{Body, BoxFuture, Service, StdError, empty_body, http};
use tonic::server::{Grpc, NamedService, UnaryService};
use tonic::{Code, Request, Response, Status};

use crate::pb;

/// Fully qualified service name.
pub const SERVICE_NAME: &str = "bank.Auth";

pub const RENEW_ACCESS_TOKEN_PATH: &str = "/bank.Auth/RenewAccessToken";
pub const WHO_AM_I_PATH: &str = "/bank.Auth/WhoAmI";

/// Handlers for `bank.Auth`.
#[async_trait]
pub trait Auth: Send + Sync + 'static {
    async fn renew_access_token(
        &self,
        request: Request<pb::RenewAccessTokenRequest>,
    ) -> Result<Response<pb::RenewAccessTokenResponse>, Status>;

    async fn who_am_i(
        &self,
        request: Request<pb::WhoAmIRequest>,
    ) -> Result<Response<pb::WhoAmIResponse>, Status>;
}

/// Tower service dispatching `bank.Auth` calls.
#[derive(Debug)]
pub struct AuthServer<T> {
    inner: Arc<T>,
}

impl<T> AuthServer<T> {
    pub fn new(inner: T) -> Self {
        Self::from_arc(Arc::new(inner))
    }

    pub fn from_arc(inner: Arc<T>) -> Self {
        Self { inner }
    }
}

impl<T> Clone for AuthServer<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> NamedService for AuthServer<T> {
    const NAME: &'static str = SERVICE_NAME;
}

struct RenewAccessTokenSvc<T>(Arc<T>);

impl<T: Auth> UnaryService<pb::RenewAccessTokenRequest> for RenewAccessTokenSvc<T> {
    type Response = pb::RenewAccessTokenResponse;
    type Future = BoxFuture<Response<Self::Response>, Status>;

    fn call(&mut self, request: Request<pb::RenewAccessTokenRequest>) -> Self::Future {
        let inner = Arc::clone(&self.0);
        Box::pin(async move { inner.renew_access_token(request).await })
    }
}

struct WhoAmISvc<T>(Arc<T>);

impl<T: Auth> UnaryService<pb::WhoAmIRequest> for WhoAmISvc<T> {
    type Response = pb::WhoAmIResponse;
    type Future = BoxFuture<Response<Self::Response>, Status>;

    fn call(&mut self, request: Request<pb::WhoAmIRequest>) -> Self::Future {
        let inner = Arc::clone(&self.0);
        Box::pin(async move { inner.who_am_i(request).await })
    }
}

impl<T, B> Service<http::Request<B>> for AuthServer<T>
where
    T: Auth,
    B: Body + Send + 'static,
    B::Error: Into<StdError> + Send + 'static,
{
    type Response = http::Response<tonic::body::BoxBody>;
    type Error = Infallible;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        let inner = Arc::clone(&self.inner);
        match req.uri().path() {
            RENEW_ACCESS_TOKEN_PATH => Box::pin(async move {
                let mut grpc = Grpc::new(tonic::codec::ProstCodec::default());
                Ok(grpc.unary(RenewAccessTokenSvc(inner), req).await)
            }),
            WHO_AM_I_PATH => Box::pin(async move {
                let mut grpc = Grpc::new(tonic::codec::ProstCodec::default());
                Ok(grpc.unary(WhoAmISvc(inner), req).await)
            }),
            _ => Box::pin(async move {
                let mut response = http::Response::new(empty_body());
                let headers = response.headers_mut();
                headers.insert(
                    http::HeaderName::from_static("grpc-status"),
                    http::HeaderValue::from(Code::Unimplemented as i32),
                );
                headers.insert(
                    http::header::CONTENT_TYPE,
                    http::HeaderValue::from_static("application/grpc"),
                );
                Ok(response)
            }),
        }
    }
}
