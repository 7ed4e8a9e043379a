//! Shared test helpers for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use chrono::Duration as TokenDuration;
use tokio::net::TcpListener;

use bankauth_api::{AppState, HttpGateway};
use bankauth_auth::{
    AeadTokenMaker, Authorizer, MemorySessionStore, Session, SessionRotation, TokenMaker,
};
use bankauth_core::config::WorkerConfig;
use bankauth_grpc::{AuthService, GrpcServer};
use bankauth_runtime::Orchestrator;
use bankauth_worker::jobs::TokenRenewedAuditHandler;
use bankauth_worker::{TaskExecutor, TaskProcessor, task_channel};

pub const KEY: &[u8] = b"12345678901234567890123456789012";

/// Every service unit bound to loopback, backed by an in-memory store.
pub struct TestStack {
    pub orchestrator: Orchestrator,
    pub maker: Arc<AeadTokenMaker>,
    pub store: Arc<MemorySessionStore>,
    pub http_addr: SocketAddr,
    pub grpc_addr: SocketAddr,
}

impl TestStack {
    pub async fn new(grace: Duration) -> Self {
        let maker = Arc::new(AeadTokenMaker::new(KEY).unwrap());
        let store = Arc::new(MemorySessionStore::new());

        let authorizer = Arc::new(Authorizer::new(maker.clone()));
        let rotation = Arc::new(SessionRotation::new(
            maker.clone(),
            store.clone(),
            TokenDuration::minutes(15),
        ));
        let (distributor, receiver) = task_channel(64);
        let tasks = Arc::new(distributor);

        let grpc = GrpcServer::from_listener(
            TcpListener::bind("127.0.0.1:0").await.unwrap(),
            AuthService::new(authorizer.clone(), rotation.clone(), tasks.clone()),
        );
        let grpc_addr = grpc.local_addr().unwrap();

        let gateway = HttpGateway::from_listener(
            TcpListener::bind("127.0.0.1:0").await.unwrap(),
            AppState {
                authorizer,
                rotation,
                tasks,
                max_body_bytes: 64 * 1024,
            },
        );
        let http_addr = gateway.local_addr().unwrap();

        let mut executor = TaskExecutor::new();
        executor.register(Arc::new(TokenRenewedAuditHandler));
        let processor = TaskProcessor::new(
            receiver,
            Arc::new(executor),
            &WorkerConfig::default(),
            grace,
        );

        let mut orchestrator = Orchestrator::new(grace);
        orchestrator
            .add(Box::new(grpc))
            .add(Box::new(gateway))
            .add(Box::new(processor));

        Self {
            orchestrator,
            maker,
            store,
            http_addr,
            grpc_addr,
        }
    }

    /// Stores a fresh session and returns its refresh token.
    pub fn login(&self, username: &str) -> String {
        let (refresh, payload) = self
            .maker
            .create_token(username, TokenDuration::hours(1))
            .unwrap();
        self.store.insert(Session {
            id: payload.id,
            username: username.to_string(),
            refresh_token: refresh.clone(),
            user_agent: "integration".to_string(),
            client_ip: "127.0.0.1".to_string(),
            is_blocked: false,
            created_at: payload.issued_at,
            expires_at: payload.expires_at,
        });
        refresh
    }
}

/// Builds a URL on the gateway at `addr`.
pub fn http_url(addr: SocketAddr, path: &str) -> String {
    format!("http://{addr}{path}")
}
