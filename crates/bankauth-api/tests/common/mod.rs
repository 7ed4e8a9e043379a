//! Shared helpers for HTTP gateway tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Duration;
use serde_json::Value;
use tower::ServiceExt;

use bankauth_api::{AppState, build_router};
use bankauth_auth::{AeadTokenMaker, Authorizer, MemorySessionStore, Session, SessionRotation, TokenMaker};
use bankauth_worker::{TaskReceiver, task_channel};

pub const KEY: &[u8] = b"12345678901234567890123456789012";

/// Gateway wired to in-memory collaborators.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub maker: Arc<AeadTokenMaker>,
    pub store: Arc<MemorySessionStore>,
    pub tasks: TaskReceiver,
}

impl TestApp {
    pub fn new() -> Self {
        let maker = Arc::new(AeadTokenMaker::new(KEY).expect("valid key"));
        let store = Arc::new(MemorySessionStore::new());
        let (distributor, tasks) = task_channel(16);

        let state = AppState {
            authorizer: Arc::new(Authorizer::new(maker.clone())),
            rotation: Arc::new(SessionRotation::new(
                maker.clone(),
                store.clone(),
                Duration::minutes(15),
            )),
            tasks: Arc::new(distributor),
            max_body_bytes: 64 * 1024,
        };

        Self {
            router: build_router(state.clone()),
            state,
            maker,
            store,
            tasks,
        }
    }

    /// Issues a refresh token and stores its session, as login would.
    pub fn login(&self, username: &str) -> (String, Session) {
        let (token, payload) = self
            .maker
            .create_token(username, Duration::hours(24))
            .expect("token");
        let session = Session {
            id: payload.id,
            username: payload.username.clone(),
            refresh_token: token.clone(),
            user_agent: "integration-test".to_string(),
            client_ip: "127.0.0.1".to_string(),
            is_blocked: false,
            created_at: payload.issued_at,
            expires_at: payload.expires_at,
        };
        self.store.insert(session.clone());
        (token, session)
    }

    pub fn access_token(&self, username: &str) -> String {
        self.maker
            .create_token(username, Duration::minutes(15))
            .expect("token")
            .0
    }

    /// Sends a JSON request with an optional raw `Authorization` value.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> TestResponse {
        let body = body.map(|b| b.to_string()).unwrap_or_default();
        self.raw_request(method, path, body, authorization).await
    }

    pub async fn raw_request(
        &self,
        method: &str,
        path: &str,
        body: String,
        authorization: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(value) = authorization {
            req = req.header("Authorization", value);
        }

        let req = req.body(Body::from(body)).expect("request");
        send(self.router.clone(), req).await
    }
}

pub async fn send(router: Router, req: Request<Body>) -> TestResponse {
    let response = router.oneshot(req).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    TestResponse { status, body }
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}
