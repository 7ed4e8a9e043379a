//! Startup, serving and shutdown of the whole service set.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use tonic::Request;

use bankauth_api::HttpGateway;
use bankauth_core::config::HttpConfig;
use bankauth_core::error::{AppError, ErrorKind};
use bankauth_core::traits::{ServiceError, ServiceUnit};
use bankauth_grpc::AuthClient;
use bankauth_grpc::pb::RenewAccessTokenRequest;

use crate::helpers::{TestStack, http_url};

struct CrashingUnit;

#[async_trait]
impl ServiceUnit for CrashingUnit {
    fn name(&self) -> &'static str {
        "crashing"
    }

    async fn serve(self: Box<Self>, _shutdown: CancellationToken) -> Result<(), ServiceError> {
        tokio::time::sleep(Duration::from_millis(300)).await;
        Err(ServiceError::failed(
            "crashing",
            AppError::service_failure("listener lost"),
        ))
    }
}

#[tokio::test]
async fn test_stack_serves_both_transports_and_stops_cleanly() {
    let stack = TestStack::new(Duration::from_secs(2)).await;
    let refresh = stack.login("alice");
    let (http_addr, grpc_addr) = (stack.http_addr, stack.grpc_addr);

    let shutdown = CancellationToken::new();
    let running = tokio::spawn(stack.orchestrator.run(shutdown.clone()));

    let http = reqwest::Client::new();

    let health = http.get(http_url(http_addr, "/health")).send().await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);

    let renewed = http
        .post(http_url(http_addr, "/v1/tokens/renew_access"))
        .json(&json!({ "refresh_token": refresh.as_str() }))
        .send()
        .await
        .unwrap();
    assert_eq!(renewed.status(), StatusCode::OK);
    let body: Value = renewed.json().await.unwrap();
    let access_token = body["access_token"].as_str().unwrap().to_string();
    assert!(body["access_token_expires_at"].is_string());

    let me = http
        .get(http_url(http_addr, "/v1/users/me"))
        .bearer_auth(&access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(me.status(), StatusCode::OK);
    let me: Value = me.json().await.unwrap();
    assert_eq!(me["username"], "alice");
    drop(http);

    let mut client = AuthClient::connect(format!("http://{grpc_addr}"))
        .await
        .unwrap();
    let response = client
        .renew_access_token(Request::new(RenewAccessTokenRequest {
            refresh_token: refresh,
        }))
        .await
        .unwrap()
        .into_inner();
    assert!(!response.access_token.is_empty());
    drop(client);

    shutdown.cancel();
    let outcome = tokio::time::timeout(Duration::from_secs(10), running)
        .await
        .expect("orchestrator did not stop")
        .unwrap();
    assert!(outcome.is_ok(), "{outcome:?}");

    let after = reqwest::get(http_url(http_addr, "/health")).await;
    assert!(after.is_err());
}

#[tokio::test]
async fn test_unit_failure_takes_down_the_stack() {
    let mut stack = TestStack::new(Duration::from_secs(2)).await;
    stack.orchestrator.add(Box::new(CrashingUnit));
    let http_addr = stack.http_addr;

    let shutdown = CancellationToken::new();
    let outcome = tokio::time::timeout(
        Duration::from_secs(10),
        stack.orchestrator.run(shutdown.clone()),
    )
    .await
    .expect("orchestrator did not stop");

    match outcome {
        Err(ServiceError::Failed { unit, .. }) => assert_eq!(unit, "crashing"),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(shutdown.is_cancelled());
    assert!(reqwest::get(http_url(http_addr, "/health")).await.is_err());
}

#[tokio::test]
async fn test_bind_conflict_prevents_startup() {
    let occupied = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = occupied.local_addr().unwrap().port();
    let stack = TestStack::new(Duration::from_secs(1)).await;

    let config = HttpConfig {
        host: "127.0.0.1".to_string(),
        port,
        ..HttpConfig::default()
    };
    let state = bankauth_api::AppState {
        authorizer: std::sync::Arc::new(bankauth_auth::Authorizer::new(stack.maker.clone())),
        rotation: std::sync::Arc::new(bankauth_auth::SessionRotation::new(
            stack.maker.clone(),
            stack.store.clone(),
            chrono::Duration::minutes(15),
        )),
        tasks: std::sync::Arc::new(bankauth_worker::task_channel(1).0),
        max_body_bytes: 1024,
    };

    let err = HttpGateway::bind(&config, state).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);
}
