//! Access-token renewal over HTTP.

mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use bankauth_auth::TokenMaker;
use bankauth_worker::jobs::{TOKEN_RENEWED, TokenRenewedTask};

use common::TestApp;

const RENEW: &str = "/v1/tokens/renew_access";

#[tokio::test]
async fn test_renew_access_token_success() {
    let mut app = TestApp::new();
    let (refresh, session) = app.login("alice");

    let before = Utc::now();
    let response = app
        .request("POST", RENEW, Some(json!({ "refresh_token": refresh })), None)
        .await;
    let after = Utc::now();

    assert_eq!(response.status, StatusCode::OK);
    let access = response.body["access_token"].as_str().unwrap();
    let expires_at: DateTime<Utc> =
        serde_json::from_value(response.body["access_token_expires_at"].clone()).unwrap();

    let payload = app.maker.verify_token(access).unwrap();
    assert_eq!(payload.username, "alice");
    assert_eq!(payload.expires_at, expires_at);
    assert!(expires_at >= before + Duration::minutes(15));
    assert!(expires_at <= after + Duration::minutes(15));

    let task = app.tasks.try_recv().expect("audit task enqueued");
    assert_eq!(task.task_type, TOKEN_RENEWED);
    let event: TokenRenewedTask = serde_json::from_value(task.payload).unwrap();
    assert_eq!(event.session_id, session.id);
    assert_eq!(event.username, "alice");
    assert_eq!(event.transport, "http");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = TestApp::new();

    for body in ["not json", "{}", r#"{"refresh_token": 42}"#, r#"{"refresh_token": ""}"#] {
        let response = app.raw_request("POST", RENEW, body.to_string(), None).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(response.body["error"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_invalid_refresh_token_is_unauthorized() {
    let app = TestApp::new();
    let response = app
        .request("POST", RENEW, Some(json!({ "refresh_token": "garbage" })), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHENTICATED");
    assert_eq!(response.body["message"], "authentication failed");
}

#[tokio::test]
async fn test_blocked_session_is_unauthorized() {
    let mut app = TestApp::new();
    let (refresh, session) = app.login("alice");
    app.store.block(session.id);

    let response = app
        .request("POST", RENEW, Some(json!({ "refresh_token": refresh })), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "session rejected");
    assert!(app.tasks.try_recv().is_err());
}

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let app = TestApp::new();
    let (refresh, _) = app.maker.create_token("alice", Duration::hours(1)).unwrap();

    let response = app
        .request("POST", RENEW, Some(json!({ "refresh_token": refresh })), None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_store_failure_is_server_error() {
    let app = TestApp::new();
    let (refresh, _) = app.login("alice");
    app.store.set_offline(true);

    let response = app
        .request("POST", RENEW, Some(json!({ "refresh_token": refresh })), None)
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "STORE_UNAVAILABLE");
}

#[tokio::test]
async fn test_access_token_is_not_a_session_credential() {
    let app = TestApp::new();
    let (_, _) = app.login("alice");
    let access = app.access_token("alice");

    let response = app
        .request("POST", RENEW, Some(json!({ "refresh_token": access })), None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
