//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use bankauth_auth::{Authorizer, SessionRotation};
use bankauth_worker::TaskDistributor;

/// Shared dependencies, passed to every handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Bearer token verification.
    pub authorizer: Arc<Authorizer>,
    /// Access-token renewal.
    pub rotation: Arc<SessionRotation>,
    /// Background task queue.
    pub tasks: Arc<dyn TaskDistributor>,
    /// Maximum accepted request body size.
    pub max_body_bytes: usize,
}
