//! # bankauth-api
//!
//! HTTP gateway for bankauth built on Axum.
//!
//! Provides the token renewal endpoint, an authenticated identity endpoint,
//! the bearer authorization middleware, error mapping, and the gateway
//! service unit run by the lifecycle orchestrator.

pub mod carrier;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod gateway;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use carrier::HttpCarrier;
pub use error::ApiError;
pub use gateway::HttpGateway;
pub use router::build_router;
pub use state::AppState;
