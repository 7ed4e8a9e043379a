//! Request and response bodies.

pub mod request;
pub mod response;

pub use request::RenewAccessTokenRequest;
pub use response::{HealthResponse, RenewAccessTokenResponse, UserInfoResponse};
