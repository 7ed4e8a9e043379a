//! `AuthUser` extractor: the payload resolved by the auth middleware.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use bankauth_auth::Payload;
use bankauth_core::error::AppError;

use crate::error::ApiError;

/// The verified token payload of the current request.
///
/// Only available on routes behind [`crate::middleware::auth::require_auth`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub Payload);

impl std::ops::Deref for AuthUser {
    type Target = Payload;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Payload>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ApiError(AppError::authentication("authentication failed")))
    }
}
