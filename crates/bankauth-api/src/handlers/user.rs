//! Authenticated user handlers.

use axum::Json;

use crate::dto::UserInfoResponse;
use crate::extractors::AuthUser;

/// GET /v1/users/me
pub async fn me(AuthUser(payload): AuthUser) -> Json<UserInfoResponse> {
    Json(payload.into())
}
