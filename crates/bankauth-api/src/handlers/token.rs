//! Token renewal handler.

use axum::Json;
use axum::extract::State;

use bankauth_worker::jobs::enqueue_token_renewed;

use crate::dto::{RenewAccessTokenRequest, RenewAccessTokenResponse};
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /v1/tokens/renew_access
pub async fn renew_access_token(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RenewAccessTokenRequest>,
) -> Result<Json<RenewAccessTokenResponse>, ApiError> {
    let renewed = state.rotation.renew_access_token(&req.refresh_token).await?;

    enqueue_token_renewed(state.tasks.as_ref(), &renewed, "http").await;

    Ok(Json(renewed.into()))
}
