//! Bearer authorization middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use crate::carrier::HttpCarrier;
use crate::error::ApiError;
use crate::state::AppState;

/// Rejects the request with 401 unless it carries a valid bearer token.
///
/// On success the verified [`bankauth_auth::Payload`] is stored in the
/// request extensions for [`crate::extractors::AuthUser`].
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let payload = match state.authorizer.authorize(&HttpCarrier(request.headers())) {
        Ok(payload) => payload,
        Err(failure) => {
            warn!(
                path = %request.uri().path(),
                reason = failure.reason(),
                detail = %failure,
                "Rejected unauthenticated request"
            );
            return Err(failure.into());
        }
    };

    request.extensions_mut().insert(payload);
    Ok(next.run(request).await)
}
