//! Maps `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use bankauth_auth::{AuthenticationFailure, RenewError};
use bankauth_core::error::{AppError, ErrorKind};

/// Standard error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message. Never names the specific check that failed.
    pub message: String,
}

/// HTTP-facing wrapper around [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self(AppError::validation(message))
    }

    pub fn status(&self) -> StatusCode {
        match self.0.kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::StoreUnavailable
            | ErrorKind::Internal
            | ErrorKind::Configuration
            | ErrorKind::ServiceFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<RenewError> for ApiError {
    fn from(err: RenewError) -> Self {
        Self(err.into())
    }
}

impl From<AuthenticationFailure> for ApiError {
    fn from(err: AuthenticationFailure) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = match self.0.kind {
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::Authentication => "UNAUTHENTICATED",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::StoreUnavailable => "STORE_UNAVAILABLE",
            ErrorKind::Internal | ErrorKind::Configuration | ErrorKind::ServiceFailure => {
                tracing::error!(error = %self.0, "Internal server error");
                "INTERNAL_ERROR"
            }
        };

        let body = ApiErrorResponse {
            error: code.to_string(),
            message: self.0.message,
        };

        (status, Json(body)).into_response()
    }
}
