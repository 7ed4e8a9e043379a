//! Maps `AppError` to gRPC status codes.

use tonic::{Code, Status};

use bankauth_core::error::{AppError, ErrorKind};

/// Translates an application error into a client-facing status.
pub fn to_status(err: AppError) -> Status {
    let code = match err.kind {
        ErrorKind::Validation => Code::InvalidArgument,
        ErrorKind::Authentication => Code::Unauthenticated,
        ErrorKind::NotFound => Code::NotFound,
        ErrorKind::StoreUnavailable
        | ErrorKind::Internal
        | ErrorKind::Configuration
        | ErrorKind::ServiceFailure => {
            tracing::error!(error = %err, "Internal RPC error");
            Code::Internal
        }
    };
    Status::new(code, err.message)
}
