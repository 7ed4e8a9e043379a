//! Bearer token extraction and verification.

use std::sync::Arc;

use thiserror::Error;

use bankauth_core::error::{AppError, ErrorKind};

use super::carrier::{AUTHORIZATION_KEY, AuthorizationCarrier, BEARER_SCHEME};
use crate::token::{Payload, TokenError, TokenMaker};

/// Reasons a request failed bearer authorization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthenticationFailure {
    #[error("authorization header is not provided")]
    MissingHeader,

    #[error("invalid authorization header format")]
    BadFormat,

    #[error("unsupported authorization type {0}")]
    UnsupportedScheme(String),

    #[error("invalid access token")]
    InvalidToken,

    #[error("access token has expired")]
    ExpiredToken,
}

impl AuthenticationFailure {
    /// Short machine-readable reason, used as a log field.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingHeader => "missing_header",
            Self::BadFormat => "bad_format",
            Self::UnsupportedScheme(_) => "unsupported_scheme",
            Self::InvalidToken => "invalid_token",
            Self::ExpiredToken => "expired_token",
        }
    }
}

impl From<TokenError> for AuthenticationFailure {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::ExpiredToken => Self::ExpiredToken,
            _ => Self::InvalidToken,
        }
    }
}

impl From<AuthenticationFailure> for AppError {
    fn from(err: AuthenticationFailure) -> Self {
        AppError::with_source(ErrorKind::Authentication, "authentication failed", err)
    }
}

/// Resolves the bearer credential on a request to an identity payload.
///
/// Shared by every transport so that HTTP and RPC callers observe the same
/// outcome for the same header value.
#[derive(Debug, Clone)]
pub struct Authorizer {
    maker: Arc<dyn TokenMaker>,
}

impl Authorizer {
    /// Creates an authorizer backed by `maker`.
    pub fn new(maker: Arc<dyn TokenMaker>) -> Self {
        Self { maker }
    }

    /// Authorizes the request described by `carrier`.
    ///
    /// Only the first `authorization` value is considered. Fields beyond the
    /// scheme and the token are ignored.
    pub fn authorize<C>(&self, carrier: &C) -> Result<Payload, AuthenticationFailure>
    where
        C: AuthorizationCarrier + ?Sized,
    {
        let values = carrier.values(AUTHORIZATION_KEY);
        let header = match values.first() {
            Some(value) if !value.is_empty() => value,
            _ => return Err(AuthenticationFailure::MissingHeader),
        };

        let mut fields = header.split_whitespace();
        let (scheme, token) = match (fields.next(), fields.next()) {
            (Some(scheme), Some(token)) => (scheme, token),
            _ => return Err(AuthenticationFailure::BadFormat),
        };

        if scheme.to_lowercase() != BEARER_SCHEME {
            return Err(AuthenticationFailure::UnsupportedScheme(scheme.to_string()));
        }

        Ok(self.maker.verify_token(token)?)
    }
}
