//! Access-token renewal against a refresh token and its session.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use bankauth_core::error::{AppError, ErrorKind};

use super::model::Session;
use super::store::{SessionStore, StoreError};
use crate::token::{Payload, TokenError, TokenMaker};

/// A session refused to back a renewal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionFailure {
    #[error("session not found")]
    NotFound,

    #[error("blocked session")]
    Blocked,

    #[error("incorrect session user")]
    UserMismatch,

    #[error("mismatched session token")]
    TokenMismatch,

    #[error("expired session")]
    Expired,
}

/// Errors returned by [`SessionRotation::renew_access_token`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenewError {
    /// The presented refresh token did not verify.
    #[error("refresh token rejected: {0}")]
    Token(#[source] TokenError),

    #[error("session rejected: {0}")]
    Session(#[source] SessionFailure),

    #[error("session store unavailable: {0}")]
    StoreUnavailable(String),

    /// Every check passed but the new access token could not be created.
    #[error("failed to issue access token: {0}")]
    Issue(#[source] TokenError),
}

impl From<RenewError> for AppError {
    fn from(err: RenewError) -> Self {
        match err {
            RenewError::Token(_) => {
                AppError::with_source(ErrorKind::Authentication, "authentication failed", err)
            }
            RenewError::Session(SessionFailure::NotFound) => {
                AppError::with_source(ErrorKind::NotFound, "session not found", err)
            }
            RenewError::Session(_) => {
                AppError::with_source(ErrorKind::Authentication, "session rejected", err)
            }
            RenewError::StoreUnavailable(_) => AppError::with_source(
                ErrorKind::StoreUnavailable,
                "session store unavailable",
                err,
            ),
            RenewError::Issue(_) => {
                AppError::with_source(ErrorKind::Internal, "failed to issue access token", err)
            }
        }
    }
}

/// A freshly issued access token.
#[derive(Debug, Clone)]
pub struct RenewedAccessToken {
    pub access_token: String,
    pub access_token_expires_at: DateTime<Utc>,
    /// Payload of the new access token.
    pub payload: Payload,
    /// Session that backed the renewal.
    pub session_id: Uuid,
}

/// Validates a session against a verified refresh payload.
///
/// Checks run in a fixed order and the first failure wins: blocked, user,
/// token string, expiry.
pub fn check_session(
    session: &Session,
    refresh_payload: &Payload,
    presented_token: &str,
    now: DateTime<Utc>,
) -> Result<(), SessionFailure> {
    if session.is_blocked {
        return Err(SessionFailure::Blocked);
    }
    if session.username != refresh_payload.username {
        return Err(SessionFailure::UserMismatch);
    }
    if session.refresh_token != presented_token {
        return Err(SessionFailure::TokenMismatch);
    }
    if now > session.expires_at {
        return Err(SessionFailure::Expired);
    }
    Ok(())
}

/// Mints access tokens from refresh tokens.
///
/// Performs exactly one session read per attempt and never writes: neither
/// the refresh token nor the session is modified or extended.
#[derive(Clone)]
pub struct SessionRotation {
    maker: Arc<dyn TokenMaker>,
    store: Arc<dyn SessionStore>,
    access_token_duration: Duration,
}

impl std::fmt::Debug for SessionRotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRotation")
            .field("maker", &self.maker)
            .field("access_token_duration", &self.access_token_duration)
            .finish_non_exhaustive()
    }
}

impl SessionRotation {
    pub fn new(
        maker: Arc<dyn TokenMaker>,
        store: Arc<dyn SessionStore>,
        access_token_duration: Duration,
    ) -> Self {
        Self {
            maker,
            store,
            access_token_duration,
        }
    }

    /// Issues a new access token for the session behind `refresh_token`.
    pub async fn renew_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<RenewedAccessToken, RenewError> {
        let refresh_payload = self.maker.verify_token(refresh_token).map_err(|e| {
            warn!(reason = %e, "Refresh token verification failed");
            RenewError::Token(e)
        })?;

        let session = match self.store.get_session(refresh_payload.id).await {
            Ok(session) => session,
            Err(StoreError::NotFound) => {
                warn!(session_id = %refresh_payload.id, "Session not found");
                return Err(RenewError::Session(SessionFailure::NotFound));
            }
            Err(StoreError::Unavailable(e)) => {
                warn!(session_id = %refresh_payload.id, error = %e, "Session lookup failed");
                return Err(RenewError::StoreUnavailable(e));
            }
        };

        check_session(&session, &refresh_payload, refresh_token, Utc::now()).map_err(|failure| {
            warn!(
                session_id = %session.id,
                username = %refresh_payload.username,
                reason = %failure,
                "Session rejected"
            );
            RenewError::Session(failure)
        })?;

        let (access_token, payload) = self
            .maker
            .create_token(&refresh_payload.username, self.access_token_duration)
            .map_err(RenewError::Issue)?;

        info!(
            session_id = %session.id,
            username = %payload.username,
            expires_at = %payload.expires_at,
            "Access token renewed"
        );

        Ok(RenewedAccessToken {
            access_token,
            access_token_expires_at: payload.expires_at,
            payload,
            session_id: session.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;
    use crate::token::AeadTokenMaker;

    const KEY: &[u8] = b"12345678901234567890123456789012";

    struct Fixture {
        maker: Arc<AeadTokenMaker>,
        store: Arc<MemorySessionStore>,
        rotation: SessionRotation,
    }

    fn fixture() -> Fixture {
        let maker = Arc::new(AeadTokenMaker::new(KEY).unwrap());
        let store = Arc::new(MemorySessionStore::new());
        let rotation = SessionRotation::new(maker.clone(), store.clone(), Duration::minutes(15));
        Fixture {
            maker,
            store,
            rotation,
        }
    }

    fn login(fx: &Fixture, username: &str) -> (String, Session) {
        let (token, payload) = fx.maker.create_token(username, Duration::hours(24)).unwrap();
        let session = Session {
            id: payload.id,
            username: payload.username.clone(),
            refresh_token: token.clone(),
            user_agent: "test-agent".to_string(),
            client_ip: "10.0.0.1".to_string(),
            is_blocked: false,
            created_at: payload.issued_at,
            expires_at: payload.expires_at,
        };
        fx.store.insert(session.clone());
        (token, session)
    }

    #[tokio::test]
    async fn test_renew_success() {
        let fx = fixture();
        let (refresh, session) = login(&fx, "alice");

        let before = Utc::now();
        let renewed = fx.rotation.renew_access_token(&refresh).await.unwrap();
        let after = Utc::now();

        let decoded = fx.maker.verify_token(&renewed.access_token).unwrap();
        assert_eq!(decoded.username, "alice");
        assert_eq!(decoded.expires_at, renewed.access_token_expires_at);
        assert!(renewed.access_token_expires_at >= before + Duration::minutes(15));
        assert!(renewed.access_token_expires_at <= after + Duration::minutes(15));
        assert_eq!(renewed.session_id, session.id);
        assert_ne!(decoded.id, session.id);
    }

    #[tokio::test]
    async fn test_renew_leaves_session_untouched() {
        let fx = fixture();
        let (refresh, session) = login(&fx, "alice");

        let first = fx.rotation.renew_access_token(&refresh).await.unwrap();
        let second = fx.rotation.renew_access_token(&refresh).await.unwrap();

        assert_ne!(first.access_token, second.access_token);
        assert_eq!(fx.store.get_session(session.id).await.unwrap(), session);
    }

    #[tokio::test]
    async fn test_invalid_refresh_token() {
        let fx = fixture();
        assert_eq!(
            fx.rotation.renew_access_token("garbage").await.unwrap_err(),
            RenewError::Token(TokenError::InvalidToken)
        );
    }

    #[tokio::test]
    async fn test_expired_refresh_token() {
        let fx = fixture();
        let (token, _) = fx
            .maker
            .create_token_at("alice", Duration::minutes(1), Utc::now() - Duration::hours(1))
            .unwrap();
        assert_eq!(
            fx.rotation.renew_access_token(&token).await.unwrap_err(),
            RenewError::Token(TokenError::ExpiredToken)
        );
    }

    #[tokio::test]
    async fn test_session_not_found() {
        let fx = fixture();
        let (token, _) = fx.maker.create_token("alice", Duration::hours(1)).unwrap();
        assert_eq!(
            fx.rotation.renew_access_token(&token).await.unwrap_err(),
            RenewError::Session(SessionFailure::NotFound)
        );
    }

    #[tokio::test]
    async fn test_blocked_session() {
        let fx = fixture();
        let (refresh, session) = login(&fx, "alice");
        fx.store.block(session.id);

        assert_eq!(
            fx.rotation.renew_access_token(&refresh).await.unwrap_err(),
            RenewError::Session(SessionFailure::Blocked)
        );
    }

    #[tokio::test]
    async fn test_superseded_refresh_token_rejected() {
        let fx = fixture();
        let (presented, payload) = fx.maker.create_token("alice", Duration::hours(1)).unwrap();
        let (current, _) = fx.maker.create_token("alice", Duration::hours(1)).unwrap();

        let now = Utc::now();
        fx.store.insert(Session {
            id: payload.id,
            username: "alice".to_string(),
            refresh_token: current,
            user_agent: "test-agent".to_string(),
            client_ip: "10.0.0.1".to_string(),
            is_blocked: false,
            created_at: now,
            expires_at: now + Duration::hours(1),
        });

        assert!(fx.maker.verify_token(&presented).is_ok());
        assert_eq!(
            fx.rotation.renew_access_token(&presented).await.unwrap_err(),
            RenewError::Session(SessionFailure::TokenMismatch)
        );
    }

    #[tokio::test]
    async fn test_store_unavailable() {
        let fx = fixture();
        let (refresh, _) = login(&fx, "alice");
        fx.store.set_offline(true);

        assert!(matches!(
            fx.rotation.renew_access_token(&refresh).await.unwrap_err(),
            RenewError::StoreUnavailable(_)
        ));
    }

    fn check_fixture() -> (Session, Payload, String) {
        let now = Utc::now();
        let payload = Payload::new("alice", Duration::hours(1), now).unwrap();
        let session = Session {
            id: payload.id,
            username: "alice".to_string(),
            refresh_token: "presented".to_string(),
            user_agent: String::new(),
            client_ip: String::new(),
            is_blocked: false,
            created_at: now,
            expires_at: now + Duration::hours(1),
        };
        (session, payload, "presented".to_string())
    }

    #[test]
    fn test_check_order_blocked_first() {
        let (mut session, payload, token) = check_fixture();
        session.is_blocked = true;
        session.username = "mallory".to_string();
        session.refresh_token = "other".to_string();
        session.expires_at = Utc::now() - Duration::hours(1);

        assert_eq!(
            check_session(&session, &payload, &token, Utc::now()),
            Err(SessionFailure::Blocked)
        );
    }

    #[test]
    fn test_check_order_user_before_token() {
        let (mut session, payload, token) = check_fixture();
        session.username = "mallory".to_string();
        session.refresh_token = "other".to_string();

        assert_eq!(
            check_session(&session, &payload, &token, Utc::now()),
            Err(SessionFailure::UserMismatch)
        );
    }

    #[test]
    fn test_check_order_token_before_expiry() {
        let (mut session, payload, token) = check_fixture();
        session.refresh_token = "other".to_string();
        session.expires_at = Utc::now() - Duration::hours(1);

        assert_eq!(
            check_session(&session, &payload, &token, Utc::now()),
            Err(SessionFailure::TokenMismatch)
        );
    }

    #[test]
    fn test_check_expired_session() {
        let (session, payload, token) = check_fixture();
        let later = session.expires_at + Duration::seconds(1);

        assert_eq!(
            check_session(&session, &payload, &token, later),
            Err(SessionFailure::Expired)
        );
        assert_eq!(check_session(&session, &payload, &token, session.expires_at), Ok(()));
    }

    #[test]
    fn test_error_mapping() {
        let not_found: AppError = RenewError::Session(SessionFailure::NotFound).into();
        assert_eq!(not_found.kind, ErrorKind::NotFound);

        let blocked: AppError = RenewError::Session(SessionFailure::Blocked).into();
        assert_eq!(blocked.kind, ErrorKind::Authentication);
        assert_eq!(blocked.message, "session rejected");

        let store: AppError = RenewError::StoreUnavailable("down".to_string()).into();
        assert_eq!(store.kind, ErrorKind::StoreUnavailable);
    }
}
