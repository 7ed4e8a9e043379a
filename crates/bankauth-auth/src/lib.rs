//! # bankauth-auth
//!
//! Authentication primitives shared by every bankauth transport.
//!
//! ## Modules
//!
//! - `token` — authenticated-encryption token creation and verification
//! - `authorization` — bearer header parsing and verification, transport agnostic
//! - `session` — session record, store contract, and access-token renewal

pub mod authorization;
pub mod session;
pub mod token;

pub use authorization::{AuthenticationFailure, AuthorizationCarrier, Authorizer};
pub use session::{
    MemorySessionStore, RenewError, RenewedAccessToken, Session, SessionFailure,
    SessionRotation, SessionStore, StoreError, check_session,
};
pub use token::{AeadTokenMaker, Payload, TokenError, TokenMaker};
