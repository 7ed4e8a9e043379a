//! Transport-agnostic bearer authorization.
//!
//! Parsing and verification live in [`Authorizer`]; transports only supply an
//! [`AuthorizationCarrier`] over their header or metadata map.

pub mod authorizer;
pub mod carrier;

pub use authorizer::{AuthenticationFailure, Authorizer};
pub use carrier::{AUTHORIZATION_KEY, AuthorizationCarrier, BEARER_SCHEME};
