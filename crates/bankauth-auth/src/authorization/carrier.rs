//! Header/metadata accessor abstraction.

use std::borrow::Cow;

/// Header or metadata key holding the credential.
pub const AUTHORIZATION_KEY: &str = "authorization";

/// The only accepted authorization scheme, compared case-insensitively.
pub const BEARER_SCHEME: &str = "bearer";

/// Read-only view over a request's header or metadata map.
///
/// Implementations must look keys up case-insensitively and return values in
/// the order they appear on the request. Values that are not valid UTF-8 are
/// returned lossily; they will fail token verification downstream.
pub trait AuthorizationCarrier {
    /// Returns every value stored under `key`.
    fn values(&self, key: &str) -> Vec<Cow<'_, str>>;
}

impl<C: AuthorizationCarrier + ?Sized> AuthorizationCarrier for &C {
    fn values(&self, key: &str) -> Vec<Cow<'_, str>> {
        (**self).values(key)
    }
}
