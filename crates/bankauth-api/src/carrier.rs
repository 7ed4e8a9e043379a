//! HTTP header adapter for the shared authorizer.

use std::borrow::Cow;

use axum::http::HeaderMap;

use bankauth_auth::AuthorizationCarrier;

/// Exposes request headers to [`bankauth_auth::Authorizer`].
#[derive(Debug, Clone, Copy)]
pub struct HttpCarrier<'a>(pub &'a HeaderMap);

impl AuthorizationCarrier for HttpCarrier<'_> {
    fn values(&self, key: &str) -> Vec<Cow<'_, str>> {
        self.0
            .get_all(key)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()))
            .collect()
    }
}
