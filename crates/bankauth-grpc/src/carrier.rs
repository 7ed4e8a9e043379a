//! gRPC metadata adapter for the shared authorizer.

use std::borrow::Cow;

use tonic::metadata::MetadataMap;

use bankauth_auth::AuthorizationCarrier;

/// Exposes request metadata to [`bankauth_auth::Authorizer`].
#[derive(Debug, Clone, Copy)]
pub struct MetadataCarrier<'a>(pub &'a MetadataMap);

impl AuthorizationCarrier for MetadataCarrier<'_> {
    fn values(&self, key: &str) -> Vec<Cow<'_, str>> {
        let key = key.to_ascii_lowercase();
        self.0
            .get_all(key.as_str())
            .iter()
            .map(|value| match value.to_str() {
                Ok(s) => Cow::Borrowed(s),
                Err(_) => String::from_utf8_lossy(value.as_encoded_bytes()),
            })
            .collect()
    }
}
