//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Access-token renewal request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenewAccessTokenRequest {
    #[validate(length(min = 1, message = "refresh_token is required"))]
    pub refresh_token: String,
}
