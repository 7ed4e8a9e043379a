//! Built-in task handlers.

pub mod audit;

pub use audit::{
    TOKEN_RENEWED, TokenRenewedAuditHandler, TokenRenewedTask, enqueue_token_renewed,
};
