//! Bearer token creation, verification, and payload management.

pub mod aead;
pub mod maker;
pub mod payload;

pub use aead::AeadTokenMaker;
pub use maker::{TokenError, TokenMaker};
pub use payload::Payload;
