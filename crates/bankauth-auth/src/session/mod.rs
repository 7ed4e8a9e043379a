//! Sessions and access-token renewal.

pub mod memory;
pub mod model;
pub mod rotation;
pub mod store;

pub use memory::MemorySessionStore;
pub use model::Session;
pub use rotation::{RenewError, RenewedAccessToken, SessionFailure, SessionRotation, check_session};
pub use store::{SessionStore, StoreError};
