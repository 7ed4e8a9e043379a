//! Core traits defined in `bankauth-core` and implemented by other crates.

pub mod service;

pub use service::{ServiceError, ServiceUnit};
