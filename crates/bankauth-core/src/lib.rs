//! # bankauth-core
//!
//! Core crate for the bankauth service. Contains configuration schemas,
//! the service-unit trait shared by every long-running network service,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other bankauth crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
