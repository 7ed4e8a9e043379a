//! # bankauth-grpc
//!
//! gRPC transport for bankauth.
//!
//! The `bank.Auth` service (see `proto/auth.proto`) exposes access-token
//! renewal and identity lookup. Bearer credentials are read from request
//! metadata through [`MetadataCarrier`] and verified by the same
//! [`bankauth_auth::Authorizer`] the HTTP gateway uses.

pub mod carrier;
pub mod client;
pub mod error;
pub mod pb;
pub mod server;
pub mod service;
pub mod unit;

pub use carrier::MetadataCarrier;
pub use client::AuthClient;
pub use server::{Auth, AuthServer};
pub use service::AuthService;
pub use unit::GrpcServer;
