//! # bankauth-database
//!
//! PostgreSQL connection management and the session store used by
//! access-token renewal. Schema and migrations are owned elsewhere.

pub mod connection;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::SessionRepository;
