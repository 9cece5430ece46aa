//! # storage-adapters
//!
//! Implementations of the repository ports: an in-memory store (always
//! available) and PostgreSQL behind the `db-postgres` feature.

pub mod memory;

#[cfg(feature = "db-postgres")]
pub mod postgres;

pub use memory::{Clock, InMemoryForum};

#[cfg(feature = "db-postgres")]
pub use postgres::PostgresForum;
