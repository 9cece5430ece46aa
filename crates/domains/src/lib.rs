//! forum/crates/domains/src/lib.rs
//!
//! Entities, payload validators and port definitions for the forum API.
//! Nothing in here performs I/O.

pub mod error;
pub mod ids;
pub mod models;
pub mod payload;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use payload::Payload;
pub use traits::*;
