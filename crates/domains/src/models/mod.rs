//! # Domain Models
//!
//! Entities of the forum: threads, comments, replies and likes. Write-side
//! types (`New*`, `Delete*`) are built from a [`Payload`](crate::payload::Payload)
//! and carry no id; read-side types apply soft-delete masking on construction.

pub mod comment;
pub mod like;
pub mod reply;
pub mod thread;

pub use comment::*;
pub use like::*;
pub use reply::*;
pub use thread::*;
