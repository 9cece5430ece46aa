//! # auth-adapters
//!
//! Credential handling for the forum: argon2 password hashing and, behind
//! the `auth-jwt` feature, HS256 access tokens implementing
//! [`domains::TokenVerifier`].

use thiserror::Error;

pub mod password;

#[cfg(feature = "auth-jwt")]
pub mod jwt;

#[cfg(feature = "auth-jwt")]
pub use jwt::{AccessClaims, JwtTokenManager};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("token encoding failed: {0}")]
    Encode(String),

    #[error("access token tidak valid")]
    InvalidToken,
}

impl From<AuthError> for domains::DomainError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidToken => domains::DomainError::Unauthenticated(err.to_string()),
            other => domains::DomainError::Storage(other.to_string()),
        }
    }
}
