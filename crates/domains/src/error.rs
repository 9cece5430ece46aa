//! # DomainError
//!
//! Centralized error handling for the forum. Maps domain failures to
//! error kinds the HTTP boundary can tell apart (400 / 401 / 403 / 404).

use std::fmt;

use thiserror::Error;

/// The kind of entity a lookup failed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Thread,
    Comment,
    Reply,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Thread => "thread",
            Resource::Comment => "comment",
            Resource::Reply => "reply",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The payload shape being validated. Forms the prefix of the error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    AddThread,
    AddComment,
    AddReply,
    DeleteComment,
    DeleteReply,
    LikeComment,
    Comment,
    Reply,
}

impl PayloadKind {
    fn prefix(&self) -> &'static str {
        match self {
            PayloadKind::AddThread => "ADD_THREAD",
            PayloadKind::AddComment => "ADD_COMMENT",
            PayloadKind::AddReply => "ADD_REPLY",
            PayloadKind::DeleteComment => "DELETE_COMMENT",
            PayloadKind::DeleteReply => "DELETE_REPLY",
            PayloadKind::LikeComment => "LIKE_COMMENT_USE_CASE",
            PayloadKind::Comment => "COMMENT",
            PayloadKind::Reply => "REPLY",
        }
    }
}

/// What was wrong with the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadViolation {
    /// A required field is absent, null or empty.
    MissingProperty,
    /// A required field has the wrong JSON type or an out-of-range value.
    TypeMismatch,
    /// The thread title exceeds the configured limit.
    TitleTooLong,
}

/// Structural validation failure of an incoming payload or a stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PayloadError {
    pub kind: PayloadKind,
    pub violation: PayloadViolation,
}

impl PayloadError {
    pub fn new(kind: PayloadKind, violation: PayloadViolation) -> Self {
        Self { kind, violation }
    }

    pub fn missing(kind: PayloadKind) -> Self {
        Self::new(kind, PayloadViolation::MissingProperty)
    }

    pub fn mismatch(kind: PayloadKind) -> Self {
        Self::new(kind, PayloadViolation::TypeMismatch)
    }

    /// Stable machine-readable code, e.g. `ADD_THREAD.NOT_CONTAIN_NEEDED_PROPERTY`.
    pub fn code(&self) -> String {
        let suffix = match (self.kind, self.violation) {
            (PayloadKind::LikeComment, PayloadViolation::MissingProperty) => "DATA_MISMATCH",
            (PayloadKind::LikeComment, PayloadViolation::TypeMismatch) => {
                "PAYLOAD_NOT_MEET_DATA_TYPE_SPECIFICATION"
            }
            (_, PayloadViolation::MissingProperty) => "NOT_CONTAIN_NEEDED_PROPERTY",
            (_, PayloadViolation::TypeMismatch) => "NOT_MEET_DATA_TYPE_SPECIFICATION",
            (_, PayloadViolation::TitleTooLong) => "TITLE_LIMIT_CHAR",
        };
        format!("{}.{}", self.kind.prefix(), suffix)
    }
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

impl std::error::Error for PayloadError {}

/// The primary error type for all domain and use-case operations.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Missing or mistyped payload fields
    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] PayloadError),

    /// Referenced thread, comment or reply does not exist
    #[error("{resource} not found with ID {id}")]
    NotFound { resource: Resource, id: String },

    /// Caller is not the owner of the resource
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Missing or undecodable credential
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// Infrastructure failure (e.g., DB down, constraint violation)
    #[error("storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(resource: Resource, id: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource,
            id: id.into(),
        }
    }

    pub fn storage(err: impl fmt::Display) -> Self {
        DomainError::Storage(err.to_string())
    }
}

/// A specialized Result type for forum logic.
pub type Result<T> = std::result::Result<T, DomainError>;
