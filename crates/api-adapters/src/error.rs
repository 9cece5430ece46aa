//! # ApiError
//!
//! The single place where domain failures become HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use domains::{DomainError, PayloadError, PayloadKind, PayloadViolation, Resource};
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub const SERVER_ERROR_MESSAGE: &str = "terjadi kegagalan pada server kami";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Missing authentication")]
    MissingAuthentication,

    /// Body is present but is not JSON.
    #[error("payload tidak valid")]
    MalformedBody,
}

impl ApiError {
    /// Status code and client-facing message. `None` means a server fault.
    fn classify(&self) -> (StatusCode, Option<String>) {
        match self {
            ApiError::MissingAuthentication => (StatusCode::UNAUTHORIZED, Some(self.to_string())),
            ApiError::MalformedBody => (StatusCode::BAD_REQUEST, Some(self.to_string())),
            ApiError::Domain(err) => match err {
                DomainError::InvalidPayload(payload) => match payload_message(payload) {
                    Some(message) => (StatusCode::BAD_REQUEST, Some(message.to_string())),
                    None => (StatusCode::INTERNAL_SERVER_ERROR, None),
                },
                DomainError::NotFound { resource, .. } => {
                    (StatusCode::NOT_FOUND, Some(not_found_message(*resource).to_string()))
                }
                DomainError::Forbidden(_) => (StatusCode::FORBIDDEN, Some("ga boleh".to_string())),
                DomainError::Unauthenticated(message) => {
                    (StatusCode::UNAUTHORIZED, Some(message.clone()))
                }
                DomainError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, None),
            },
        }
    }
}

fn not_found_message(resource: Resource) -> &'static str {
    match resource {
        Resource::Thread => "thread tidak ditemukan",
        Resource::Comment => "comment tidak ditemukan",
        Resource::Reply => "balasan tidak ditemukan",
    }
}

/// Client-facing text for a payload error. Stored-record projections
/// (`Comment`, `Reply`) are server faults and yield `None`.
fn payload_message(err: &PayloadError) -> Option<&'static str> {
    use PayloadViolation::*;

    let message = match (err.kind, err.violation) {
        (PayloadKind::AddThread, MissingProperty) => "harus mengirimkan title dan body",
        (PayloadKind::AddThread, TypeMismatch) => "tipe data salah",
        (_, TitleTooLong) => {
            "tidak dapat membuat thread baru karena karakter title melebihi batas limit"
        }
        (PayloadKind::AddComment | PayloadKind::AddReply, MissingProperty) => {
            "harus mengirimkan content"
        }
        (PayloadKind::AddComment | PayloadKind::AddReply, TypeMismatch) => "content harus string",
        (PayloadKind::Comment | PayloadKind::Reply, _) => return None,
        (_, MissingProperty) => "data yang dikirimkan tidak lengkap",
        (_, TypeMismatch) => "tipe data salah",
    };
    Some(message)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.classify();
        match message {
            Some(message) => {
                (status, Json(json!({ "status": "fail", "message": message }))).into_response()
            }
            None => {
                error!(error = %self, "request failed");
                (
                    status,
                    Json(json!({ "status": "error", "message": SERVER_ERROR_MESSAGE })),
                )
                    .into_response()
            }
        }
    }
}
