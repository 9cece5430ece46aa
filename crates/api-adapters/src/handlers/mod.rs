//! # Handlers
//!
//! Each handler merges path parameters and the caller's id into the body
//! payload, runs one use case and wraps the result in the success envelope.
//! Path parameters and `owner` are applied after the body so a client cannot
//! override them.

use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

pub mod comments;
pub mod likes;
pub mod replies;
pub mod threads;

pub(crate) fn success(data: Value) -> Json<Value> {
    Json(json!({ "status": "success", "data": data }))
}

pub(crate) fn created(data: Value) -> (StatusCode, Json<Value>) {
    (StatusCode::CREATED, success(data))
}

pub(crate) fn ok() -> Json<Value> {
    Json(json!({ "status": "success" }))
}

pub async fn health() -> &'static str {
    "ok"
}
