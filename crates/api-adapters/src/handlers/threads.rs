use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use super::{created, success};
use crate::extract::{parse_body, AuthUser};
use crate::{ApiError, AppState};

/// `POST /threads`
pub async fn post_thread(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let payload = parse_body(&body)?.with("owner", user_id);
    let added = state.services.add_thread.execute(&payload).await?;
    Ok(created(json!({ "addedThread": added })))
}

/// `GET /threads/{thread_id}`
pub async fn get_thread(
    State(state): State<AppState>,
    Path(thread_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let thread = state.services.get_thread.execute(&thread_id).await?;
    Ok(success(json!({ "thread": thread })))
}
