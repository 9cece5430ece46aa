use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use domains::Payload;
use serde_json::{json, Value};

use super::{created, ok};
use crate::extract::{parse_body, AuthUser};
use crate::{ApiError, AppState};

pub async fn post_reply(
    State(state): State<AppState>,
    Path((thread_id, comment_id)): Path<(String, String)>,
    AuthUser(user_id): AuthUser,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let payload = parse_body(&body)?
        .with("threadId", thread_id)
        .with("commentId", comment_id)
        .with("owner", user_id);
    let added = state.services.add_reply.execute(&payload).await?;
    Ok(created(json!({ "addedReply": added })))
}

pub async fn delete_reply(
    State(state): State<AppState>,
    Path((thread_id, comment_id, reply_id)): Path<(String, String, String)>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Value>, ApiError> {
    let payload = Payload::new()
        .with("threadId", thread_id)
        .with("commentId", comment_id)
        .with("replyId", reply_id)
        .with("owner", user_id);
    state.services.delete_reply.execute(&payload).await?;
    Ok(ok())
}
