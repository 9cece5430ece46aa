use axum::extract::{Path, State};
use axum::Json;
use domains::Payload;
use serde_json::Value;
use tracing::debug;

use super::ok;
use crate::extract::AuthUser;
use crate::{ApiError, AppState};

/// `PUT .../likes` toggles; the response does not reveal the new state.
pub async fn put_like(
    State(state): State<AppState>,
    Path((thread_id, comment_id)): Path<(String, String)>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Value>, ApiError> {
    let payload = Payload::new()
        .with("threadId", thread_id)
        .with("commentId", comment_id)
        .with("userId", user_id);
    let state_after = state.services.like_comment.execute(&payload).await?;
    debug!(?state_after, "like toggled");
    Ok(ok())
}
