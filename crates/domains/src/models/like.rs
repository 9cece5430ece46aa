use serde::{Deserialize, Serialize};

use crate::error::{PayloadError, PayloadKind};
use crate::payload::Payload;

/// A validated like/unlike toggle request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeComment {
    pub thread_id: String,
    pub comment_id: String,
    pub user_id: String,
}

impl LikeComment {
    pub fn from_payload(payload: &Payload) -> Result<Self, PayloadError> {
        let [thread_id, user_id, comment_id] = payload.require_strings(
            ["threadId", "userId", "commentId"],
            PayloadKind::LikeComment,
        )?;
        Ok(Self {
            thread_id,
            comment_id,
            user_id,
        })
    }
}

/// Whether a user currently likes a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LikeState {
    Liked,
    NotLiked,
}

impl LikeState {
    pub fn toggled(self) -> Self {
        match self {
            LikeState::Liked => LikeState::NotLiked,
            LikeState::NotLiked => LikeState::Liked,
        }
    }
}
