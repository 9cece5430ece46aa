use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PayloadError, PayloadKind};
use crate::models::reply::Reply;
use crate::payload::Payload;

/// Displayed in place of the content of a soft-deleted comment.
pub const DELETED_COMMENT_PLACEHOLDER: &str = "**komentar telah dihapus**";

/// A validated request to comment on a thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub thread_id: String,
    pub content: String,
    pub owner: String,
}

impl NewComment {
    pub fn from_payload(payload: &Payload) -> Result<Self, PayloadError> {
        let [thread_id, content, owner] =
            payload.require_strings(["threadId", "content", "owner"], PayloadKind::AddComment)?;
        Ok(Self {
            thread_id,
            content,
            owner,
        })
    }
}

/// Public projection of a freshly created comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedComment {
    pub id: String,
    pub content: String,
    pub owner: String,
}

/// A validated request to soft-delete a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteComment {
    pub thread_id: String,
    pub comment_id: String,
    pub owner: String,
}

impl DeleteComment {
    pub fn from_payload(payload: &Payload) -> Result<Self, PayloadError> {
        let [thread_id, comment_id, owner] = payload.require_strings(
            ["threadId", "commentId", "owner"],
            PayloadKind::DeleteComment,
        )?;
        Ok(Self {
            thread_id,
            comment_id,
            owner,
        })
    }
}

/// A comment row as read from storage, before masking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    pub id: String,
    pub username: String,
    pub content: String,
    pub date: DateTime<Utc>,
    pub is_delete: bool,
    pub like_count: i64,
}

/// Read-side projection of a comment, with its replies attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub username: String,
    pub date: DateTime<Utc>,
    pub content: String,
    pub like_count: u64,
    pub replies: Vec<Reply>,
}

impl TryFrom<CommentRecord> for Comment {
    type Error = PayloadError;

    fn try_from(record: CommentRecord) -> Result<Self, Self::Error> {
        if record.id.is_empty() || record.username.is_empty() || record.content.is_empty() {
            return Err(PayloadError::missing(PayloadKind::Comment));
        }
        let like_count = u64::try_from(record.like_count)
            .map_err(|_| PayloadError::mismatch(PayloadKind::Comment))?;

        let content = if record.is_delete {
            DELETED_COMMENT_PLACEHOLDER.to_string()
        } else {
            record.content
        };

        Ok(Self {
            id: record.id,
            username: record.username,
            date: record.date,
            content,
            like_count,
            replies: Vec::new(),
        })
    }
}
