use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PayloadError, PayloadKind};
use crate::payload::Payload;

/// Displayed in place of the content of a soft-deleted reply.
pub const DELETED_REPLY_PLACEHOLDER: &str = "**balasan telah dihapus**";

/// A validated request to reply to a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReply {
    pub thread_id: String,
    pub comment_id: String,
    pub content: String,
    pub owner: String,
}

impl NewReply {
    pub fn from_payload(payload: &Payload) -> Result<Self, PayloadError> {
        let [thread_id, comment_id, content, owner] = payload.require_strings(
            ["threadId", "commentId", "content", "owner"],
            PayloadKind::AddReply,
        )?;
        Ok(Self {
            thread_id,
            comment_id,
            content,
            owner,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedReply {
    pub id: String,
    pub content: String,
    pub owner: String,
}

/// A validated request to soft-delete a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteReply {
    pub thread_id: String,
    pub comment_id: String,
    pub reply_id: String,
    pub owner: String,
}

impl DeleteReply {
    pub fn from_payload(payload: &Payload) -> Result<Self, PayloadError> {
        let [thread_id, comment_id, reply_id, owner] = payload.require_strings(
            ["threadId", "commentId", "replyId", "owner"],
            PayloadKind::DeleteReply,
        )?;
        Ok(Self {
            thread_id,
            comment_id,
            reply_id,
            owner,
        })
    }
}

/// A reply row as read from storage, before masking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyRecord {
    pub id: String,
    pub comment_id: String,
    pub username: String,
    pub content: String,
    pub date: DateTime<Utc>,
    pub is_delete: bool,
}

/// Read-side projection of a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub id: String,
    /// Parent comment; used to nest the reply, not rendered.
    #[serde(skip)]
    pub comment_id: String,
    pub content: String,
    pub date: DateTime<Utc>,
    pub username: String,
}

impl TryFrom<ReplyRecord> for Reply {
    type Error = PayloadError;

    fn try_from(record: ReplyRecord) -> Result<Self, Self::Error> {
        if record.id.is_empty()
            || record.comment_id.is_empty()
            || record.username.is_empty()
            || record.content.is_empty()
        {
            return Err(PayloadError::missing(PayloadKind::Reply));
        }

        let content = if record.is_delete {
            DELETED_REPLY_PLACEHOLDER.to_string()
        } else {
            record.content
        };

        Ok(Self {
            id: record.id,
            comment_id: record.comment_id,
            content,
            date: record.date,
            username: record.username,
        })
    }
}
