use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PayloadError, PayloadKind, PayloadViolation};
use crate::models::comment::Comment;
use crate::payload::Payload;

/// Default upper bound on thread title length, in characters.
pub const DEFAULT_MAX_TITLE_LENGTH: usize = 50;

/// A validated request to open a thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewThread {
    pub title: String,
    pub body: String,
    pub owner: String,
}

impl NewThread {
    pub fn from_payload(payload: &Payload, max_title_length: usize) -> Result<Self, PayloadError> {
        let [title, body, owner] =
            payload.require_strings(["title", "body", "owner"], PayloadKind::AddThread)?;

        if title.chars().count() > max_title_length {
            return Err(PayloadError::new(
                PayloadKind::AddThread,
                PayloadViolation::TitleTooLong,
            ));
        }

        Ok(Self { title, body, owner })
    }
}

/// Public projection of a freshly created thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedThread {
    pub id: String,
    pub title: String,
    pub owner: String,
}

/// A stored thread with its owner's username resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadDetail {
    pub id: String,
    pub title: String,
    pub body: String,
    pub date: DateTime<Utc>,
    pub username: String,
}

/// A thread together with its comment tree, as served by `GET /threads/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadView {
    #[serde(flatten)]
    pub thread: ThreadDetail,
    pub comments: Vec<Comment>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(title: &str) -> Payload {
        Payload::from_value(json!({ "title": title, "body": "body", "owner": "user-123" }))
    }

    #[test]
    fn accepts_title_at_the_limit() {
        let title = "a".repeat(DEFAULT_MAX_TITLE_LENGTH);
        let thread = NewThread::from_payload(&payload(&title), DEFAULT_MAX_TITLE_LENGTH).unwrap();
        assert_eq!(thread.title, title);
        assert_eq!(thread.owner, "user-123");
    }

    #[test]
    fn rejects_title_over_the_limit() {
        let title = "a".repeat(61);
        let err = NewThread::from_payload(&payload(&title), DEFAULT_MAX_TITLE_LENGTH).unwrap_err();
        assert_eq!(err.code(), "ADD_THREAD.TITLE_LIMIT_CHAR");
    }

    #[test]
    fn counts_characters_not_bytes() {
        let title = "é".repeat(DEFAULT_MAX_TITLE_LENGTH);
        assert!(NewThread::from_payload(&payload(&title), DEFAULT_MAX_TITLE_LENGTH).is_ok());
    }

    #[test]
    fn rejects_missing_body() {
        let payload = Payload::from_value(json!({ "title": "t", "owner": "user-123" }));
        let err = NewThread::from_payload(&payload, DEFAULT_MAX_TITLE_LENGTH).unwrap_err();
        assert_eq!(err.code(), "ADD_THREAD.NOT_CONTAIN_NEEDED_PROPERTY");
    }

    #[test]
    fn rejects_non_string_title() {
        let payload = Payload::from_value(json!({ "title": 123, "body": "b", "owner": "user-123" }));
        let err = NewThread::from_payload(&payload, DEFAULT_MAX_TITLE_LENGTH).unwrap_err();
        assert_eq!(err.code(), "ADD_THREAD.NOT_MEET_DATA_TYPE_SPECIFICATION");
    }
}
