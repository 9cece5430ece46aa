use std::sync::Arc;

use domains::{
    AddedReply, CommentRepository, NewReply, Payload, ReplyRepository, Result, ThreadRepository,
};
use tracing::{info, instrument};

/// Replies to a comment of an existing thread.
#[derive(Clone)]
pub struct AddReplyUseCase {
    threads: Arc<dyn ThreadRepository>,
    comments: Arc<dyn CommentRepository>,
    replies: Arc<dyn ReplyRepository>,
}

impl AddReplyUseCase {
    pub fn new(
        threads: Arc<dyn ThreadRepository>,
        comments: Arc<dyn CommentRepository>,
        replies: Arc<dyn ReplyRepository>,
    ) -> Self {
        Self {
            threads,
            comments,
            replies,
        }
    }

    /// Expects `threadId`, `commentId`, `content` and `owner`.
    #[instrument(skip_all)]
    pub async fn execute(&self, payload: &Payload) -> Result<AddedReply> {
        let reply = NewReply::from_payload(payload)?;
        self.threads.verify_thread_exists(&reply.thread_id).await?;
        self.comments
            .verify_comment_exists(&reply.thread_id, &reply.comment_id)
            .await?;

        let added = self.replies.add_reply(&reply).await?;
        info!(comment_id = %reply.comment_id, reply_id = %added.id, "reply added");
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{
        DomainError, MockCommentRepository, MockReplyRepository, MockThreadRepository, Resource,
    };
    use serde_json::json;

    fn payload() -> Payload {
        Payload::from_value(json!({ "content": "sebuah balasan" }))
            .with("threadId", "thread-123")
            .with("commentId", "comment-123")
            .with("owner", "user-123")
    }

    #[tokio::test]
    async fn orchestrates_add_reply() {
        let mut threads = MockThreadRepository::new();
        threads
            .expect_verify_thread_exists()
            .withf(|id| id == "thread-123")
            .times(1)
            .returning(|_| Ok(()));

        let mut comments = MockCommentRepository::new();
        comments
            .expect_verify_comment_exists()
            .withf(|thread_id, comment_id| thread_id == "thread-123" && comment_id == "comment-123")
            .times(1)
            .returning(|_, _| Ok(()));

        let mut replies = MockReplyRepository::new();
        replies
            .expect_add_reply()
            .withf(|r| r.comment_id == "comment-123" && r.content == "sebuah balasan")
            .times(1)
            .returning(|r| {
                Ok(AddedReply {
                    id: "reply-123".into(),
                    content: r.content.clone(),
                    owner: r.owner.clone(),
                })
            });

        let use_case =
            AddReplyUseCase::new(Arc::new(threads), Arc::new(comments), Arc::new(replies));
        let added = use_case.execute(&payload()).await.unwrap();

        assert_eq!(
            added,
            AddedReply {
                id: "reply-123".into(),
                content: "sebuah balasan".into(),
                owner: "user-123".into(),
            }
        );
    }

    #[tokio::test]
    async fn missing_comment_prevents_the_write() {
        let mut threads = MockThreadRepository::new();
        threads.expect_verify_thread_exists().returning(|_| Ok(()));

        let mut comments = MockCommentRepository::new();
        comments
            .expect_verify_comment_exists()
            .returning(|_, id| Err(DomainError::not_found(Resource::Comment, id)));

        let mut replies = MockReplyRepository::new();
        replies.expect_add_reply().never();

        let use_case =
            AddReplyUseCase::new(Arc::new(threads), Arc::new(comments), Arc::new(replies));
        let err = use_case.execute(&payload()).await.unwrap_err();

        assert!(matches!(
            err,
            DomainError::NotFound { resource: Resource::Comment, ref id } if id == "comment-123"
        ));
    }
}
