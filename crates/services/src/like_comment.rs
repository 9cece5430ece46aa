use std::sync::Arc;

use domains::{
    CommentRepository, LikeComment, LikeRepository, LikeState, Payload, Result, ThreadRepository,
};
use tracing::{info, instrument, warn};

/// Flips a user's like on a comment.
#[derive(Clone)]
pub struct LikeCommentUseCase {
    threads: Arc<dyn ThreadRepository>,
    comments: Arc<dyn CommentRepository>,
    likes: Arc<dyn LikeRepository>,
}

impl LikeCommentUseCase {
    pub fn new(
        threads: Arc<dyn ThreadRepository>,
        comments: Arc<dyn CommentRepository>,
        likes: Arc<dyn LikeRepository>,
    ) -> Self {
        Self {
            threads,
            comments,
            likes,
        }
    }

    /// Expects `threadId`, `commentId` and `userId`. Returns the state after
    /// the toggle.
    #[instrument(skip_all)]
    pub async fn execute(&self, payload: &Payload) -> Result<LikeState> {
        let like = LikeComment::from_payload(payload)?;
        self.threads.verify_thread_exists(&like.thread_id).await?;
        self.comments
            .verify_comment_exists(&like.thread_id, &like.comment_id)
            .await?;

        let current = if self.likes.verify_is_like_exists(&like).await? {
            LikeState::Liked
        } else {
            LikeState::NotLiked
        };

        // The like row and the counter are separate statements. The counter
        // only moves when the row write actually happened, so a concurrent
        // toggle by the same user cannot count twice; a crash in between can
        // still leave the counter off by one.
        match current {
            LikeState::Liked => {
                if self.likes.unlike_comment(&like).await? {
                    self.comments.remove_like(&like.comment_id).await?;
                } else {
                    warn!(comment_id = %like.comment_id, "like already removed");
                }
            }
            LikeState::NotLiked => {
                if self.likes.like_comment(&like).await? {
                    self.comments.add_like(&like.comment_id).await?;
                } else {
                    warn!(comment_id = %like.comment_id, "like already present");
                }
            }
        }

        let next = current.toggled();
        info!(comment_id = %like.comment_id, user_id = %like.user_id, state = ?next, "like toggled");
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{
        DomainError, MockCommentRepository, MockLikeRepository, MockThreadRepository, Resource,
    };

    fn payload() -> Payload {
        Payload::new()
            .with("threadId", "thread-123")
            .with("commentId", "comment-123")
            .with("userId", "user-123")
    }

    fn parents() -> (MockThreadRepository, MockCommentRepository) {
        let mut threads = MockThreadRepository::new();
        threads
            .expect_verify_thread_exists()
            .withf(|id| id == "thread-123")
            .returning(|_| Ok(()));
        let mut comments = MockCommentRepository::new();
        comments
            .expect_verify_comment_exists()
            .withf(|t, c| t == "thread-123" && c == "comment-123")
            .returning(|_, _| Ok(()));
        (threads, comments)
    }

    #[tokio::test]
    async fn likes_when_not_liked() {
        let (threads, mut comments) = parents();
        comments
            .expect_add_like()
            .withf(|c| c == "comment-123")
            .times(1)
            .returning(|_| Ok(()));
        comments.expect_remove_like().never();

        let mut likes = MockLikeRepository::new();
        likes.expect_verify_is_like_exists().returning(|_| Ok(false));
        likes
            .expect_like_comment()
            .withf(|l| l.user_id == "user-123" && l.comment_id == "comment-123")
            .times(1)
            .returning(|_| Ok(true));
        likes.expect_unlike_comment().never();

        let use_case = LikeCommentUseCase::new(Arc::new(threads), Arc::new(comments), Arc::new(likes));
        assert_eq!(use_case.execute(&payload()).await.unwrap(), LikeState::Liked);
    }

    #[tokio::test]
    async fn unlikes_when_liked() {
        let (threads, mut comments) = parents();
        comments
            .expect_remove_like()
            .withf(|c| c == "comment-123")
            .times(1)
            .returning(|_| Ok(()));
        comments.expect_add_like().never();

        let mut likes = MockLikeRepository::new();
        likes.expect_verify_is_like_exists().returning(|_| Ok(true));
        likes.expect_unlike_comment().times(1).returning(|_| Ok(true));
        likes.expect_like_comment().never();

        let use_case = LikeCommentUseCase::new(Arc::new(threads), Arc::new(comments), Arc::new(likes));
        assert_eq!(use_case.execute(&payload()).await.unwrap(), LikeState::NotLiked);
    }

    #[tokio::test]
    async fn lost_race_leaves_counter_alone() {
        let (threads, mut comments) = parents();
        comments.expect_add_like().never();

        let mut likes = MockLikeRepository::new();
        likes.expect_verify_is_like_exists().returning(|_| Ok(false));
        likes.expect_like_comment().times(1).returning(|_| Ok(false));

        let use_case = LikeCommentUseCase::new(Arc::new(threads), Arc::new(comments), Arc::new(likes));
        assert_eq!(use_case.execute(&payload()).await.unwrap(), LikeState::Liked);
    }

    #[tokio::test]
    async fn missing_comment_stops_before_toggle() {
        let mut threads = MockThreadRepository::new();
        threads.expect_verify_thread_exists().returning(|_| Ok(()));
        let mut comments = MockCommentRepository::new();
        comments
            .expect_verify_comment_exists()
            .returning(|_, id| Err(DomainError::not_found(Resource::Comment, id)));
        let mut likes = MockLikeRepository::new();
        likes.expect_verify_is_like_exists().never();

        let use_case = LikeCommentUseCase::new(Arc::new(threads), Arc::new(comments), Arc::new(likes));
        let err = use_case.execute(&payload()).await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound { resource: Resource::Comment, .. }));
    }

    #[tokio::test]
    async fn rejects_payload_without_user() {
        let threads = MockThreadRepository::new();
        let comments = MockCommentRepository::new();
        let likes = MockLikeRepository::new();

        let use_case = LikeCommentUseCase::new(Arc::new(threads), Arc::new(comments), Arc::new(likes));
        let payload = Payload::new()
            .with("threadId", "thread-123")
            .with("commentId", "comment-123");

        let err = use_case.execute(&payload).await.unwrap_err();
        assert!(
            matches!(err, DomainError::InvalidPayload(e) if e.code() == "LIKE_COMMENT_USE_CASE.DATA_MISMATCH")
        );
    }
}
