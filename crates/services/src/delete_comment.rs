use std::sync::Arc;

use domains::{CommentRepository, DeleteComment, Payload, Result, ThreadRepository};
use tracing::{info, instrument};

/// Soft-deletes a comment on behalf of its owner.
#[derive(Clone)]
pub struct DeleteCommentUseCase {
    threads: Arc<dyn ThreadRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl DeleteCommentUseCase {
    pub fn new(threads: Arc<dyn ThreadRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { threads, comments }
    }

    /// Expects `threadId`, `commentId` and `owner`.
    #[instrument(skip_all)]
    pub async fn execute(&self, payload: &Payload) -> Result<()> {
        let command = DeleteComment::from_payload(payload)?;
        self.threads.verify_thread_exists(&command.thread_id).await?;
        self.comments
            .verify_comment_exists(&command.thread_id, &command.comment_id)
            .await?;
        self.comments
            .verify_comment_owner(&command.comment_id, &command.owner)
            .await?;

        self.comments.delete_comment(&command.comment_id).await?;
        info!(comment_id = %command.comment_id, "comment deleted");
        Ok(())
    }
}
