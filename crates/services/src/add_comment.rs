use std::sync::Arc;

use domains::{AddedComment, CommentRepository, NewComment, Payload, Result, ThreadRepository};
use tracing::{info, instrument};

/// Comments on an existing thread.
#[derive(Clone)]
pub struct AddCommentUseCase {
    threads: Arc<dyn ThreadRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl AddCommentUseCase {
    pub fn new(threads: Arc<dyn ThreadRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { threads, comments }
    }

    /// Expects `threadId`, `content` and `owner`.
    #[instrument(skip_all)]
    pub async fn execute(&self, payload: &Payload) -> Result<AddedComment> {
        let comment = NewComment::from_payload(payload)?;
        self.threads.verify_thread_exists(&comment.thread_id).await?;

        let added = self.comments.add_comment(&comment).await?;
        info!(thread_id = %comment.thread_id, comment_id = %added.id, "comment added");
        Ok(added)
    }
}
