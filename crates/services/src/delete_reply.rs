use std::sync::Arc;

use domains::{
    CommentRepository, DeleteReply, Payload, ReplyRepository, Result, ThreadRepository,
};
use tracing::{info, instrument};

/// Soft-deletes a reply on behalf of its owner.
#[derive(Clone)]
pub struct DeleteReplyUseCase {
    threads: Arc<dyn ThreadRepository>,
    comments: Arc<dyn CommentRepository>,
    replies: Arc<dyn ReplyRepository>,
}

impl DeleteReplyUseCase {
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

    /// Expects `threadId`, `commentId`, `replyId` and `owner`.
    #[instrument(skip_all)]
    pub async fn execute(&self, payload: &Payload) -> Result<()> {
        let command = DeleteReply::from_payload(payload)?;
        self.threads.verify_thread_exists(&command.thread_id).await?;
        self.comments
            .verify_comment_exists(&command.thread_id, &command.comment_id)
            .await?;
        self.replies
            .verify_reply_exists(&command.comment_id, &command.reply_id)
            .await?;
        self.replies
            .verify_reply_owner(&command.reply_id, &command.owner)
            .await?;

        self.replies.delete_reply(&command.reply_id).await?;
        info!(reply_id = %command.reply_id, "reply deleted");
        Ok(())
    }
}
