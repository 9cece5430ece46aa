use std::collections::HashMap;
use std::sync::Arc;

use domains::{
    Comment, CommentRepository, Reply, ReplyRepository, Result, ThreadRepository, ThreadView,
};
use tracing::{debug, instrument};

/// Assembles a thread with its comments and their nested replies.
#[derive(Clone)]
pub struct GetThreadUseCase {
    threads: Arc<dyn ThreadRepository>,
    comments: Arc<dyn CommentRepository>,
    replies: Arc<dyn ReplyRepository>,
}

impl GetThreadUseCase {
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

    #[instrument(skip(self))]
    pub async fn execute(&self, thread_id: &str) -> Result<ThreadView> {
        // Comments only depend on the id, so both reads can run at once.
        let (thread, mut comments) = tokio::try_join!(
            self.threads.get_by_id(thread_id),
            self.comments.get_by_thread_id(thread_id),
        )?;

        if comments.is_empty() {
            return Ok(ThreadView { thread, comments });
        }

        let comment_ids: Vec<String> = comments.iter().map(|c| c.id.clone()).collect();
        let replies = self.replies.get_by_comment_ids(&comment_ids).await?;
        debug!(comments = comments.len(), replies = replies.len(), "thread assembled");

        nest_replies(&mut comments, replies);
        Ok(ThreadView { thread, comments })
    }
}

/// Moves each reply under its comment. `replies` must already be in display
/// order; the relative order within each comment is preserved.
fn nest_replies(comments: &mut [Comment], replies: Vec<Reply>) {
    let mut by_comment: HashMap<String, Vec<Reply>> = HashMap::new();
    for reply in replies {
        by_comment
            .entry(reply.comment_id.clone())
            .or_default()
            .push(reply);
    }

    for comment in comments.iter_mut() {
        if let Some(replies) = by_comment.remove(&comment.id) {
            comment.replies = replies;
        }
    }
}
