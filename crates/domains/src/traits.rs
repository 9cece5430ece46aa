//! # Core Traits (Ports)
//!
//! Any storage or auth adapter must implement these traits to be wired into
//! the binary. Use cases only ever see `Arc<dyn ...>` of these.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    AddedComment, AddedReply, AddedThread, Comment, LikeComment, NewComment, NewReply, NewThread,
    Reply, ThreadDetail,
};

/// Persistence contract for threads.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ThreadRepository: Send + Sync {
    async fn add_thread(&self, thread: &NewThread) -> Result<AddedThread>;

    /// Fails with `NotFound` when the thread does not exist.
    async fn get_by_id(&self, thread_id: &str) -> Result<ThreadDetail>;

    async fn verify_thread_exists(&self, thread_id: &str) -> Result<()>;
}

/// Persistence contract for comments, including their like counter.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn add_comment(&self, comment: &NewComment) -> Result<AddedComment>;

    /// Comments of a thread, oldest first, ties kept in insertion order.
    async fn get_by_thread_id(&self, thread_id: &str) -> Result<Vec<Comment>>;

    /// Fails with `NotFound` unless the comment exists under `thread_id`.
    async fn verify_comment_exists(&self, thread_id: &str, comment_id: &str) -> Result<()>;

    /// Fails with `Forbidden` unless `owner` wrote the comment.
    async fn verify_comment_owner(&self, comment_id: &str, owner: &str) -> Result<()>;

    /// Soft delete: flips `is_delete`, keeps the content.
    async fn delete_comment(&self, comment_id: &str) -> Result<()>;

    async fn add_like(&self, comment_id: &str) -> Result<()>;

    /// Never drops the counter below zero.
    async fn remove_like(&self, comment_id: &str) -> Result<()>;
}

/// Persistence contract for replies.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ReplyRepository: Send + Sync {
    async fn add_reply(&self, reply: &NewReply) -> Result<AddedReply>;

    /// Replies of all given comments in one batch, oldest first, ties kept in
    /// insertion order.
    async fn get_by_comment_ids(&self, comment_ids: &[String]) -> Result<Vec<Reply>>;

    /// Fails with `NotFound` unless the reply exists under `comment_id`.
    async fn verify_reply_exists(&self, comment_id: &str, reply_id: &str) -> Result<()>;

    /// Fails with `Forbidden` unless `owner` wrote the reply.
    async fn verify_reply_owner(&self, reply_id: &str, owner: &str) -> Result<()>;

    async fn delete_reply(&self, reply_id: &str) -> Result<()>;
}

/// Persistence contract for (user, comment) like rows.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait LikeRepository: Send + Sync {
    async fn verify_is_like_exists(&self, like: &LikeComment) -> Result<bool>;

    /// Returns `false` when the pair was already liked and nothing was inserted.
    async fn like_comment(&self, like: &LikeComment) -> Result<bool>;

    /// Returns `false` when there was no like row to remove.
    async fn unlike_comment(&self, like: &LikeComment) -> Result<bool>;
}

/// Bearer credential decoding.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait TokenVerifier: Send + Sync {
    /// Returns the user id carried by `token`, or `Unauthenticated`.
    fn decode_user_id(&self, token: &str) -> Result<String>;
}
