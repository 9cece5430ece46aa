//! # services
//!
//! One use case per user-facing forum operation. Every use case receives its
//! repository ports through its constructor; [`ForumServices::new`] wires the
//! full set once at start-up.

use std::sync::Arc;

use domains::{
    CommentRepository, LikeRepository, ReplyRepository, ThreadRepository,
    DEFAULT_MAX_TITLE_LENGTH,
};

mod add_comment;
mod add_reply;
mod add_thread;
mod delete_comment;
mod delete_reply;
mod get_thread;
mod like_comment;

pub use add_comment::AddCommentUseCase;
pub use add_reply::AddReplyUseCase;
pub use add_thread::AddThreadUseCase;
pub use delete_comment::DeleteCommentUseCase;
pub use delete_reply::DeleteReplyUseCase;
pub use get_thread::GetThreadUseCase;
pub use like_comment::LikeCommentUseCase;

/// The storage ports a forum needs.
#[derive(Clone)]
pub struct Repositories {
    pub threads: Arc<dyn ThreadRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub replies: Arc<dyn ReplyRepository>,
    pub likes: Arc<dyn LikeRepository>,
}

/// Tunables that are configuration rather than code.
#[derive(Debug, Clone, Copy)]
pub struct ForumOptions {
    pub max_title_length: usize,
}

impl Default for ForumOptions {
    fn default() -> Self {
        Self {
            max_title_length: DEFAULT_MAX_TITLE_LENGTH,
        }
    }
}

/// Every use case, built over one set of repositories.
#[derive(Clone)]
pub struct ForumServices {
    pub add_thread: AddThreadUseCase,
    pub get_thread: GetThreadUseCase,
    pub add_comment: AddCommentUseCase,
    pub delete_comment: DeleteCommentUseCase,
    pub add_reply: AddReplyUseCase,
    pub delete_reply: DeleteReplyUseCase,
    pub like_comment: LikeCommentUseCase,
}

impl ForumServices {
    pub fn new(repos: Repositories, options: ForumOptions) -> Self {
        let Repositories {
            threads,
            comments,
            replies,
            likes,
        } = repos;

        Self {
            add_thread: AddThreadUseCase::new(threads.clone(), options.max_title_length),
            get_thread: GetThreadUseCase::new(threads.clone(), comments.clone(), replies.clone()),
            add_comment: AddCommentUseCase::new(threads.clone(), comments.clone()),
            delete_comment: DeleteCommentUseCase::new(threads.clone(), comments.clone()),
            add_reply: AddReplyUseCase::new(threads.clone(), comments.clone(), replies.clone()),
            delete_reply: DeleteReplyUseCase::new(threads.clone(), comments.clone(), replies),
            like_comment: LikeCommentUseCase::new(threads, comments, likes),
        }
    }
}
