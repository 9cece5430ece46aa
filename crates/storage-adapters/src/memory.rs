//! # In-memory storage
//!
//! Implements every repository port over plain vectors behind one
//! `tokio::sync::RwLock`. Mirrors the PostgreSQL adapter's observable
//! behavior (foreign keys on owners, ordering, soft delete) for tests and
//! local development. Ties on `date` keep insertion order.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::ids::{self, IdGenerator};
use domains::{
    AddedComment, AddedReply, AddedThread, Comment, CommentRecord, CommentRepository, DomainError,
    LikeComment, LikeRepository, NewComment, NewReply, NewThread, Reply, ReplyRecord,
    ReplyRepository, Resource, Result, ThreadDetail, ThreadRepository,
};
use tokio::sync::RwLock;
use tracing::debug;

struct ThreadRow {
    id: String,
    title: String,
    body: String,
    owner: String,
    date: DateTime<Utc>,
}

struct CommentRow {
    id: String,
    thread_id: String,
    content: String,
    owner: String,
    date: DateTime<Utc>,
    is_delete: bool,
    like_count: i64,
}

struct ReplyRow {
    id: String,
    comment_id: String,
    content: String,
    owner: String,
    date: DateTime<Utc>,
    is_delete: bool,
}

struct LikeRow {
    user_id: String,
    comment_id: String,
}

#[derive(Default)]
struct Tables {
    /// user id -> username
    users: HashMap<String, String>,
    threads: Vec<ThreadRow>,
    comments: Vec<CommentRow>,
    replies: Vec<ReplyRow>,
    likes: Vec<LikeRow>,
}

impl Tables {
    fn username(&self, user_id: &str) -> Result<String> {
        self.users
            .get(user_id)
            .cloned()
            .ok_or_else(|| DomainError::Storage(format!("user {user_id} does not exist")))
    }

    fn comment_mut(&mut self, comment_id: &str) -> Result<&mut CommentRow> {
        self.comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| DomainError::not_found(Resource::Comment, comment_id))
    }
}

/// Timestamp source for new rows.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Shared in-memory forum store. Clones share the same tables.
#[derive(Clone)]
pub struct InMemoryForum {
    tables: Arc<RwLock<Tables>>,
    ids: IdGenerator,
    clock: Clock,
}

impl Default for InMemoryForum {
    fn default() -> Self {
        Self::new(ids::random_ids())
    }
}

impl InMemoryForum {
    pub fn new(ids: IdGenerator) -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
            ids,
            clock: Arc::new(Utc::now),
        }
    }

    /// Replaces the wall clock, e.g. to force equal timestamps.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Makes `user_id` a valid owner, displayed as `username`.
    pub async fn register_user(&self, user_id: &str, username: &str) {
        self.tables
            .write()
            .await
            .users
            .insert(user_id.to_string(), username.to_string());
    }

    /// Stored like rows for a comment.
    pub async fn like_rows(&self, comment_id: &str) -> usize {
        self.tables
            .read()
            .await
            .likes
            .iter()
            .filter(|l| l.comment_id == comment_id)
            .count()
    }
}

#[async_trait]
impl ThreadRepository for InMemoryForum {
    async fn add_thread(&self, thread: &NewThread) -> Result<AddedThread> {
        let mut tables = self.tables.write().await;
        tables.username(&thread.owner)?;

        let id = ids::new_id(ids::THREAD_PREFIX, &self.ids);
        tables.threads.push(ThreadRow {
            id: id.clone(),
            title: thread.title.clone(),
            body: thread.body.clone(),
            owner: thread.owner.clone(),
            date: (self.clock)(),
        });
        debug!(thread_id = %id, "thread stored");

        Ok(AddedThread {
            id,
            title: thread.title.clone(),
            owner: thread.owner.clone(),
        })
    }

    async fn get_by_id(&self, thread_id: &str) -> Result<ThreadDetail> {
        let tables = self.tables.read().await;
        let row = tables
            .threads
            .iter()
            .find(|t| t.id == thread_id)
            .ok_or_else(|| DomainError::not_found(Resource::Thread, thread_id))?;

        Ok(ThreadDetail {
            id: row.id.clone(),
            title: row.title.clone(),
            body: row.body.clone(),
            date: row.date,
            username: tables.username(&row.owner)?,
        })
    }

    async fn verify_thread_exists(&self, thread_id: &str) -> Result<()> {
        let tables = self.tables.read().await;
        if tables.threads.iter().any(|t| t.id == thread_id) {
            Ok(())
        } else {
            Err(DomainError::not_found(Resource::Thread, thread_id))
        }
    }
}

#[async_trait]
impl CommentRepository for InMemoryForum {
    async fn add_comment(&self, comment: &NewComment) -> Result<AddedComment> {
        let mut tables = self.tables.write().await;
        tables.username(&comment.owner)?;
        if !tables.threads.iter().any(|t| t.id == comment.thread_id) {
            return Err(DomainError::Storage(format!(
                "thread {} does not exist",
                comment.thread_id
            )));
        }

        let id = ids::new_id(ids::COMMENT_PREFIX, &self.ids);
        tables.comments.push(CommentRow {
            id: id.clone(),
            thread_id: comment.thread_id.clone(),
            content: comment.content.clone(),
            owner: comment.owner.clone(),
            date: (self.clock)(),
            is_delete: false,
            like_count: 0,
        });

        Ok(AddedComment {
            id,
            content: comment.content.clone(),
            owner: comment.owner.clone(),
        })
    }

    async fn get_by_thread_id(&self, thread_id: &str) -> Result<Vec<Comment>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<&CommentRow> = tables
            .comments
            .iter()
            .filter(|c| c.thread_id == thread_id)
            .collect();
        // Stable: equal dates keep insertion order.
        rows.sort_by_key(|c| c.date);

        rows.into_iter()
            .map(|row| -> Result<_> {
                let record = CommentRecord {
                    id: row.id.clone(),
                    username: tables.username(&row.owner)?,
                    content: row.content.clone(),
                    date: row.date,
                    is_delete: row.is_delete,
                    like_count: row.like_count,
                };
                Ok(Comment::try_from(record)?)
            })
            .collect()
    }

    async fn verify_comment_exists(&self, thread_id: &str, comment_id: &str) -> Result<()> {
        let tables = self.tables.read().await;
        if tables
            .comments
            .iter()
            .any(|c| c.id == comment_id && c.thread_id == thread_id)
        {
            Ok(())
        } else {
            Err(DomainError::not_found(Resource::Comment, comment_id))
        }
    }

    async fn verify_comment_owner(&self, comment_id: &str, owner: &str) -> Result<()> {
        let tables = self.tables.read().await;
        let row = tables
            .comments
            .iter()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| DomainError::not_found(Resource::Comment, comment_id))?;

        if row.owner == owner {
            Ok(())
        } else {
            Err(DomainError::Forbidden(format!(
                "{owner} does not own {comment_id}"
            )))
        }
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.comment_mut(comment_id)?.is_delete = true;
        Ok(())
    }

    async fn add_like(&self, comment_id: &str) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.comment_mut(comment_id)?.like_count += 1;
        Ok(())
    }

    async fn remove_like(&self, comment_id: &str) -> Result<()> {
        let mut tables = self.tables.write().await;
        let row = tables.comment_mut(comment_id)?;
        row.like_count = (row.like_count - 1).max(0);
        Ok(())
    }
}

#[async_trait]
impl ReplyRepository for InMemoryForum {
    async fn add_reply(&self, reply: &NewReply) -> Result<AddedReply> {
        let mut tables = self.tables.write().await;
        tables.username(&reply.owner)?;
        if !tables.comments.iter().any(|c| c.id == reply.comment_id) {
            return Err(DomainError::Storage(format!(
                "comment {} does not exist",
                reply.comment_id
            )));
        }

        let id = ids::new_id(ids::REPLY_PREFIX, &self.ids);
        tables.replies.push(ReplyRow {
            id: id.clone(),
            comment_id: reply.comment_id.clone(),
            content: reply.content.clone(),
            owner: reply.owner.clone(),
            date: (self.clock)(),
            is_delete: false,
        });

        Ok(AddedReply {
            id,
            content: reply.content.clone(),
            owner: reply.owner.clone(),
        })
    }

    async fn get_by_comment_ids(&self, comment_ids: &[String]) -> Result<Vec<Reply>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<&ReplyRow> = tables
            .replies
            .iter()
            .filter(|r| comment_ids.contains(&r.comment_id))
            .collect();
        rows.sort_by_key(|r| r.date);

        rows.into_iter()
            .map(|row| -> Result<_> {
                let record = ReplyRecord {
                    id: row.id.clone(),
                    comment_id: row.comment_id.clone(),
                    username: tables.username(&row.owner)?,
                    content: row.content.clone(),
                    date: row.date,
                    is_delete: row.is_delete,
                };
                Ok(Reply::try_from(record)?)
            })
            .collect()
    }

    async fn verify_reply_exists(&self, comment_id: &str, reply_id: &str) -> Result<()> {
        let tables = self.tables.read().await;
        if tables
            .replies
            .iter()
            .any(|r| r.id == reply_id && r.comment_id == comment_id)
        {
            Ok(())
        } else {
            Err(DomainError::not_found(Resource::Reply, reply_id))
        }
    }

    async fn verify_reply_owner(&self, reply_id: &str, owner: &str) -> Result<()> {
        let tables = self.tables.read().await;
        let row = tables
            .replies
            .iter()
            .find(|r| r.id == reply_id)
            .ok_or_else(|| DomainError::not_found(Resource::Reply, reply_id))?;

        if row.owner == owner {
            Ok(())
        } else {
            Err(DomainError::Forbidden(format!("{owner} does not own {reply_id}")))
        }
    }

    async fn delete_reply(&self, reply_id: &str) -> Result<()> {
        let mut tables = self.tables.write().await;
        let row = tables
            .replies
            .iter_mut()
            .find(|r| r.id == reply_id)
            .ok_or_else(|| DomainError::not_found(Resource::Reply, reply_id))?;
        row.is_delete = true;
        Ok(())
    }
}

#[async_trait]
impl LikeRepository for InMemoryForum {
    async fn verify_is_like_exists(&self, like: &LikeComment) -> Result<bool> {
        let tables = self.tables.read().await;
        Ok(tables
            .likes
            .iter()
            .any(|l| l.user_id == like.user_id && l.comment_id == like.comment_id))
    }

    async fn like_comment(&self, like: &LikeComment) -> Result<bool> {
        let mut tables = self.tables.write().await;
        tables.username(&like.user_id)?;
        if tables
            .likes
            .iter()
            .any(|l| l.user_id == like.user_id && l.comment_id == like.comment_id)
        {
            return Ok(false);
        }

        tables.likes.push(LikeRow {
            user_id: like.user_id.clone(),
            comment_id: like.comment_id.clone(),
        });
        Ok(true)
    }

    async fn unlike_comment(&self, like: &LikeComment) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.likes.len();
        tables
            .likes
            .retain(|l| !(l.user_id == like.user_id && l.comment_id == like.comment_id));
        Ok(tables.likes.len() < before)
    }
}
