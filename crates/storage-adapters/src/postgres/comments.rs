use async_trait::async_trait;
use domains::ids::COMMENT_PREFIX;
use domains::{
    AddedComment, Comment, CommentRecord, CommentRepository, DomainError, NewComment, Resource,
    Result,
};
use sqlx::Row;

use super::PostgresForum;

#[async_trait]
impl CommentRepository for PostgresForum {
    async fn add_comment(&self, comment: &NewComment) -> Result<AddedComment> {
        let id = self.next_id(COMMENT_PREFIX);
        let row = sqlx::query(
            "INSERT INTO comments (id, thread_id, content, owner) VALUES ($1, $2, $3, $4)
             RETURNING id, content, owner",
        )
        .bind(&id)
        .bind(&comment.thread_id)
        .bind(&comment.content)
        .bind(&comment.owner)
        .fetch_one(self.pool())
        .await
        .map_err(DomainError::storage)?;

        Ok(AddedComment {
            id: row.try_get("id").map_err(DomainError::storage)?,
            content: row.try_get("content").map_err(DomainError::storage)?,
            owner: row.try_get("owner").map_err(DomainError::storage)?,
        })
    }

    async fn get_by_thread_id(&self, thread_id: &str) -> Result<Vec<Comment>> {
        let rows = sqlx::query(
            "SELECT comments.id, users.username, comments.content, comments.date,
                    comments.is_delete, comments.like_count
             FROM comments
             INNER JOIN users ON users.id = comments.owner
             WHERE comments.thread_id = $1
             ORDER BY comments.date ASC, comments.seq ASC",
        )
        .bind(thread_id)
        .fetch_all(self.pool())
        .await
        .map_err(DomainError::storage)?;

        rows.into_iter()
            .map(|row| -> Result<_> {
                let like_count: i32 = row.try_get("like_count").map_err(DomainError::storage)?;
                let record = CommentRecord {
                    id: row.try_get("id").map_err(DomainError::storage)?,
                    username: row.try_get("username").map_err(DomainError::storage)?,
                    content: row.try_get("content").map_err(DomainError::storage)?,
                    date: row.try_get("date").map_err(DomainError::storage)?,
                    is_delete: row.try_get("is_delete").map_err(DomainError::storage)?,
                    like_count: i64::from(like_count),
                };
                Ok(Comment::try_from(record)?)
            })
            .collect()
    }

    async fn verify_comment_exists(&self, thread_id: &str, comment_id: &str) -> Result<()> {
        let found = sqlx::query("SELECT 1 FROM comments WHERE id = $1 AND thread_id = $2")
            .bind(comment_id)
            .bind(thread_id)
            .fetch_optional(self.pool())
            .await
            .map_err(DomainError::storage)?;

        match found {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found(Resource::Comment, comment_id)),
        }
    }

    async fn verify_comment_owner(&self, comment_id: &str, owner: &str) -> Result<()> {
        self.verify_owner("comments", Resource::Comment, comment_id, owner)
            .await
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<()> {
        let result = sqlx::query("UPDATE comments SET is_delete = TRUE WHERE id = $1")
            .bind(comment_id)
            .execute(self.pool())
            .await
            .map_err(DomainError::storage)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(Resource::Comment, comment_id));
        }
        Ok(())
    }

    async fn add_like(&self, comment_id: &str) -> Result<()> {
        sqlx::query("UPDATE comments SET like_count = like_count + 1 WHERE id = $1")
            .bind(comment_id)
            .execute(self.pool())
            .await
            .map_err(DomainError::storage)?;
        Ok(())
    }

    async fn remove_like(&self, comment_id: &str) -> Result<()> {
        sqlx::query("UPDATE comments SET like_count = GREATEST(like_count - 1, 0) WHERE id = $1")
            .bind(comment_id)
            .execute(self.pool())
            .await
            .map_err(DomainError::storage)?;
        Ok(())
    }
}
