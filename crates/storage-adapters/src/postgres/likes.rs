use async_trait::async_trait;
use domains::ids::LIKE_PREFIX;
use domains::{DomainError, LikeComment, LikeRepository, Result};

use super::PostgresForum;

#[async_trait]
impl LikeRepository for PostgresForum {
    async fn verify_is_like_exists(&self, like: &LikeComment) -> Result<bool> {
        let found =
            sqlx::query("SELECT 1 FROM user_like_comments WHERE user_id = $1 AND comment_id = $2")
                .bind(&like.user_id)
                .bind(&like.comment_id)
                .fetch_optional(self.pool())
                .await
                .map_err(DomainError::storage)?;
        Ok(found.is_some())
    }

    async fn like_comment(&self, like: &LikeComment) -> Result<bool> {
        let result = sqlx::query(
            "INSERT INTO user_like_comments (id, user_id, comment_id) VALUES ($1, $2, $3)
             ON CONFLICT (user_id, comment_id) DO NOTHING",
        )
        .bind(self.next_id(LIKE_PREFIX))
        .bind(&like.user_id)
        .bind(&like.comment_id)
        .execute(self.pool())
        .await
        .map_err(DomainError::storage)?;
        Ok(result.rows_affected() == 1)
    }

    async fn unlike_comment(&self, like: &LikeComment) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM user_like_comments WHERE user_id = $1 AND comment_id = $2")
                .bind(&like.user_id)
                .bind(&like.comment_id)
                .execute(self.pool())
                .await
                .map_err(DomainError::storage)?;
        Ok(result.rows_affected() > 0)
    }
}
