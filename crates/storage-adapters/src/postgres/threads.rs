use async_trait::async_trait;
use domains::ids::THREAD_PREFIX;
use domains::{AddedThread, DomainError, NewThread, Resource, Result, ThreadDetail, ThreadRepository};
use sqlx::Row;

use super::PostgresForum;

#[async_trait]
impl ThreadRepository for PostgresForum {
    async fn add_thread(&self, thread: &NewThread) -> Result<AddedThread> {
        let id = self.next_id(THREAD_PREFIX);
        let row = sqlx::query(
            "INSERT INTO threads (id, title, body, owner) VALUES ($1, $2, $3, $4)
             RETURNING id, title, owner",
        )
        .bind(&id)
        .bind(&thread.title)
        .bind(&thread.body)
        .bind(&thread.owner)
        .fetch_one(self.pool())
        .await
        .map_err(DomainError::storage)?;

        Ok(AddedThread {
            id: row.try_get("id").map_err(DomainError::storage)?,
            title: row.try_get("title").map_err(DomainError::storage)?,
            owner: row.try_get("owner").map_err(DomainError::storage)?,
        })
    }

    async fn get_by_id(&self, thread_id: &str) -> Result<ThreadDetail> {
        let row = sqlx::query(
            "SELECT threads.id, threads.title, threads.body, threads.date, users.username
             FROM threads
             INNER JOIN users ON users.id = threads.owner
             WHERE threads.id = $1",
        )
        .bind(thread_id)
        .fetch_optional(self.pool())
        .await
        .map_err(DomainError::storage)?
        .ok_or_else(|| DomainError::not_found(Resource::Thread, thread_id))?;

        Ok(ThreadDetail {
            id: row.try_get("id").map_err(DomainError::storage)?,
            title: row.try_get("title").map_err(DomainError::storage)?,
            body: row.try_get("body").map_err(DomainError::storage)?,
            date: row.try_get("date").map_err(DomainError::storage)?,
            username: row.try_get("username").map_err(DomainError::storage)?,
        })
    }

    async fn verify_thread_exists(&self, thread_id: &str) -> Result<()> {
        let found = sqlx::query("SELECT 1 FROM threads WHERE id = $1")
            .bind(thread_id)
            .fetch_optional(self.pool())
            .await
            .map_err(DomainError::storage)?;

        match found {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found(Resource::Thread, thread_id)),
        }
    }
}
