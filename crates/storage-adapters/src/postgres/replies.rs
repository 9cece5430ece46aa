use async_trait::async_trait;
use domains::ids::REPLY_PREFIX;
use domains::{
    AddedReply, DomainError, NewReply, Reply, ReplyRecord, ReplyRepository, Resource, Result,
};
use sqlx::Row;

use super::PostgresForum;

#[async_trait]
impl ReplyRepository for PostgresForum {
    async fn add_reply(&self, reply: &NewReply) -> Result<AddedReply> {
        let id = self.next_id(REPLY_PREFIX);
        let row = sqlx::query(
            "INSERT INTO replies (id, comment_id, content, owner) VALUES ($1, $2, $3, $4)
             RETURNING id, content, owner",
        )
        .bind(&id)
        .bind(&reply.comment_id)
        .bind(&reply.content)
        .bind(&reply.owner)
        .fetch_one(self.pool())
        .await
        .map_err(DomainError::storage)?;

        Ok(AddedReply {
            id: row.try_get("id").map_err(DomainError::storage)?,
            content: row.try_get("content").map_err(DomainError::storage)?,
            owner: row.try_get("owner").map_err(DomainError::storage)?,
        })
    }

    async fn get_by_comment_ids(&self, comment_ids: &[String]) -> Result<Vec<Reply>> {
        if comment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query(
            "SELECT replies.id, replies.comment_id, users.username, replies.content,
                    replies.date, replies.is_delete
             FROM replies
             INNER JOIN users ON users.id = replies.owner
             WHERE replies.comment_id = ANY($1)
             ORDER BY replies.date ASC, replies.seq ASC",
        )
        .bind(comment_ids)
        .fetch_all(self.pool())
        .await
        .map_err(DomainError::storage)?;

        rows.into_iter()
            .map(|row| -> Result<_> {
                let record = ReplyRecord {
                    id: row.try_get("id").map_err(DomainError::storage)?,
                    comment_id: row.try_get("comment_id").map_err(DomainError::storage)?,
                    username: row.try_get("username").map_err(DomainError::storage)?,
                    content: row.try_get("content").map_err(DomainError::storage)?,
                    date: row.try_get("date").map_err(DomainError::storage)?,
                    is_delete: row.try_get("is_delete").map_err(DomainError::storage)?,
                };
                Ok(Reply::try_from(record)?)
            })
            .collect()
    }

    async fn verify_reply_exists(&self, comment_id: &str, reply_id: &str) -> Result<()> {
        let found = sqlx::query("SELECT 1 FROM replies WHERE id = $1 AND comment_id = $2")
            .bind(reply_id)
            .bind(comment_id)
            .fetch_optional(self.pool())
            .await
            .map_err(DomainError::storage)?;

        match found {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found(Resource::Reply, reply_id)),
        }
    }

    async fn verify_reply_owner(&self, reply_id: &str, owner: &str) -> Result<()> {
        self.verify_owner("replies", Resource::Reply, reply_id, owner)
            .await
    }

    async fn delete_reply(&self, reply_id: &str) -> Result<()> {
        let result = sqlx::query("UPDATE replies SET is_delete = TRUE WHERE id = $1")
            .bind(reply_id)
            .execute(self.pool())
            .await
            .map_err(DomainError::storage)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(Resource::Reply, reply_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support;
    use super::*;
    use domains::{CommentRepository, NewComment, NewThread, ThreadRepository};

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn batched_read_returns_replies_of_every_comment() {
        let (forum, user_id) = test_support::forum().await;
        let thread = forum
            .add_thread(&NewThread {
                title: "t".into(),
                body: "b".into(),
                owner: user_id.clone(),
            })
            .await
            .unwrap();

        let mut comment_ids = Vec::new();
        for content in ["a", "b"] {
            let comment = forum
                .add_comment(&NewComment {
                    thread_id: thread.id.clone(),
                    content: content.into(),
                    owner: user_id.clone(),
                })
                .await
                .unwrap();
            forum
                .add_reply(&NewReply {
                    thread_id: thread.id.clone(),
                    comment_id: comment.id.clone(),
                    content: format!("reply to {content}"),
                    owner: user_id.clone(),
                })
                .await
                .unwrap();
            comment_ids.push(comment.id);
        }

        let replies = forum.get_by_comment_ids(&comment_ids).await.unwrap();
        assert_eq!(replies.len(), 2);
        assert!(replies.iter().all(|r| comment_ids.contains(&r.comment_id)));
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn equal_dates_list_in_insertion_order() {
        let (forum, user_id) = test_support::forum_with_ids(test_support::descending_ids()).await;
        let thread = forum
            .add_thread(&NewThread {
                title: "t".into(),
                body: "b".into(),
                owner: user_id.clone(),
            })
            .await
            .unwrap();
        let comment = forum
            .add_comment(&NewComment {
                thread_id: thread.id.clone(),
                content: "induk".into(),
                owner: user_id.clone(),
            })
            .await
            .unwrap();

        let mut added = Vec::new();
        for content in ["satu", "dua"] {
            let reply = forum
                .add_reply(&NewReply {
                    thread_id: thread.id.clone(),
                    comment_id: comment.id.clone(),
                    content: content.into(),
                    owner: user_id.clone(),
                })
                .await
                .unwrap();
            added.push(reply.id);
        }
        assert!(added[0] > added[1]);

        sqlx::query(
            "UPDATE replies SET date = (SELECT MIN(date) FROM replies WHERE comment_id = $1)
             WHERE comment_id = $1",
        )
        .bind(&comment.id)
        .execute(forum.pool())
        .await
        .unwrap();

        let listed: Vec<String> = forum
            .get_by_comment_ids(&[comment.id])
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(listed, added);
    }
}
