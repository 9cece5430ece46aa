use std::sync::Arc;

use domains::{AddedThread, NewThread, Payload, Result, ThreadRepository};
use tracing::{info, instrument};

/// Opens a new thread.
#[derive(Clone)]
pub struct AddThreadUseCase {
    threads: Arc<dyn ThreadRepository>,
    max_title_length: usize,
}

impl AddThreadUseCase {
    pub fn new(threads: Arc<dyn ThreadRepository>, max_title_length: usize) -> Self {
        Self {
            threads,
            max_title_length,
        }
    }

    /// Expects `title`, `body` and `owner`.
    #[instrument(skip_all)]
    pub async fn execute(&self, payload: &Payload) -> Result<AddedThread> {
        let thread = NewThread::from_payload(payload, self.max_title_length)?;
        let added = self.threads.add_thread(&thread).await?;
        info!(thread_id = %added.id, owner = %added.owner, "thread created");
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{DomainError, MockThreadRepository, DEFAULT_MAX_TITLE_LENGTH};
    use serde_json::json;

    #[tokio::test]
    async fn orchestrates_add_thread() {
        let mut threads = MockThreadRepository::new();
        threads
            .expect_add_thread()
            .withf(|t| t.title == "sebuah thread" && t.body == "sebuah body" && t.owner == "user-123")
            .times(1)
            .returning(|t| {
                Ok(AddedThread {
                    id: "thread-123".into(),
                    title: t.title.clone(),
                    owner: t.owner.clone(),
                })
            });

        let use_case = AddThreadUseCase::new(Arc::new(threads), DEFAULT_MAX_TITLE_LENGTH);
        let payload = Payload::from_value(json!({
            "title": "sebuah thread",
            "body": "sebuah body",
            "owner": "user-123",
        }));

        let added = use_case.execute(&payload).await.unwrap();
        assert_eq!(
            added,
            AddedThread {
                id: "thread-123".into(),
                title: "sebuah thread".into(),
                owner: "user-123".into(),
            }
        );
    }

    #[tokio::test]
    async fn rejects_long_title_without_writing() {
        let mut threads = MockThreadRepository::new();
        threads.expect_add_thread().never();

        let use_case = AddThreadUseCase::new(Arc::new(threads), DEFAULT_MAX_TITLE_LENGTH);
        let payload = Payload::from_value(json!({
            "title": "x".repeat(61),
            "body": "sebuah body",
            "owner": "user-123",
        }));

        let err = use_case.execute(&payload).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidPayload(e) if e.code() == "ADD_THREAD.TITLE_LIMIT_CHAR"));
    }

    #[tokio::test]
    async fn honours_configured_title_limit() {
        let mut threads = MockThreadRepository::new();
        threads.expect_add_thread().never();

        let use_case = AddThreadUseCase::new(Arc::new(threads), 5);
        let payload = Payload::from_value(json!({ "title": "enam!!", "body": "b", "owner": "user-123" }));

        tokio_test::assert_err!(use_case.execute(&payload).await);
    }
}
