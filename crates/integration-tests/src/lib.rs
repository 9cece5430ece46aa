//! Shared fixtures for the end-to-end tests: an in-memory forum with two
//! registered users, real JWTs and the production router.

use std::sync::Arc;

use auth_adapters::JwtTokenManager;
use domains::ids::IdGenerator;
use services::{ForumOptions, ForumServices, Repositories};
use storage_adapters::InMemoryForum;

pub const SECRET: &[u8] = b"integration-secret";

pub const DICODING: (&str, &str) = ("user-123", "dicoding");
pub const JOHNDOE: (&str, &str) = ("user-456", "johndoe");

pub struct Forum {
    pub store: InMemoryForum,
    pub services: ForumServices,
    pub tokens: Arc<JwtTokenManager>,
}

impl Forum {
    pub async fn new() -> Self {
        Self::with_ids(domains::ids::random_ids()).await
    }

    pub async fn with_ids(ids: IdGenerator) -> Self {
        let store = InMemoryForum::new(ids);
        for (id, username) in [DICODING, JOHNDOE] {
            store.register_user(id, username).await;
        }

        let shared = Arc::new(store.clone());
        let services = ForumServices::new(
            Repositories {
                threads: shared.clone(),
                comments: shared.clone(),
                replies: shared.clone(),
                likes: shared,
            },
            ForumOptions::default(),
        );

        Self {
            store,
            services,
            tokens: Arc::new(JwtTokenManager::new(SECRET, 3000)),
        }
    }

    pub fn token_for(&self, user: (&str, &str)) -> String {
        self.tokens
            .create_access_token(user.0, user.1)
            .expect("token signing")
    }
}

#[cfg(feature = "web-axum")]
pub mod http {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::Forum;

    pub struct TestApp {
        pub forum: Forum,
        pub router: Router,
    }

    impl TestApp {
        pub async fn new() -> Self {
            let forum = Forum::new().await;
            let state = api_adapters::AppState::new(forum.services.clone(), forum.tokens.clone());
            let router = api_adapters::router(state);
            Self { forum, router }
        }

        /// Sends a request and returns the status and parsed JSON body.
        pub async fn send(
            &self,
            method: Method,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(token) = token {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
            }
            let body = match body {
                Some(json) => {
                    builder = builder.header(header::CONTENT_TYPE, "application/json");
                    Body::from(json.to_string())
                }
                None => Body::empty(),
            };

            let response = self
                .router
                .clone()
                .oneshot(builder.body(body).expect("request"))
                .await
                .expect("router is infallible");
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX)
                .await
                .expect("body");
            let json = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap_or(Value::Null)
            };
            (status, json)
        }

        /// Creates a thread as `token`'s user and returns its id.
        pub async fn thread(&self, token: &str) -> String {
            let (status, body) = self
                .send(
                    Method::POST,
                    "/threads",
                    Some(token),
                    Some(serde_json::json!({ "title": "sebuah thread", "body": "sebuah body" })),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED, "{body}");
            body["data"]["addedThread"]["id"]
                .as_str()
                .expect("thread id")
                .to_string()
        }

        pub async fn comment(&self, token: &str, thread_id: &str, content: &str) -> String {
            let (status, body) = self
                .send(
                    Method::POST,
                    &format!("/threads/{thread_id}/comments"),
                    Some(token),
                    Some(serde_json::json!({ "content": content })),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED, "{body}");
            body["data"]["addedComment"]["id"]
                .as_str()
                .expect("comment id")
                .to_string()
        }

        pub async fn reply(
            &self,
            token: &str,
            thread_id: &str,
            comment_id: &str,
            content: &str,
        ) -> String {
            let (status, body) = self
                .send(
                    Method::POST,
                    &format!("/threads/{thread_id}/comments/{comment_id}/replies"),
                    Some(token),
                    Some(serde_json::json!({ "content": content })),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED, "{body}");
            body["data"]["addedReply"]["id"]
                .as_str()
                .expect("reply id")
                .to_string()
        }

        pub async fn get_thread(&self, thread_id: &str) -> Value {
            let (status, body) = self
                .send(Method::GET, &format!("/threads/{thread_id}"), None, None)
                .await;
            assert_eq!(status, StatusCode::OK, "{body}");
            body["data"]["thread"].clone()
        }
    }
}
