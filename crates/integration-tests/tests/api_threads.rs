use axum::http::{Method, StatusCode};
use integration_tests::http::TestApp;
use integration_tests::{DICODING, JOHNDOE};
use serde_json::json;

#[tokio::test]
async fn creates_a_thread_owned_by_the_caller() {
    let app = TestApp::new().await;
    let token = app.forum.token_for(DICODING);

    let (status, body) = app
        .send(
            Method::POST,
            "/threads",
            Some(&token),
            Some(json!({ "title": "sebuah thread", "body": "sebuah body" })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    let added = &body["data"]["addedThread"];
    assert!(added["id"].as_str().unwrap().starts_with("thread-"));
    assert_eq!(added["title"], "sebuah thread");
    assert_eq!(added["owner"], "user-123");
}

#[tokio::test]
async fn requires_authentication() {
    let app = TestApp::new().await;
    let (status, body) = app
        .send(
            Method::POST,
            "/threads",
            None,
            Some(json!({ "title": "t", "body": "b" })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Missing authentication");
}

#[tokio::test]
async fn rejects_missing_fields() {
    let app = TestApp::new().await;
    let token = app.forum.token_for(DICODING);

    let (status, body) = app
        .send(Method::POST, "/threads", Some(&token), Some(json!({ "title": "t" })))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "harus mengirimkan title dan body");
}

#[tokio::test]
async fn rejects_wrong_types() {
    let app = TestApp::new().await;
    let token = app.forum.token_for(DICODING);

    let (status, body) = app
        .send(
            Method::POST,
            "/threads",
            Some(&token),
            Some(json!({ "title": 123, "body": ["b"] })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "tipe data salah");
}

#[tokio::test]
async fn rejects_a_title_over_fifty_characters() {
    let app = TestApp::new().await;
    let token = app.forum.token_for(DICODING);

    let (status, body) = app
        .send(
            Method::POST,
            "/threads",
            Some(&token),
            Some(json!({ "title": "a".repeat(61), "body": "b" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "tidak dapat membuat thread baru karena karakter title melebihi batas limit"
    );

    let (status, _) = app
        .send(
            Method::POST,
            "/threads",
            Some(&token),
            Some(json!({ "title": "a".repeat(50), "body": "b" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn unknown_thread_is_404() {
    let app = TestApp::new().await;
    let (status, body) = app
        .send(Method::GET, "/threads/thread-404", None, None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "thread tidak ditemukan");
}

#[tokio::test]
async fn thread_detail_nests_comments_and_replies() {
    let app = TestApp::new().await;
    let dicoding = app.forum.token_for(DICODING);
    let johndoe = app.forum.token_for(JOHNDOE);

    let thread_id = app.thread(&dicoding).await;
    let first = app.comment(&johndoe, &thread_id, "komentar pertama").await;
    let second = app.comment(&dicoding, &thread_id, "komentar kedua").await;
    let reply = app.reply(&dicoding, &thread_id, &first, "balasan").await;

    let thread = app.get_thread(&thread_id).await;
    assert_eq!(thread["id"], thread_id);
    assert_eq!(thread["title"], "sebuah thread");
    assert_eq!(thread["username"], "dicoding");
    assert!(thread["date"].is_string());

    let comments = thread["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["id"], first);
    assert_eq!(comments[0]["username"], "johndoe");
    assert_eq!(comments[0]["likeCount"], 0);
    assert_eq!(comments[0]["replies"][0]["id"], reply);
    assert_eq!(comments[0]["replies"][0]["username"], "dicoding");
    assert_eq!(comments[1]["id"], second);
    assert!(comments[1]["replies"].as_array().unwrap().is_empty());

    assert_eq!(app.get_thread(&thread_id).await, thread);
}
