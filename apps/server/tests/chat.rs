mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::{json, Value};

#[tokio::test]
async fn thread_is_created_once_per_user() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get("/api/v1/chat/thread", "alice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (status, thread) = app.post("/api/v1/chat/thread", "alice", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(thread["title"], "Chat Financeiro");
    assert_eq!(thread["userId"], "alice");

    let (_, again) = app.post("/api/v1/chat/thread", "alice", json!({})).await;
    assert_eq!(again["id"], thread["id"]);
    let (_, fetched) = app.get("/api/v1/chat/thread", "alice").await;
    assert_eq!(fetched["id"], thread["id"]);

    let (_, bobs) = app.post("/api/v1/chat/thread", "bob", json!({})).await;
    assert_ne!(bobs["id"], thread["id"]);
}

#[tokio::test]
async fn messages_are_scoped_to_the_owner() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get("/api/v1/chat/messages", "alice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (_, thread) = app.post("/api/v1/chat/thread", "alice", json!({})).await;
    let thread_id = thread["id"].as_str().unwrap();

    let (status, body) = app
        .get(&format!("/api/v1/chat/messages?threadId={}", thread_id), "alice")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = app
        .get(&format!("/api/v1/chat/messages?threadId={}", thread_id), "bob")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "NOT_FOUND");
}

#[tokio::test]
async fn history_is_readable_without_an_api_key() {
    let app = TestApp::spawn().await;
    let (status, _) = app
        .post("/api/v1/chat", "alice", json!({ "message": "Oi" }))
        .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, body) = app.get("/api/v1/chat/thread", "alice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn rejected_message_is_not_recorded() {
    let app = TestApp::spawn_with(&[("OPENROUTER_API_KEY", "sk-or-test")]).await;
    let (status, _) = app
        .post("/api/v1/chat", "alice", json!({ "message": "  " }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app.get("/api/v1/chat/messages", "alice").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn history_routes_require_a_user() {
    let app = TestApp::spawn().await;
    for uri in ["/api/v1/chat/thread", "/api/v1/chat/messages"] {
        let (status, _) = app.send(Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
    let (status, _) = app
        .send(Method::POST, "/api/v1/chat/thread", None, Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
