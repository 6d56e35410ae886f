//! Simulated-user roster endpoint tests.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_fresh_roster_has_seeded_developer() {
    let app = TestApp::new().await;

    let response = app.get("/api/users").await;
    assert_eq!(response.status, StatusCode::OK);
    let users = response.body["data"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["id"], "user-1");
    assert_eq!(users[0]["name"], "Developer");
}

#[tokio::test]
async fn test_upsert_adds_and_replaces() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/users",
            Some(json!({"id": "user-2", "name": "Alice"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    app.request(
        "POST",
        "/api/users",
        Some(json!({"id": "user-2", "name": "Alice B", "avatarUrl": "https://example.test/a.png"})),
    )
    .await;

    let response = app.get("/api/users").await;
    let users = response.body["data"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[1]["name"], "Alice B");
    assert_eq!(users[1]["avatarUrl"], "https://example.test/a.png");
}

#[tokio::test]
async fn test_upsert_requires_id_and_name() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/api/users", Some(json!({"id": "", "name": "X"})))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request("POST", "/api/users", Some(json!({"id": "u", "name": " "})))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_remove_user() {
    let app = TestApp::new().await;
    app.request(
        "POST",
        "/api/users",
        Some(json!({"id": "user-2", "name": "Alice"})),
    )
    .await;

    let response = app.request("DELETE", "/api/users?id=user-2", None).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("DELETE", "/api/users?id=user-2", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.get("/api/users").await;
    assert_eq!(response.body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_removed_user_can_no_longer_post() {
    let app = TestApp::new().await;
    app.request("DELETE", "/api/users?id=user-1", None).await;

    let response = app
        .request("POST", "/api/messages", Some(json!({"content": "hello"})))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
