//! Storage tooling endpoint tests.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_set_then_get() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/storage",
            Some(json!({"key": "greeting", "value": {"text": "hi"}})),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.get("/api/storage?key=greeting").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["value"], json!({"text": "hi"}));
}

#[tokio::test]
async fn test_missing_key_reads_null() {
    let app = TestApp::new().await;

    let response = app.get("/api/storage?key=absent").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["value"], json!(null));
}

#[tokio::test]
async fn test_empty_key_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/api/storage", Some(json!({"key": "", "value": 1})))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_replace_all_and_get_all() {
    let app = TestApp::new().await;
    app.request(
        "POST",
        "/api/storage",
        Some(json!({"key": "old", "value": true})),
    )
    .await;

    let response = app
        .request(
            "POST",
            "/api/storage/all",
            Some(json!({"a": 1, "b": "two"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.get("/api/storage/all").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({"a": 1, "b": "two"}));
}

#[tokio::test]
async fn test_storage_survives_restart() {
    let app = TestApp::new().await;
    app.request(
        "POST",
        "/api/storage",
        Some(json!({"key": "counter", "value": 41})),
    )
    .await;

    // Reopen everything over the same working directory.
    let TestApp { workspace, .. } = app;
    let app = TestApp::over(workspace).await;

    let response = app.get("/api/storage?key=counter").await;
    assert_eq!(response.body["value"], json!(41));
}
