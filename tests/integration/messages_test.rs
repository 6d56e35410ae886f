//! Conversation endpoint tests.

use std::sync::Arc;

use http::StatusCode;
use serde_json::json;

use plugpad_plugin_sdk::{ExtensionContext, FnMessageHandler};

use crate::helpers::TestApp;

#[tokio::test]
async fn test_submit_message_defaults_to_seeded_user() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/api/messages", Some(json!({"content": "hello"})))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["handled"], false);
    assert_eq!(data["message"]["userId"], "user-1");
    assert_eq!(data["message"]["user"]["name"], "Developer");
    assert_eq!(data["message"]["channelId"], "channel-general");
    assert_eq!(data["message"]["workspaceId"], "workspace-local");
}

#[tokio::test]
async fn test_submit_message_parses_and_unions_mentions() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/messages",
            Some(json!({
                "content": "ping <@user-2> and <@user-2>",
                "mentionIds": ["user-3"]
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["data"]["message"]["mentionIds"],
        json!(["user-2", "user-3"])
    );
}

#[tokio::test]
async fn test_empty_content_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/api/messages", Some(json!({"content": "   "})))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert_eq!(app.state.messages.len().await, 0);
}

#[tokio::test]
async fn test_unknown_user_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/messages",
            Some(json!({"userId": "ghost", "content": "boo"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(app.state.messages.len().await, 0);
}

#[tokio::test]
async fn test_handler_failure_is_500_but_message_stays() {
    let app = TestApp::new().await;
    app.state
        .plugin_host
        .context()
        .on_message(Arc::new(FnMessageHandler::new(|_event, _cx| async {
            Err("handler exploded".to_string())
        })));

    let response = app
        .request("POST", "/api/messages", Some(json!({"content": "trigger"})))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "PLUGIN_ERROR");
    assert!(
        response.body["message"]
            .as_str()
            .unwrap()
            .contains("handler exploded")
    );

    // The triggering message was appended before dispatch and stays.
    assert_eq!(app.state.messages.len().await, 1);
}

#[tokio::test]
async fn test_handler_reply_round_trip() {
    let app = TestApp::new().await;
    app.state
        .plugin_host
        .context()
        .on_message(Arc::new(FnMessageHandler::new(|event, cx| async move {
            if event.mentions("echo-bot") {
                cx.send_message(event.channel_id(), "pong")
                    .await
                    .map_err(|e| e.to_string())?;
            }
            Ok(())
        })));

    let response = app
        .request(
            "POST",
            "/api/messages",
            Some(json!({"content": "ping <@echo-bot>"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["handled"], true);

    let history = app.get("/api/messages").await;
    let messages = history.body["data"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["content"], "ping <@echo-bot>");
    assert_eq!(messages[1]["content"], "pong");
    assert_eq!(messages[1]["userId"], "echo-bot");
    assert_eq!(messages[1]["user"]["name"], "Echo");
}

#[tokio::test]
async fn test_recent_messages_respects_limit() {
    let app = TestApp::new().await;
    for i in 0..5 {
        app.request(
            "POST",
            "/api/messages",
            Some(json!({"content": format!("message {i}")})),
        )
        .await;
    }

    let response = app.get("/api/messages?limit=2").await;
    assert_eq!(response.status, StatusCode::OK);
    let messages = response.body["data"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["content"], "message 3");
    assert_eq!(messages[1]["content"], "message 4");
}
