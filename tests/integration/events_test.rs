//! Push-channel tests over a real listener.
//!
//! SSE needs a live connection; `oneshot` would block on the unbounded
//! stream, so these tests serve the router on an ephemeral port and speak
//! HTTP over a raw socket.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::helpers::TestApp;

async fn serve(app: &TestApp) -> std::net::SocketAddr {
    let listener = plugpad_api::server::bind_listener("127.0.0.1", 0)
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().unwrap();
    let router = app.router.clone();
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Server failed");
    });
    addr
}

async fn open_event_stream(addr: std::net::SocketAddr) -> TcpStream {
    let mut stream = TcpStream::connect(addr).await.expect("Failed to connect");
    stream
        .write_all(
            b"GET /api/events HTTP/1.1\r\n\
              Host: localhost\r\n\
              Accept: text/event-stream\r\n\r\n",
        )
        .await
        .expect("Failed to send request");
    stream
}

/// Reads from the socket until the buffer contains `needle` or the timeout
/// elapses.
async fn read_until(stream: &mut TcpStream, buffer: &mut String, needle: &str) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    let mut chunk = [0u8; 4096];
    while !buffer.contains(needle) {
        let read = tokio::time::timeout_at(deadline, stream.read(&mut chunk))
            .await
            .expect("Timed out waiting for event")
            .expect("Socket read failed");
        assert_ne!(read, 0, "Connection closed before '{needle}' arrived");
        buffer.push_str(&String::from_utf8_lossy(&chunk[..read]));
    }
}

#[tokio::test]
async fn test_ack_arrives_before_any_broadcast() {
    let app = TestApp::new().await;
    let addr = serve(&app).await;

    let mut stream = open_event_stream(addr).await;
    let mut buffer = String::new();
    read_until(&mut stream, &mut buffer, r#""type":"connected""#).await;

    app.state.viewers.broadcast(r#"{"type":"message","marker":"first"}"#);
    read_until(&mut stream, &mut buffer, r#""marker":"first""#).await;

    let ack_at = buffer.find(r#""type":"connected""#).unwrap();
    let broadcast_at = buffer.find(r#""marker":"first""#).unwrap();
    assert!(ack_at < broadcast_at);
}

#[tokio::test]
async fn test_submitted_message_reaches_viewer() {
    let app = TestApp::new().await;
    let addr = serve(&app).await;

    let mut stream = open_event_stream(addr).await;
    let mut buffer = String::new();
    read_until(&mut stream, &mut buffer, r#""type":"connected""#).await;

    app.request(
        "POST",
        "/api/messages",
        Some(serde_json::json!({"content": "hello viewers"})),
    )
    .await;

    read_until(&mut stream, &mut buffer, "hello viewers").await;
    assert!(buffer.contains(r#""type":"message""#));
}

#[tokio::test]
async fn test_disconnect_releases_viewer_registration() {
    let app = TestApp::new().await;
    let addr = serve(&app).await;

    let mut stream = open_event_stream(addr).await;
    let mut buffer = String::new();
    read_until(&mut stream, &mut buffer, r#""type":"connected""#).await;
    assert_eq!(app.state.viewers.viewer_count(), 1);

    drop(stream);

    // Broadcasts prune viewers whose connection is gone.
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while app.state.viewers.viewer_count() > 0 {
        assert!(tokio::time::Instant::now() < deadline, "Viewer never pruned");
        app.state.viewers.broadcast("ping");
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

#[tokio::test]
async fn test_two_viewers_both_receive() {
    let app = TestApp::new().await;
    let addr = serve(&app).await;

    let mut first = open_event_stream(addr).await;
    let mut second = open_event_stream(addr).await;
    let mut first_buf = String::new();
    let mut second_buf = String::new();
    read_until(&mut first, &mut first_buf, r#""type":"connected""#).await;
    read_until(&mut second, &mut second_buf, r#""type":"connected""#).await;

    app.state.viewers.broadcast(r#"{"type":"message","marker":"fanout"}"#);

    read_until(&mut first, &mut first_buf, r#""marker":"fanout""#).await;
    read_until(&mut second, &mut second_buf, r#""marker":"fanout""#).await;
}
