//! Push-channel endpoint (SSE).

use std::convert::Infallible;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream;
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;

use plugpad_core::types::ViewerId;
use plugpad_realtime::ViewerRegistry;

use crate::state::AppState;

/// GET /api/events
///
/// Moves the connection into a long-lived SSE stream. The first event is a
/// connection acknowledgment; every broadcast after that arrives as its own
/// event. The viewer registration is released when the stream drops, no
/// matter how the disconnect happened.
pub async fn subscribe_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (viewer_id, receiver) = state.viewers.subscribe();

    let ack = serde_json::json!({
        "type": "connected",
        "viewerId": viewer_id,
    });
    let ack_event = Event::default().data(ack.to_string());

    let feed = ViewerFeed {
        viewer_id,
        receiver,
        viewers: Arc::clone(&state.viewers),
    };
    let events = stream::once(async move { Ok(ack_event) }).chain(feed);

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Stream of broadcast payloads for one viewer.
///
/// Unsubscribes on drop, which covers client disconnects, server shutdown,
/// and any future mid-stream error path without handler-side bookkeeping.
struct ViewerFeed {
    viewer_id: ViewerId,
    receiver: mpsc::UnboundedReceiver<String>,
    viewers: Arc<ViewerRegistry>,
}

impl Stream for ViewerFeed {
    type Item = Result<Event, Infallible>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.receiver.poll_recv(cx) {
            Poll::Ready(Some(payload)) => Poll::Ready(Some(Ok(Event::default().data(payload)))),
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Drop for ViewerFeed {
    fn drop(&mut self) {
        self.viewers.unsubscribe(self.viewer_id);
    }
}
