//! Viewer registry — observer set with per-viewer isolation.

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use plugpad_core::types::ViewerId;

/// Registry of currently-connected push-channel viewers.
///
/// Each viewer gets its own unbounded channel; delivery is best-effort. A
/// viewer whose receiving end has gone away is removed during the broadcast
/// that discovers it and never causes an error for the broadcaster or for
/// the other viewers.
#[derive(Debug, Default)]
pub struct ViewerRegistry {
    /// Viewer id → outbound sender.
    viewers: DashMap<ViewerId, mpsc::UnboundedSender<String>>,
}

impl ViewerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new viewer. Non-blocking; the returned receiver stays
    /// open for the emulator to push into until [`unsubscribe`] runs or the
    /// registry drops the viewer after a failed send.
    ///
    /// [`unsubscribe`]: ViewerRegistry::unsubscribe
    pub fn subscribe(&self) -> (ViewerId, mpsc::UnboundedReceiver<String>) {
        let id = ViewerId::new();
        let (tx, rx) = mpsc::unbounded_channel();
        self.viewers.insert(id, tx);

        info!(viewer_id = %id, total = self.viewers.len(), "Viewer subscribed");
        (id, rx)
    }

    /// Removes a viewer. Safe to call multiple times and after disconnect.
    pub fn unsubscribe(&self, id: ViewerId) {
        if self.viewers.remove(&id).is_some() {
            info!(viewer_id = %id, total = self.viewers.len(), "Viewer unsubscribed");
        }
    }

    /// Sends the payload to every registered viewer.
    ///
    /// Returns the number of viewers reached. Viewers whose channel is
    /// closed are dropped from the registry instead of failing the
    /// broadcast.
    pub fn broadcast(&self, payload: &str) -> usize {
        let mut delivered = 0usize;
        let mut dead: Vec<ViewerId> = Vec::new();

        for entry in self.viewers.iter() {
            if entry.value().send(payload.to_string()).is_ok() {
                delivered += 1;
            } else {
                dead.push(*entry.key());
            }
        }

        for id in dead {
            debug!(viewer_id = %id, "Dropping disconnected viewer");
            self.viewers.remove(&id);
        }

        delivered
    }

    /// Serializes the value and broadcasts it.
    pub fn broadcast_json<T: Serialize>(&self, value: &T) -> usize {
        match serde_json::to_string(value) {
            Ok(payload) => self.broadcast(&payload),
            Err(e) => {
                error!(error = %e, "Failed to serialize broadcast payload");
                0
            }
        }
    }

    /// Broadcasts a stored message wrapped in the viewer-protocol frame.
    pub fn broadcast_message(&self, message: &plugpad_chat::Message) -> usize {
        self.broadcast_json(&serde_json::json!({
            "type": "message",
            "message": message,
        }))
    }

    /// Number of currently-registered viewers.
    pub fn viewer_count(&self) -> usize {
        self.viewers.len()
    }
}
