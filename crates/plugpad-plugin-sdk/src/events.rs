//! Events and registration payloads delivered to plugin backends.

use serde::{Deserialize, Serialize};

use plugpad_chat::Message;

/// A message event dispatched to the backend's registered handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEvent {
    /// The message as stored in the log, mentions resolved.
    pub message: Message,
}

impl MessageEvent {
    /// Wraps a stored message.
    pub fn new(message: Message) -> Self {
        Self { message }
    }

    /// Channel the message was posted to.
    pub fn channel_id(&self) -> &str {
        &self.message.channel_id
    }

    /// Whether the given user id is mentioned in the message.
    pub fn mentions(&self, user_id: &str) -> bool {
        self.message.mention_ids.iter().any(|id| id == user_id)
    }
}

/// An inbound webhook delivery.
///
/// Registrations are accepted by the emulator but no delivery mechanism is
/// wired; the type exists so code written against the platform contract
/// compiles and runs unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    /// Request path the webhook arrived on.
    pub path: String,
    /// Parsed JSON body.
    pub body: serde_json::Value,
}

/// A scheduled-job registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSpec {
    /// Developer-chosen job name.
    pub name: String,
    /// Cron expression, in the platform's five-field syntax.
    pub cron: String,
}
