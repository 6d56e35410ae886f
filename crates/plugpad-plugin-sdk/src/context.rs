//! The capability context the host hands to a backend during setup.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use plugpad_chat::Message;
use plugpad_core::manifest::Manifest;
use plugpad_core::result::AppResult;
use plugpad_core::types::ScheduleId;

use crate::events::{MessageEvent, ScheduleSpec, WebhookEvent};

/// Capability surface exposed to a loaded backend.
///
/// Constructed exactly once per process by the host and handed to the
/// backend by reference. The manifest's permission declarations are not
/// enforced here — the emulation exposes the full surface and leaves
/// enforcement to the real platform.
#[async_trait]
pub trait ExtensionContext: Send + Sync {
    /// The manifest the host was started with.
    fn manifest(&self) -> &Manifest;

    /// Posts a message to the conversation under the plugin's bot identity.
    /// The stored, mention-resolved message is returned.
    async fn send_message(&self, channel_id: &str, content: &str) -> AppResult<Message>;

    /// Recent conversation history, oldest first. The emulation has exactly
    /// one channel, so `channel_id` is accepted but not filtered on.
    async fn get_messages(&self, channel_id: &str, limit: Option<usize>)
    -> AppResult<Vec<Message>>;

    /// Reads a key from per-extension storage.
    async fn storage_get(&self, key: &str) -> AppResult<Option<Value>>;

    /// Writes a key to per-extension storage; durable before this returns.
    async fn storage_set(&self, key: &str, value: Value) -> AppResult<()>;

    /// Deletes a key from per-extension storage.
    async fn storage_delete(&self, key: &str) -> AppResult<()>;

    /// Lists all keys in per-extension storage.
    async fn storage_keys(&self) -> AppResult<Vec<String>>;

    /// AI proxy. The emulation returns a canned, clearly-marked placeholder
    /// instead of calling a real model.
    async fn ai_complete(&self, prompt: &str) -> AppResult<String>;

    /// Pushes a payload to the plugin's UI surface. Stubbed in the
    /// emulation.
    async fn ui_push(&self, payload: Value) -> AppResult<()>;

    /// Registers the message handler. Only the most recent registration is
    /// retained.
    fn on_message(&self, handler: Arc<dyn MessageHandler>);

    /// Registers the webhook handler. Accepted but never invoked by the
    /// emulation.
    fn on_webhook(&self, handler: Arc<dyn WebhookHandler>);

    /// Registers a scheduled job. Acknowledged with a handle but never
    /// fired by the emulation.
    fn schedule(&self, spec: ScheduleSpec) -> ScheduleId;

    /// Cancels a schedule registration.
    fn cancel_schedule(&self, id: ScheduleId);
}

/// Handler for inbound message events.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// Handles one message event. An error is surfaced to whoever submitted
    /// the triggering message; the message itself stays in the log.
    async fn handle(&self, event: MessageEvent, cx: Arc<dyn ExtensionContext>)
    -> Result<(), String>;
}

/// Handler for inbound webhook deliveries.
#[async_trait]
pub trait WebhookHandler: Send + Sync {
    /// Handles one webhook delivery.
    async fn handle(&self, event: WebhookEvent, cx: Arc<dyn ExtensionContext>)
    -> Result<(), String>;
}

/// A closure-based message handler for quick registration.
pub struct FnMessageHandler {
    /// Handler function.
    handler: Box<
        dyn Fn(
                MessageEvent,
                Arc<dyn ExtensionContext>,
            ) -> Pin<Box<dyn Future<Output = Result<(), String>> + Send>>
            + Send
            + Sync,
    >,
}

impl std::fmt::Debug for FnMessageHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnMessageHandler")
            .field("handler", &"<closure>")
            .finish()
    }
}

impl FnMessageHandler {
    /// Wraps an async closure as a [`MessageHandler`].
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(MessageEvent, Arc<dyn ExtensionContext>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), String>> + Send + 'static,
    {
        Self {
            handler: Box::new(move |event, cx| Box::pin(handler(event, cx))),
        }
    }
}

#[async_trait]
impl MessageHandler for FnMessageHandler {
    async fn handle(
        &self,
        event: MessageEvent,
        cx: Arc<dyn ExtensionContext>,
    ) -> Result<(), String> {
        (self.handler)(event, cx).await
    }
}
