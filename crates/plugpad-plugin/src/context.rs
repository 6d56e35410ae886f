//! Host-side implementation of the capability context.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use plugpad_chat::{Message, MessageDraft, MessageLog, MessageUser};
use plugpad_core::manifest::Manifest;
use plugpad_core::result::AppResult;
use plugpad_core::types::ScheduleId;
use plugpad_plugin_sdk::{
    ExtensionContext, MessageHandler, ScheduleSpec, WebhookHandler,
};
use plugpad_realtime::ViewerRegistry;
use plugpad_store::PersistentStore;

/// The context handed to the loaded backend.
///
/// One instance per process. Handler registrations are last-wins; a backend
/// that calls `on_message` twice keeps only the second handler, mirroring the
/// real platform.
pub struct HostContext {
    /// Manifest the emulator was started with.
    manifest: Manifest,
    /// Durable per-extension storage.
    store: Arc<PersistentStore>,
    /// Conversation history.
    messages: Arc<MessageLog>,
    /// Connected push-channel viewers.
    viewers: Arc<ViewerRegistry>,
    /// Registered message handler, if any.
    message_handler: RwLock<Option<Arc<dyn MessageHandler>>>,
    /// Registered webhook handler. Accepted, never invoked.
    webhook_handler: RwLock<Option<Arc<dyn WebhookHandler>>>,
    /// Acknowledged schedule registrations.
    schedules: RwLock<HashMap<ScheduleId, ScheduleSpec>>,
}

impl HostContext {
    /// Creates a context over the emulator's shared subsystems.
    pub fn new(
        manifest: Manifest,
        store: Arc<PersistentStore>,
        messages: Arc<MessageLog>,
        viewers: Arc<ViewerRegistry>,
    ) -> Self {
        Self {
            manifest,
            store,
            messages,
            viewers,
            message_handler: RwLock::new(None),
            webhook_handler: RwLock::new(None),
            schedules: RwLock::new(HashMap::new()),
        }
    }

    /// The currently-registered message handler, if any.
    pub fn message_handler(&self) -> Option<Arc<dyn MessageHandler>> {
        self.message_handler
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Whether a webhook handler has been registered.
    pub fn has_webhook_handler(&self) -> bool {
        self.webhook_handler
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Names of currently-registered schedules, for logs and tests.
    pub fn schedule_count(&self) -> usize {
        self.schedules
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// The bot identity messages sent through this context carry.
    fn bot_user(&self) -> MessageUser {
        MessageUser {
            id: self.manifest.bot_user_id(),
            name: self.manifest.name.clone(),
        }
    }
}

impl std::fmt::Debug for HostContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostContext")
            .field("plugin", &self.manifest.slug)
            .field("schedules", &self.schedule_count())
            .finish()
    }
}

#[async_trait]
impl ExtensionContext for HostContext {
    fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    async fn send_message(&self, channel_id: &str, content: &str) -> AppResult<Message> {
        let message = self
            .messages
            .append(MessageDraft {
                content: content.to_string(),
                user: self.bot_user(),
                mention_ids: Vec::new(),
            })
            .await;

        let delivered = self.viewers.broadcast_message(&message);
        debug!(
            channel_id,
            message_id = %message.id,
            delivered,
            "Plugin posted a message"
        );
        Ok(message)
    }

    async fn get_messages(
        &self,
        _channel_id: &str,
        limit: Option<usize>,
    ) -> AppResult<Vec<Message>> {
        Ok(self.messages.recent(limit).await)
    }

    async fn storage_get(&self, key: &str) -> AppResult<Option<Value>> {
        Ok(self.store.get(key).await)
    }

    async fn storage_set(&self, key: &str, value: Value) -> AppResult<()> {
        self.store.set(key, value).await
    }

    async fn storage_delete(&self, key: &str) -> AppResult<()> {
        self.store.delete(key).await
    }

    async fn storage_keys(&self) -> AppResult<Vec<String>> {
        Ok(self.store.keys().await)
    }

    async fn ai_complete(&self, prompt: &str) -> AppResult<String> {
        debug!(prompt_len = prompt.len(), "AI completion requested");
        Ok(format!(
            "[emulated ai response] no model is connected in local development; prompt was {} chars",
            prompt.len()
        ))
    }

    async fn ui_push(&self, payload: Value) -> AppResult<()> {
        debug!(%payload, "UI push acknowledged (no UI surface in the emulator)");
        Ok(())
    }

    fn on_message(&self, handler: Arc<dyn MessageHandler>) {
        let mut slot = self
            .message_handler
            .write()
            .unwrap_or_else(|e| e.into_inner());
        if slot.is_some() {
            warn!("Message handler re-registered; previous handler replaced");
        }
        *slot = Some(handler);
        info!(plugin = %self.manifest.slug, "Message handler registered");
    }

    fn on_webhook(&self, handler: Arc<dyn WebhookHandler>) {
        let mut slot = self
            .webhook_handler
            .write()
            .unwrap_or_else(|e| e.into_inner());
        *slot = Some(handler);
        info!(
            plugin = %self.manifest.slug,
            "Webhook handler registered (no deliveries in local development)"
        );
    }

    fn schedule(&self, spec: ScheduleSpec) -> ScheduleId {
        let id = ScheduleId::new();
        info!(
            name = %spec.name,
            cron = %spec.cron,
            schedule_id = %id,
            "Schedule registered (never fired in local development)"
        );
        self.schedules
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id, spec);
        id
    }

    fn cancel_schedule(&self, id: ScheduleId) {
        let removed = self
            .schedules
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&id);
        if removed.is_some() {
            info!(schedule_id = %id, "Schedule cancelled");
        }
    }
}
