//! Sample Plugpad backend.
//!
//! Replies when its bot identity is mentioned, keeps a running reply count
//! in per-extension storage, and answers "ask:" prefixed messages through
//! the AI proxy. Doubles as an end-to-end exercise of the SDK surface.

use plugpad_plugin_sdk::prelude::*;

/// Storage key holding the running reply count.
const COUNT_KEY: &str = "echo.replies";

/// The echo backend.
#[derive(Debug, Default)]
pub struct EchoBackend;

#[async_trait]
impl PluginBackend for EchoBackend {
    fn info(&self) -> BackendInfo {
        BackendInfo::new("echo", env!("CARGO_PKG_VERSION"))
    }

    async fn setup(&self, cx: Arc<dyn ExtensionContext>) -> Result<(), String> {
        cx.on_message(Arc::new(EchoHandler));
        Ok(())
    }
}

/// Replies to mentions and "ask:" prompts.
struct EchoHandler;

#[async_trait]
impl MessageHandler for EchoHandler {
    async fn handle(
        &self,
        event: MessageEvent,
        cx: Arc<dyn ExtensionContext>,
    ) -> Result<(), String> {
        let bot_id = cx.manifest().bot_user_id();

        // Never react to our own messages.
        if event.message.user_id == bot_id {
            return Ok(());
        }

        if let Some(prompt) = event.message.content.strip_prefix("ask:") {
            let answer = cx
                .ai_complete(prompt.trim())
                .await
                .map_err(|e| e.to_string())?;
            cx.send_message(event.channel_id(), &answer)
                .await
                .map_err(|e| e.to_string())?;
            return Ok(());
        }

        if !event.mentions(&bot_id) {
            return Ok(());
        }

        let count = next_count(cx.as_ref()).await?;
        let reply = format!(
            "<@{}> echo #{count}: {}",
            event.message.user_id, event.message.content
        );
        cx.send_message(event.channel_id(), &reply)
            .await
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}

/// Bumps and persists the reply counter, returning the new value.
async fn next_count(cx: &dyn ExtensionContext) -> Result<u64, String> {
    let count = cx
        .storage_get(COUNT_KEY)
        .await
        .map_err(|e| e.to_string())?
        .and_then(|v| v.as_u64())
        .unwrap_or(0)
        + 1;
    cx.storage_set(COUNT_KEY, serde_json::json!(count))
        .await
        .map_err(|e| e.to_string())?;
    Ok(count)
}

plugpad_plugin_sdk::export_backend!(EchoBackend);
