//! Append-only message log for the emulated workspace.

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use plugpad_core::types::MessageId;

use crate::mentions::extract_mentions;
use crate::message::{Message, MessageDraft};
use crate::{CHANNEL_ID, WORKSPACE_ID};

/// Default number of entries returned by [`MessageLog::recent`].
pub const DEFAULT_RECENT_LIMIT: usize = 50;

/// Ordered history of messages. Entries are never mutated or removed and
/// capacity is unbounded; memory-only, acceptable for a local dev session.
#[derive(Debug, Default)]
pub struct MessageLog {
    /// Chronological history, oldest first.
    history: RwLock<Vec<Message>>,
}

impl MessageLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message, assigning its id and timestamp.
    ///
    /// Mentions parsed from the content are unioned with any caller-supplied
    /// ids, deduplicated in first-seen order (parsed ids first). The returned
    /// message is the stored entry.
    pub async fn append(&self, draft: MessageDraft) -> Message {
        let mut mention_ids = extract_mentions(&draft.content);
        for id in draft.mention_ids {
            if !mention_ids.contains(&id) {
                mention_ids.push(id);
            }
        }

        let message = Message {
            id: MessageId::new(),
            channel_id: CHANNEL_ID.to_string(),
            workspace_id: WORKSPACE_ID.to_string(),
            content: draft.content,
            user_id: draft.user.id.clone(),
            mention_ids,
            created_at: Utc::now(),
            user: draft.user,
        };

        let mut history = self.history.write().await;
        history.push(message.clone());
        debug!(
            message_id = %message.id,
            user_id = %message.user_id,
            total = history.len(),
            "Message appended"
        );

        message
    }

    /// Returns the last `limit` messages in chronological order.
    ///
    /// `None` uses [`DEFAULT_RECENT_LIMIT`]. A limit at or beyond the history
    /// size returns the whole history.
    pub async fn recent(&self, limit: Option<usize>) -> Vec<Message> {
        let history = self.history.read().await;
        let limit = limit.unwrap_or(DEFAULT_RECENT_LIMIT);
        let start = history.len().saturating_sub(limit);
        history[start..].to_vec()
    }

    /// Number of messages appended so far.
    pub async fn len(&self) -> usize {
        self.history.read().await.len()
    }

    /// Whether the log is still empty.
    pub async fn is_empty(&self) -> bool {
        self.history.read().await.is_empty()
    }
}
