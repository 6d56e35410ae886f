//! Message and user models for the emulated conversation.
//!
//! Wire format is camelCase to match what plugin frontends and the viewer
//! page expect from the real platform.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use plugpad_core::types::MessageId;

/// A message in the emulated conversation. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique message id, assigned on append.
    pub id: MessageId,
    /// Channel the message belongs to (always the single emulated channel).
    pub channel_id: String,
    /// Workspace the message belongs to (always the single emulated workspace).
    pub workspace_id: String,
    /// Raw message text.
    pub content: String,
    /// Id of the sending user (simulated user or the plugin's bot identity).
    pub user_id: String,
    /// Mentioned user ids, deduplicated in first-seen order.
    pub mention_ids: Vec<String>,
    /// Append timestamp, assigned by the log.
    pub created_at: DateTime<Utc>,
    /// Denormalized sender snapshot, as the platform delivers it.
    pub user: MessageUser,
}

/// Sender snapshot embedded in every delivered message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageUser {
    /// Sender user id.
    pub id: String,
    /// Sender display name at send time.
    pub name: String,
}

/// A simulated user in the in-memory roster. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Developer-chosen user id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional avatar URL shown by the viewer page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Everything a caller supplies when appending; id, timestamp, and parsed
/// mentions are filled in by the log.
#[derive(Debug, Clone)]
pub struct MessageDraft {
    /// Raw message text.
    pub content: String,
    /// Sender snapshot.
    pub user: MessageUser,
    /// Caller-supplied mention ids, unioned with the ones parsed from
    /// `content`.
    pub mention_ids: Vec<String>,
}
