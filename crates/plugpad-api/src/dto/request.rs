//! Request DTOs.
//!
//! Wire format is camelCase, matching what the platform's dev tooling and
//! the viewer page send.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// POST /api/messages body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitMessageRequest {
    /// Sending user; defaults to the seeded developer user when omitted.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Raw message text.
    pub content: String,
    /// Extra mention ids, unioned with the ones parsed from `content`.
    #[serde(default)]
    pub mention_ids: Vec<String>,
}

/// POST /api/storage body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetStorageRequest {
    /// Storage key.
    pub key: String,
    /// Arbitrary JSON value to persist.
    pub value: Value,
}

/// GET /api/storage query.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageKeyQuery {
    /// Storage key to read.
    pub key: String,
}

/// GET /api/messages query.
#[derive(Debug, Clone, Deserialize)]
pub struct RecentMessagesQuery {
    /// Maximum number of messages to return, newest-biased.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// DELETE /api/users query.
#[derive(Debug, Clone, Deserialize)]
pub struct UserIdQuery {
    /// Id of the user to remove.
    pub id: String,
}
