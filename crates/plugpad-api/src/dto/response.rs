//! Response DTOs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use plugpad_chat::Message;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple acknowledgment payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

/// POST /api/messages response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitMessageResponse {
    /// The stored, mention-resolved message.
    pub message: Message,
    /// Whether a plugin handler ran for it.
    pub handled: bool,
}

/// GET /api/storage response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageValueResponse {
    /// The stored value, or `null` when the key is absent.
    pub value: Option<Value>,
}
