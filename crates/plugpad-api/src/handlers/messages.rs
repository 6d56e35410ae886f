//! Conversation endpoints.

use axum::Json;
use axum::extract::{Query, State};
use tracing::debug;

use plugpad_chat::{Message, MessageDraft, MessageUser};
use plugpad_core::error::AppError;

use crate::dto::request::{RecentMessagesQuery, SubmitMessageRequest};
use crate::dto::response::{ApiResponse, SubmitMessageResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/messages
///
/// Appends the message under the submitting user's identity, broadcasts it
/// to viewers, then dispatches it to the plugin handler if one is
/// registered. A handler failure is surfaced as a 500 while the message
/// stays in the log.
pub async fn submit_message(
    State(state): State<AppState>,
    Json(req): Json<SubmitMessageRequest>,
) -> Result<Json<ApiResponse<SubmitMessageResponse>>, ApiError> {
    if req.content.trim().is_empty() {
        return Err(AppError::validation("Message content must not be empty").into());
    }

    let user_id = req
        .user_id
        .unwrap_or_else(|| plugpad_chat::DEFAULT_USER_ID.to_string());
    let user = state
        .roster
        .get(&user_id)
        .ok_or_else(|| AppError::not_found(format!("Unknown user '{user_id}'")))?;

    let message = state
        .messages
        .append(MessageDraft {
            content: req.content,
            user: MessageUser {
                id: user.id,
                name: user.name,
            },
            mention_ids: req.mention_ids,
        })
        .await;

    let delivered = state.viewers.broadcast_message(&message);
    debug!(message_id = %message.id, delivered, "Message broadcast");

    let handled = state.plugin_host.dispatch_message(message.clone()).await?;

    Ok(Json(ApiResponse::ok(SubmitMessageResponse {
        message,
        handled,
    })))
}

/// GET /api/messages
///
/// Recent history for the viewer page, oldest first.
pub async fn recent_messages(
    State(state): State<AppState>,
    Query(query): Query<RecentMessagesQuery>,
) -> Json<ApiResponse<Vec<Message>>> {
    let messages = state.messages.recent(query.limit).await;
    Json(ApiResponse::ok(messages))
}
