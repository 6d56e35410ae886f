//! Simulated-user roster endpoints.

use axum::Json;
use axum::extract::{Query, State};

use plugpad_chat::User;
use plugpad_core::error::AppError;

use crate::dto::request::UserIdQuery;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> Json<ApiResponse<Vec<User>>> {
    Json(ApiResponse::ok(state.roster.list()))
}

/// POST /api/users
pub async fn upsert_user(
    State(state): State<AppState>,
    Json(user): Json<User>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    if user.id.trim().is_empty() {
        return Err(AppError::validation("User id must not be empty").into());
    }
    if user.name.trim().is_empty() {
        return Err(AppError::validation("User name must not be empty").into());
    }

    state.roster.upsert(user.clone());
    Ok(Json(ApiResponse::ok(user)))
}

/// DELETE /api/users?id=
pub async fn remove_user(
    State(state): State<AppState>,
    Query(query): Query<UserIdQuery>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    if !state.roster.remove(&query.id) {
        return Err(AppError::not_found(format!("Unknown user '{}'", query.id)).into());
    }

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: format!("Removed '{}'", query.id),
    })))
}
