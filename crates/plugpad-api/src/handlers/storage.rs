//! Per-extension storage tooling endpoints.
//!
//! These exist so the developer can inspect and seed plugin state without
//! writing a throwaway backend; they hit the same store the plugin does.

use axum::Json;
use axum::extract::{Query, State};
use serde_json::{Map, Value};

use plugpad_core::error::AppError;

use crate::dto::request::{SetStorageRequest, StorageKeyQuery};
use crate::dto::response::{ApiResponse, MessageResponse, StorageValueResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/storage?key=
pub async fn get_value(
    State(state): State<AppState>,
    Query(query): Query<StorageKeyQuery>,
) -> Json<StorageValueResponse> {
    let value = state.store.get(&query.key).await;
    Json(StorageValueResponse { value })
}

/// POST /api/storage
pub async fn set_value(
    State(state): State<AppState>,
    Json(req): Json<SetStorageRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    if req.key.is_empty() {
        return Err(AppError::validation("Storage key must not be empty").into());
    }

    state.store.set(&req.key, req.value).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: format!("Stored '{}'", req.key),
    })))
}

/// GET /api/storage/all
pub async fn get_all(State(state): State<AppState>) -> Json<Map<String, Value>> {
    Json(state.store.snapshot().await)
}

/// POST /api/storage/all
pub async fn replace_all(
    State(state): State<AppState>,
    Json(table): Json<Map<String, Value>>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let keys = table.len();
    state.store.replace_all(table).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: format!("Replaced storage with {keys} keys"),
    })))
}
