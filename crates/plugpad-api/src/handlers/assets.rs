//! Static asset passthrough and the embedded viewer page.

use std::path::Path;

use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};

use plugpad_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// The developer viewer page, compiled into the binary so the emulator
/// works from an empty working directory.
const VIEWER_PAGE: &str = include_str!("../../assets/viewer.html");

/// GET /
pub async fn viewer_page() -> Html<&'static str> {
    Html(VIEWER_PAGE)
}

/// GET /bundle.js
pub async fn bundle_js(State(state): State<AppState>) -> Result<Response, ApiError> {
    serve_file(&state.config.frontend_bundle_path(), "application/javascript").await
}

/// GET /manifest.json
pub async fn manifest_json(State(state): State<AppState>) -> Result<Response, ApiError> {
    serve_file(&state.config.workspace.manifest_path(), "application/json").await
}

/// GET /icon.png
pub async fn icon_png(State(state): State<AppState>) -> Result<Response, ApiError> {
    serve_file(&state.config.workspace.icon_path(), "image/png").await
}

/// Streams the file's bytes with the given content type, or 404s when the
/// project does not ship it. Never invents content.
async fn serve_file(path: &Path, content_type: &'static str) -> Result<Response, ApiError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(AppError::not_found(format!("No such asset: {}", path.display())).into())
        }
        Err(e) => Err(AppError::storage(format!(
            "Failed to read asset '{}': {}",
            path.display(),
            e
        ))
        .into()),
    }
}
