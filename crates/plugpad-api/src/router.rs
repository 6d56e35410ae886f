//! Route definitions for the Plugpad HTTP surface.
//!
//! API routes are organized by domain and mounted under `/api`; asset
//! routes sit at the root. The router receives `AppState` and passes it to
//! all handlers via Axum's `State` extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(event_routes())
        .merge(message_routes())
        .merge(storage_routes())
        .merge(user_routes());

    Router::new()
        .nest("/api", api_routes)
        .merge(asset_routes())
        .layer(TraceLayer::new_for_http())
        // Local dev tool on loopback; the plugin frontend dev server may sit
        // on any origin.
        .layer(CorsLayer::permissive())
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Push channel.
fn event_routes() -> Router<AppState> {
    Router::new().route("/events", get(handlers::events::subscribe_events))
}

/// Conversation endpoints.
fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/messages", post(handlers::messages::submit_message))
        .route("/messages", get(handlers::messages::recent_messages))
}

/// Storage tooling endpoints.
fn storage_routes() -> Router<AppState> {
    Router::new()
        .route("/storage", get(handlers::storage::get_value))
        .route("/storage", post(handlers::storage::set_value))
        .route("/storage/all", get(handlers::storage::get_all))
        .route("/storage/all", post(handlers::storage::replace_all))
}

/// Simulated-user roster endpoints.
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::users::list_users))
        .route("/users", post(handlers::users::upsert_user))
        .route("/users", delete(handlers::users::remove_user))
}

/// Viewer page and plugin asset passthrough.
fn asset_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::assets::viewer_page))
        .route("/bundle.js", get(handlers::assets::bundle_js))
        .route("/manifest.json", get(handlers::assets::manifest_json))
        .route("/icon.png", get(handlers::assets::icon_png))
}
