//! Shared test helpers for integration tests.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use plugpad_api::state::AppState;
use plugpad_core::config::AppConfig;
use plugpad_core::manifest::Manifest;

/// Test application context.
///
/// Builds the full `AppState` over a temporary working directory holding a
/// real manifest, so requests exercise the same wiring as the binary.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Shared state, for direct assertions against the subsystems.
    pub state: AppState,
    /// The temporary working directory; dropped with the app.
    pub workspace: TempDir,
}

impl TestApp {
    /// Create a test application over a fresh working directory.
    pub async fn new() -> Self {
        let workspace = TempDir::new().expect("Failed to create temp workspace");
        write_manifest(workspace.path());
        Self::over(workspace).await
    }

    /// Create a test application over an existing working directory,
    /// simulating an emulator restart.
    pub async fn over(workspace: TempDir) -> Self {
        let mut config = AppConfig::default();
        config.workspace.root = workspace.path().to_string_lossy().into_owned();

        let manifest =
            Manifest::load(&config.workspace.manifest_path()).expect("Failed to load manifest");

        let store = Arc::new(
            plugpad_store::PersistentStore::open(&config.workspace.storage_path())
                .await
                .expect("Failed to open store"),
        );
        let messages = Arc::new(plugpad_chat::MessageLog::new());
        let roster = Arc::new(plugpad_chat::UserRoster::new());
        let viewers = Arc::new(plugpad_realtime::ViewerRegistry::new());

        let context = Arc::new(plugpad_plugin::HostContext::new(
            manifest.clone(),
            Arc::clone(&store),
            Arc::clone(&messages),
            Arc::clone(&viewers),
        ));
        let plugin_host = Arc::new(plugpad_plugin::PluginHost::new(
            context,
            config.backend_artifact_path(),
        ));
        plugin_host.start().await;

        let state = AppState {
            config: Arc::new(config),
            manifest: Arc::new(manifest),
            store,
            messages,
            roster,
            viewers,
            plugin_host,
        };

        let router = plugpad_api::router::build_router(state.clone());

        Self {
            router,
            state,
            workspace,
        }
    }

    /// Make an HTTP request to the test app.
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Shorthand for a body-less GET.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// GET returning the raw body, for non-JSON assets.
    pub async fn get_raw(&self, path: &str) -> (StatusCode, String, http::HeaderMap) {
        let req = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        (
            status,
            String::from_utf8_lossy(&body_bytes).into_owned(),
            headers,
        )
    }
}

/// Writes the standard test manifest into the workspace.
pub fn write_manifest(root: &Path) {
    let manifest = serde_json::json!({
        "slug": "echo",
        "name": "Echo",
        "version": "0.1.0",
        "permissions": ["messages:write", "storage"],
        "backendPath": "src/backend.rs"
    });
    std::fs::write(
        root.join("manifest.json"),
        serde_json::to_string_pretty(&manifest).unwrap(),
    )
    .expect("Failed to write manifest");
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body (`Null` for non-JSON responses).
    pub body: Value,
}
