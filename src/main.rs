//! Plugpad Server — local host emulator for chat-platform plugins
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use plugpad_core::config::AppConfig;
use plugpad_core::error::AppError;
use plugpad_core::manifest::Manifest;

#[tokio::main]
async fn main() {
    let env = std::env::var("PLUGPAD_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Plugpad v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Load the plugin manifest (fatal when absent) ─────
    let manifest_path = config.workspace.manifest_path();
    let manifest = Manifest::load(&manifest_path)?;
    tracing::info!(
        slug = %manifest.slug,
        name = %manifest.name,
        version = %manifest.version,
        permissions = ?manifest.permissions,
        "Manifest loaded"
    );

    // ── Step 2: Open per-extension storage ───────────────────────
    let store = Arc::new(plugpad_store::PersistentStore::open(&config.workspace.storage_path()).await?);

    // ── Step 3: In-memory workspace state ────────────────────────
    let messages = Arc::new(plugpad_chat::MessageLog::new());
    let roster = Arc::new(plugpad_chat::UserRoster::new());
    let viewers = Arc::new(plugpad_realtime::ViewerRegistry::new());

    // ── Step 4: Load the plugin backend ──────────────────────────
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

    // ── Step 5: Build and start HTTP server ──────────────────────
    let app_state = plugpad_api::state::AppState {
        config: Arc::new(config.clone()),
        manifest: Arc::new(manifest),
        store,
        messages,
        roster,
        viewers,
        plugin_host,
    };

    let app = plugpad_api::router::build_router(app_state);

    let listener = plugpad_api::server::bind_listener(&config.server.host, config.server.port).await?;
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::internal(format!("Listener has no local address: {e}")))?;

    tracing::info!("Plugpad listening on http://{addr}");

    // ── Step 6: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, stopping...");
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Plugpad shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
