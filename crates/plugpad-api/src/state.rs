//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use plugpad_chat::{MessageLog, UserRoster};
use plugpad_core::config::AppConfig;
use plugpad_core::manifest::Manifest;
use plugpad_plugin::PluginHost;
use plugpad_realtime::ViewerRegistry;
use plugpad_store::PersistentStore;

/// Application state containing all shared subsystems.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks; handlers reach shared
/// tables only through this object.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// The plugin manifest the emulator was started with.
    pub manifest: Arc<Manifest>,
    /// Durable per-extension storage.
    pub store: Arc<PersistentStore>,
    /// Append-only conversation history.
    pub messages: Arc<MessageLog>,
    /// Simulated-user roster.
    pub roster: Arc<UserRoster>,
    /// Connected push-channel viewers.
    pub viewers: Arc<ViewerRegistry>,
    /// Loaded plugin backend and its dispatch surface.
    pub plugin_host: Arc<PluginHost>,
}
