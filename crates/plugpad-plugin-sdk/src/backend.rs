//! The backend contract a plugin implements.

use std::sync::Arc;

use async_trait::async_trait;

use crate::context::ExtensionContext;

/// Identifying information a backend reports about itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendInfo {
    /// Backend name, for logs.
    pub name: String,
    /// Backend version string.
    pub version: String,
}

impl BackendInfo {
    /// Creates a new info record.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// A loadable plugin backend.
///
/// The host invokes [`setup`] exactly once per load, after constructing the
/// context and before serving any plugin-dependent traffic. There is no
/// shutdown hook; state that must survive a restart belongs in storage.
///
/// [`setup`]: PluginBackend::setup
#[async_trait]
pub trait PluginBackend: Send + Sync {
    /// Identifying information, for logs.
    fn info(&self) -> BackendInfo;

    /// Startup hook. Register handlers and schedules on the context here.
    ///
    /// Errors are logged by the host; the emulator keeps running so the
    /// developer can see the failure and fix their code.
    async fn setup(&self, cx: Arc<dyn ExtensionContext>) -> Result<(), String>;
}
