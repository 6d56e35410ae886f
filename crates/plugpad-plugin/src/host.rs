//! Plugin host lifecycle: load, setup, dispatch, reload.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{error, info, warn};

use plugpad_chat::Message;
use plugpad_core::error::AppError;
use plugpad_core::result::AppResult;
use plugpad_plugin_sdk::{ExtensionContext, MessageEvent};

use crate::context::HostContext;
use crate::loader::{BackendLoader, LoadedBackend};

/// Owns the loaded backend and routes events into it.
///
/// A missing or broken artifact never stops the emulator: the host degrades
/// to frontend-only mode and keeps serving the rest of the surface so the
/// developer can iterate on whatever does exist.
pub struct PluginHost {
    /// Capability context shared with the backend.
    context: Arc<HostContext>,
    /// Loader, serialized so reloads cannot race each other.
    loader: Mutex<BackendLoader>,
    /// Currently-active backend, if any.
    active: RwLock<Option<LoadedBackend>>,
    /// Path to the compiled backend artifact.
    artifact_path: PathBuf,
}

impl PluginHost {
    /// Creates a host for the given artifact path. Nothing is loaded until
    /// [`start`] runs.
    ///
    /// [`start`]: PluginHost::start
    pub fn new(context: Arc<HostContext>, artifact_path: PathBuf) -> Self {
        Self {
            context,
            loader: Mutex::new(BackendLoader::new()),
            active: RwLock::new(None),
            artifact_path,
        }
    }

    /// Loads the backend artifact and runs its setup hook.
    ///
    /// Infallible by design: every failure mode is logged and leaves the
    /// host in frontend-only mode instead of aborting startup.
    pub async fn start(&self) {
        if !self.artifact_path.exists() {
            info!(
                path = %self.artifact_path.display(),
                "No backend artifact found; running frontend-only"
            );
            return;
        }

        let loaded = {
            let mut loader = self.loader.lock().await;
            match unsafe { loader.load(&self.artifact_path) } {
                Ok(loaded) => loaded,
                Err(e) => {
                    warn!(
                        path = %self.artifact_path.display(),
                        error = %e,
                        "Backend artifact could not be loaded; running frontend-only"
                    );
                    return;
                }
            }
        };

        let cx: Arc<dyn ExtensionContext> = self.context.clone();
        if let Err(e) = loaded.backend.setup(cx).await {
            error!(
                plugin = %self.context.manifest().slug,
                error = %e,
                "Backend setup failed; continuing without its handlers"
            );
        } else {
            let info = loaded.backend.info();
            info!(
                plugin = %self.context.manifest().slug,
                backend = %info.name,
                version = %info.version,
                "Backend ready"
            );
        }

        *self.active.write().await = Some(loaded);
    }

    /// Reloads the backend artifact from disk and reruns setup.
    ///
    /// The previous backend stays active if the new artifact fails to load.
    /// Handler registrations from the new setup replace the old ones.
    pub async fn reload(&self) -> AppResult<()> {
        let loaded = {
            let mut loader = self.loader.lock().await;
            unsafe { loader.load(&self.artifact_path) }?
        };

        let cx: Arc<dyn ExtensionContext> = self.context.clone();
        if let Err(e) = loaded.backend.setup(cx).await {
            return Err(AppError::plugin(format!("Backend setup failed: {e}")));
        }

        let version = loaded.version;
        *self.active.write().await = Some(loaded);
        info!(version, "Backend reloaded");
        Ok(())
    }

    /// Whether a backend is currently loaded.
    pub async fn is_loaded(&self) -> bool {
        self.active.read().await.is_some()
    }

    /// Dispatches a stored message to the backend's registered handler.
    ///
    /// Returns `Ok(false)` when no handler is registered (including
    /// frontend-only mode), `Ok(true)` when the handler ran cleanly, and a
    /// plugin error when the handler itself failed.
    pub async fn dispatch_message(&self, message: Message) -> AppResult<bool> {
        let Some(handler) = self.context.message_handler() else {
            return Ok(false);
        };

        let cx: Arc<dyn ExtensionContext> = self.context.clone();
        handler
            .handle(MessageEvent::new(message), cx)
            .await
            .map_err(|e| AppError::plugin(format!("Plugin message handler failed: {e}")))?;
        Ok(true)
    }

    /// The shared capability context.
    pub fn context(&self) -> &Arc<HostContext> {
        &self.context
    }
}

impl std::fmt::Debug for PluginHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginHost")
            .field("artifact_path", &self.artifact_path)
            .finish()
    }
}
