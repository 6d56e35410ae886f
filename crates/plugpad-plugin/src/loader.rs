//! Backend artifact loader using `libloading`.
//!
//! Every load opens a fresh library and produces a new versioned handle, so
//! a reload within a single run never sees a stale cached backend. Loaded
//! libraries are kept alive for the lifetime of the loader.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use plugpad_core::error::AppError;
use plugpad_core::result::AppResult;
use plugpad_plugin_sdk::{CREATE_BACKEND_SYMBOL, CreateBackendFn, PluginBackend};

/// A freshly-loaded backend with its load-generation number.
#[derive(Clone)]
pub struct LoadedBackend {
    /// Monotonic load generation, starting at 1.
    pub version: u64,
    /// The backend instance.
    pub backend: Arc<dyn PluginBackend>,
}

impl std::fmt::Debug for LoadedBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedBackend")
            .field("version", &self.version)
            .field("info", &self.backend.info())
            .finish()
    }
}

/// Loads plugin backends from shared libraries (.so / .dll / .dylib).
pub struct BackendLoader {
    /// Loaded libraries (kept alive for the lifetime of the loader).
    _libraries: Vec<libloading::Library>,
    /// Next load generation.
    next_version: u64,
}

impl BackendLoader {
    /// Creates a new loader.
    pub fn new() -> Self {
        Self {
            _libraries: Vec::new(),
            next_version: 1,
        }
    }

    /// Loads a backend from the given shared library path.
    ///
    /// # Safety
    /// This function loads arbitrary code from a shared library.
    /// Only load artifacts you built yourself.
    pub unsafe fn load(&mut self, path: &Path) -> AppResult<LoadedBackend> {
        let lib = unsafe { libloading::Library::new(path) }.map_err(|e| {
            AppError::plugin(format!(
                "Failed to load backend artifact '{}': {}",
                path.display(),
                e
            ))
        })?;

        let create_fn: libloading::Symbol<CreateBackendFn> =
            unsafe { lib.get(CREATE_BACKEND_SYMBOL) }.map_err(|e| {
                AppError::plugin(format!(
                    "Backend artifact '{}' has no recognizable plugin export: {}",
                    path.display(),
                    e
                ))
            })?;

        let raw = unsafe { create_fn() };
        if raw.is_null() {
            return Err(AppError::plugin(format!(
                "Backend artifact '{}' returned a null plugin",
                path.display()
            )));
        }
        let backend: Arc<dyn PluginBackend> = Arc::from(unsafe { Box::from_raw(raw) });

        let version = self.next_version;
        self.next_version += 1;
        self._libraries.push(lib);

        info!(
            path = %path.display(),
            version,
            name = %backend.info().name,
            "Backend artifact loaded"
        );

        Ok(LoadedBackend { version, backend })
    }
}

impl Default for BackendLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BackendLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendLoader")
            .field("loaded_count", &self._libraries.len())
            .finish()
    }
}
