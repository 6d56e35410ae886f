//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate, with a `PLUGPAD_`-prefixed environment overlay. Every
//! field has a serde default so a bare working directory needs no config
//! file at all.

pub mod logging;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use self::logging::LoggingConfig;
use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Emulated workspace settings (working directory layout).
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    /// Plugin artifact settings.
    #[serde(default)]
    pub plugins: PluginConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            workspace: WorkspaceConfig::default(),
            plugins: PluginConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port. If occupied at startup the server falls back to an
    /// OS-assigned ephemeral port and logs the one it got.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Working directory layout for the emulated workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Root of the plugin project being developed.
    #[serde(default = "default_root")]
    pub root: String,
    /// Manifest file name, relative to the root.
    #[serde(default = "default_manifest_file")]
    pub manifest_file: String,
    /// Directory holding emulator state (the storage file), relative to the root.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            manifest_file: default_manifest_file(),
            data_dir: default_data_dir(),
        }
    }
}

impl WorkspaceConfig {
    /// Absolute-or-relative path to the manifest file.
    pub fn manifest_path(&self) -> PathBuf {
        Path::new(&self.root).join(&self.manifest_file)
    }

    /// Path to the persisted storage file.
    pub fn storage_path(&self) -> PathBuf {
        Path::new(&self.root).join(&self.data_dir).join("storage.json")
    }

    /// Path to the plugin icon, if the project ships one.
    pub fn icon_path(&self) -> PathBuf {
        Path::new(&self.root).join("icon.png")
    }
}

/// Plugin artifact configuration.
///
/// The artifacts are produced by an external build step; Plugpad only
/// consumes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Compiled backend shared library, relative to the workspace root.
    #[serde(default = "default_backend_artifact")]
    pub backend_artifact: String,
    /// Compiled frontend bundle, relative to the workspace root.
    #[serde(default = "default_frontend_bundle")]
    pub frontend_bundle: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            backend_artifact: default_backend_artifact(),
            frontend_bundle: default_frontend_bundle(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml` (if present), an environment-specific
    /// overlay, and environment variables prefixed with `PLUGPAD_`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("PLUGPAD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Resolve a workspace-relative path against the configured root.
    pub fn workspace_path(&self, relative: &str) -> PathBuf {
        Path::new(&self.workspace.root).join(relative)
    }

    /// Path to the compiled backend artifact.
    pub fn backend_artifact_path(&self) -> PathBuf {
        self.workspace_path(&self.plugins.backend_artifact)
    }

    /// Path to the compiled frontend bundle.
    pub fn frontend_bundle_path(&self) -> PathBuf {
        self.workspace_path(&self.plugins.frontend_bundle)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_root() -> String {
    ".".to_string()
}

fn default_manifest_file() -> String {
    "manifest.json".to_string()
}

fn default_data_dir() -> String {
    ".plugpad".to_string()
}

fn default_backend_artifact() -> String {
    format!("dist/backend_plugin{}", std::env::consts::DLL_SUFFIX)
}

fn default_frontend_bundle() -> String {
    "dist/bundle.js".to_string()
}
