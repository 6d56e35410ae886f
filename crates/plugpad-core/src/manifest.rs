//! Plugin manifest model.
//!
//! The manifest is read once from the working directory at startup and is
//! immutable for the process lifetime. A missing or unparseable manifest is
//! a fatal startup error; anything beyond presence and parseability is not
//! validated here.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// The plugin manifest, as shipped in the plugin project's `manifest.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Stable machine identifier for the plugin.
    pub slug: String,
    /// Human-readable plugin name; also the bot display name.
    pub name: String,
    /// Plugin version string.
    pub version: String,
    /// Capabilities the plugin declares. Parsed but not enforced by the
    /// emulation; logged at startup for visibility.
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Source path of the backend entry point, relative to the project root.
    pub backend_path: String,
    /// Source path of the frontend entry point, if the plugin ships a UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend_path: Option<String>,
}

impl Manifest {
    /// Load the manifest from disk.
    ///
    /// Both a missing file and a parse failure are configuration errors;
    /// the caller treats either as fatal.
    pub fn load(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::configuration(format!(
                "Manifest not readable at '{}': {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&raw).map_err(|e| {
            AppError::configuration(format!("Manifest at '{}' is invalid: {}", path.display(), e))
        })
    }

    /// User id the host attributes to messages sent by the plugin.
    pub fn bot_user_id(&self) -> String {
        format!("{}-bot", self.slug)
    }
}
