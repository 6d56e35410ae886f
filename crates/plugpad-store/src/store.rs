//! File-backed persistent key/value store.
//!
//! The on-disk format is one JSON object: keys are storage keys, values are
//! arbitrary JSON. Every mutation rewrites the whole file from the in-memory
//! table before returning, so the file always reflects the last completed
//! write. A crash mid-rewrite can corrupt the file; that is an accepted
//! limitation for a local dev tool, and a corrupt file is treated as an
//! empty store on the next start rather than a fatal error.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use plugpad_core::error::{AppError, ErrorKind};
use plugpad_core::result::AppResult;

/// Durable key/value state for one plugin instance.
#[derive(Debug)]
pub struct PersistentStore {
    /// Backing file path.
    path: PathBuf,
    /// In-memory mirror of the backing file.
    ///
    /// The write lock is held across the file rewrite, so overlapping
    /// mutations are serialized in arrival order and readers never observe
    /// a table the file has not caught up with.
    table: RwLock<Map<String, Value>>,
}

impl PersistentStore {
    /// Open the store, loading any existing backing file.
    ///
    /// A file that is missing starts the store empty. A file that exists but
    /// does not parse as a JSON object is logged and also treated as empty.
    pub async fn open(path: &Path) -> AppResult<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create data directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        let table = match fs::read_to_string(path).await {
            Ok(raw) => match serde_json::from_str::<Value>(&raw) {
                Ok(Value::Object(map)) => {
                    debug!(path = %path.display(), keys = map.len(), "Loaded persisted storage");
                    map
                }
                Ok(_) => {
                    warn!(
                        path = %path.display(),
                        "Persisted storage is not a JSON object; starting empty"
                    );
                    Map::new()
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "Persisted storage is unparseable; starting empty"
                    );
                    Map::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read storage file: {}", path.display()),
                    e,
                ));
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            table: RwLock::new(table),
        })
    }

    /// Get the value for a key, or `None` if absent.
    pub async fn get(&self, key: &str) -> Option<Value> {
        self.table.read().await.get(key).cloned()
    }

    /// Set a key. The backing file is fully rewritten before this returns.
    pub async fn set(&self, key: &str, value: Value) -> AppResult<()> {
        let mut table = self.table.write().await;
        table.insert(key.to_string(), value);
        self.rewrite(&table).await
    }

    /// Delete a key. If the key was present, the backing file is fully
    /// rewritten before this returns; deleting an absent key is a no-op and
    /// skips the rewrite.
    pub async fn delete(&self, key: &str) -> AppResult<()> {
        let mut table = self.table.write().await;
        if table.remove(key).is_none() {
            return Ok(());
        }
        self.rewrite(&table).await
    }

    /// All keys currently in the store.
    pub async fn keys(&self) -> Vec<String> {
        self.table.read().await.keys().cloned().collect()
    }

    /// A copy of the full key/value table.
    pub async fn snapshot(&self) -> Map<String, Value> {
        self.table.read().await.clone()
    }

    /// Replace the entire table with the given one and persist it.
    pub async fn replace_all(&self, new_table: Map<String, Value>) -> AppResult<()> {
        let mut table = self.table.write().await;
        *table = new_table;
        self.rewrite(&table).await
    }

    /// Rewrite the backing file from the given table.
    async fn rewrite(&self, table: &Map<String, Value>) -> AppResult<()> {
        let serialized = serde_json::to_string_pretty(&Value::Object(table.clone()))?;
        fs::write(&self.path, serialized).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write storage file: {}", self.path.display()),
                e,
            )
        })?;
        debug!(path = %self.path.display(), keys = table.len(), "Rewrote storage file");
        Ok(())
    }
}
