//! JSON file store — two documents in a per-user data directory.
//!
//! Writes serialize to a temp file in the same directory and rename over the
//! target, so a reader never observes a torn file. There is no cross-process
//! locking: concurrent writers race last-writer-wins.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::debug;

use crate::activity::ActivityLog;
use crate::error::StoreError;
use crate::store::traits::StateStore;
use crate::tasks::model::TaskBook;

/// File name of the three-partition task document.
pub const TASKS_FILE: &str = "task-completions.json";

/// File name of the recent-activity document.
pub const ACTIVITY_FILE: &str = "recent-task-jobs.json";

/// File-backed store rooted at a data directory.
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `data_dir`, creating the directory if needed.
    pub async fn new(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)
            .await
            .map_err(|e| StoreError::Io {
                path: data_dir.display().to_string(),
                source: e,
            })?;
        Ok(Self { data_dir })
    }

    fn tasks_path(&self) -> PathBuf {
        self.data_dir.join(TASKS_FILE)
    }

    fn activity_path(&self) -> PathBuf {
        self.data_dir.join(ACTIVITY_FILE)
    }

    async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
        let raw = match fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::Io {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        };
        let value = serde_json::from_str(&raw).map_err(|e| StoreError::Malformed {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(Some(value))
    }

    async fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(value).map_err(|e| StoreError::Serialize {
            path: path.display().to_string(),
            source: e,
        })?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).await.map_err(|e| StoreError::Io {
            path: tmp.display().to_string(),
            source: e,
        })?;
        fs::rename(&tmp, path).await.map_err(|e| StoreError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        debug!(path = %path.display(), "Saved document");
        Ok(())
    }
}

#[async_trait]
impl StateStore for JsonFileStore {
    async fn load_tasks(&self) -> Result<Option<TaskBook>, StoreError> {
        Self::load_json(&self.tasks_path()).await
    }

    async fn save_tasks(&self, book: &TaskBook) -> Result<(), StoreError> {
        Self::save_json(&self.tasks_path(), book).await
    }

    async fn load_activity(&self) -> Result<Option<ActivityLog>, StoreError> {
        Self::load_json(&self.activity_path()).await
    }

    async fn save_activity(&self, log: &ActivityLog) -> Result<(), StoreError> {
        Self::save_json(&self.activity_path(), log).await
    }
}
