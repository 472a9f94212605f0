//! Storage trait — async interface over the two persisted documents.

use async_trait::async_trait;

use crate::activity::ActivityLog;
use crate::error::StoreError;
use crate::tasks::model::TaskBook;

/// Backend-agnostic persistence for the task book and activity log.
///
/// Loads return `Ok(None)` when the document has never been written; an
/// error means the document exists but could not be read or parsed. How to
/// recover from that is the caller's policy, not the store's.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load the three-partition task book.
    async fn load_tasks(&self) -> Result<Option<TaskBook>, StoreError>;

    /// Persist the task book.
    async fn save_tasks(&self, book: &TaskBook) -> Result<(), StoreError>;

    /// Load the recent-activity log.
    async fn load_activity(&self) -> Result<Option<ActivityLog>, StoreError>;

    /// Persist the recent-activity log.
    async fn save_activity(&self, log: &ActivityLog) -> Result<(), StoreError>;
}
