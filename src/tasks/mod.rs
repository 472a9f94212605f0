//! Task lifecycle — records, the three-partition book, follow-ups, summaries.

pub mod follow_up;
pub mod model;
pub mod summary;

pub use follow_up::FollowUpTier;
pub use model::{CompletedTask, CompletionMethod, TaskBook, TaskRecord};
