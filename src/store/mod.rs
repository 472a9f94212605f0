//! Persistence layer — JSON file storage for the task book and activity log.

pub mod json_file;
pub mod traits;

pub use json_file::JsonFileStore;
pub use traits::StateStore;
