//! Tracker configuration — data directory and detection windows.

use std::path::PathBuf;

/// Default query window for correlating a message with recent jobs, in hours.
pub const DEFAULT_RECENT_WINDOW_HOURS: i64 = 2;

/// Default retention window for the activity log, in hours.
pub const DEFAULT_RETENTION_HOURS: i64 = 24;

/// Default age past scheduled time after which a pending task is overdue, in hours.
pub const DEFAULT_OVERDUE_HOURS: i64 = 24;

/// Runtime configuration for the tracker.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Directory holding the task and activity files.
    pub data_dir: PathBuf,
    /// Window for treating a job as "recently executed" when resolving
    /// completions (hours).
    pub recent_window_hours: i64,
    /// How long activity entries are kept before pruning (hours).
    pub retention_hours: i64,
    /// Age past scheduled time after which a pending task counts as overdue
    /// (hours).
    pub overdue_hours: i64,
}

impl TrackerConfig {
    /// Build a config from `TASK_TRACKER_*` environment variables.
    ///
    /// Every knob has a default; unset or unparsable values fall back to it.
    pub fn from_env() -> Self {
        let data_dir = std::env::var("TASK_TRACKER_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());

        let recent_window_hours: i64 = std::env::var("TASK_TRACKER_RECENT_WINDOW_HOURS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_RECENT_WINDOW_HOURS);

        let retention_hours: i64 = std::env::var("TASK_TRACKER_RETENTION_HOURS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_RETENTION_HOURS);

        let overdue_hours: i64 = std::env::var("TASK_TRACKER_OVERDUE_HOURS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_OVERDUE_HOURS);

        Self {
            data_dir,
            recent_window_hours,
            retention_hours,
            overdue_hours,
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            recent_window_hours: DEFAULT_RECENT_WINDOW_HOURS,
            retention_hours: DEFAULT_RETENTION_HOURS,
            overdue_hours: DEFAULT_OVERDUE_HOURS,
        }
    }
}

fn default_data_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".task-tracker")
}
