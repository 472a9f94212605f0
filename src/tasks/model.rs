//! Task data model — pending/completed records and the three-partition book.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How a task's completion was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionMethod {
    /// Explicitly marked by the user.
    Manual,
    /// Inferred from a completion phrase correlated with recent job activity.
    AutoDetected,
    /// Inferred from a completion phrase with no activity signal — the newest
    /// pending task is guessed.
    AutoDetectedFallback,
}

impl std::fmt::Display for CompletionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Manual => "manual",
            Self::AutoDetected => "auto_detected",
            Self::AutoDetectedFallback => "auto_detected_fallback",
        };
        write!(f, "{s}")
    }
}

/// A reminder task awaiting completion confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Human-readable task name.
    pub task_name: String,
    /// When the reminder was scheduled to fire.
    pub scheduled_time: DateTime<Utc>,
    /// When tracking started.
    pub created_at: DateTime<Utc>,
    /// How many follow-up reminders have been generated so far.
    pub follow_up_count: u32,
}

impl TaskRecord {
    /// Create a fresh record with `created_at` = now and no follow-ups.
    pub fn new(task_name: impl Into<String>, scheduled_time: DateTime<Utc>) -> Self {
        Self {
            task_name: task_name.into(),
            scheduled_time,
            created_at: Utc::now(),
            follow_up_count: 0,
        }
    }
}

/// A task whose completion has been confirmed. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedTask {
    /// The record as it was while pending.
    #[serde(flatten)]
    pub record: TaskRecord,
    /// When completion was confirmed.
    pub completed_at: DateTime<Utc>,
    /// How completion was established.
    pub completion_method: CompletionMethod,
}

/// The three-partition task document.
///
/// Invariant: a job id never appears in both `pending` and `completed`.
/// The `overdue` partition is a legacy counter map kept for on-disk
/// compatibility; completion clears entries but nothing writes new ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskBook {
    /// Tasks awaiting completion, keyed by job id.
    #[serde(default)]
    pub pending: BTreeMap<String, TaskRecord>,
    /// Confirmed completions, keyed by job id.
    #[serde(default)]
    pub completed: BTreeMap<String, CompletedTask>,
    /// Legacy overdue counters, keyed by job id.
    #[serde(default)]
    pub overdue: BTreeMap<String, u32>,
}

impl TaskBook {
    /// Insert or overwrite a pending task. No uniqueness check beyond
    /// overwrite-by-key.
    pub fn insert_pending(&mut self, job_id: impl Into<String>, record: TaskRecord) {
        self.pending.insert(job_id.into(), record);
    }

    /// Move a pending task to completed with `completed_at` = now.
    ///
    /// Clears any legacy overdue counter for the job. Returns `None` when the
    /// job id is not pending, leaving the book untouched.
    pub fn complete(&mut self, job_id: &str, method: CompletionMethod) -> Option<CompletedTask> {
        let record = self.pending.remove(job_id)?;
        self.overdue.remove(job_id);
        let completed = CompletedTask {
            record,
            completed_at: Utc::now(),
            completion_method: method,
        };
        self.completed.insert(job_id.to_string(), completed.clone());
        Some(completed)
    }

    /// Pending tasks whose scheduled time is more than `threshold_hours` old.
    pub fn overdue_tasks(&self, threshold_hours: i64) -> BTreeMap<String, TaskRecord> {
        let cutoff = Utc::now() - Duration::hours(threshold_hours);
        self.pending
            .iter()
            .filter(|(_, record)| record.scheduled_time < cutoff)
            .map(|(id, record)| (id.clone(), record.clone()))
            .collect()
    }

    /// The pending job id with the latest `created_at`, if any.
    ///
    /// Timestamps are compared as parsed datetimes; exact ties go to the
    /// greatest job id.
    pub fn latest_pending(&self) -> Option<&str> {
        self.pending
            .iter()
            .max_by(|a, b| a.1.created_at.cmp(&b.1.created_at).then(a.0.cmp(b.0)))
            .map(|(id, _)| id.as_str())
    }
}

/// Parse a user-supplied scheduled time.
///
/// Accepts RFC 3339 (offsets allowed) or a naive `YYYY-MM-DDTHH:MM:SS`
/// taken as UTC.
pub fn parse_scheduled_time(value: &str) -> Result<DateTime<Utc>, Error> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc());
    }
    Err(Error::InvalidTimestamp {
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_created_at(name: &str, created_at: DateTime<Utc>) -> TaskRecord {
        TaskRecord {
            task_name: name.into(),
            scheduled_time: created_at,
            created_at,
            follow_up_count: 0,
        }
    }

    #[test]
    fn new_record_defaults() {
        let record = TaskRecord::new("Water plants", Utc::now());
        assert_eq!(record.task_name, "Water plants");
        assert_eq!(record.follow_up_count, 0);
    }

    #[test]
    fn insert_then_pending_contains() {
        let mut book = TaskBook::default();
        book.insert_pending("job-1", TaskRecord::new("Water plants", Utc::now()));

        let record = book.pending.get("job-1").unwrap();
        assert_eq!(record.task_name, "Water plants");
        assert_eq!(record.follow_up_count, 0);
    }

    #[test]
    fn insert_overwrites_by_key() {
        let mut book = TaskBook::default();
        book.insert_pending("job-1", TaskRecord::new("First", Utc::now()));
        book.insert_pending("job-1", TaskRecord::new("Second", Utc::now()));

        assert_eq!(book.pending.len(), 1);
        assert_eq!(book.pending["job-1"].task_name, "Second");
    }

    #[test]
    fn complete_moves_to_completed() {
        let mut book = TaskBook::default();
        book.insert_pending("job-1", TaskRecord::new("Water plants", Utc::now()));

        let completed = book.complete("job-1", CompletionMethod::Manual).unwrap();
        assert_eq!(completed.record.task_name, "Water plants");
        assert_eq!(completed.completion_method, CompletionMethod::Manual);

        assert!(book.pending.is_empty());
        assert!(book.completed.contains_key("job-1"));
    }

    #[test]
    fn complete_unknown_returns_none() {
        let mut book = TaskBook::default();
        assert!(book.complete("ghost", CompletionMethod::Manual).is_none());
        assert!(book.completed.is_empty());
    }

    #[test]
    fn complete_twice_second_fails() {
        let mut book = TaskBook::default();
        book.insert_pending("job-1", TaskRecord::new("Water plants", Utc::now()));

        assert!(book.complete("job-1", CompletionMethod::Manual).is_some());
        assert!(book.complete("job-1", CompletionMethod::Manual).is_none());
        // First completion is unaffected
        assert_eq!(
            book.completed["job-1"].completion_method,
            CompletionMethod::Manual
        );
    }

    #[test]
    fn complete_clears_overdue_counter() {
        let mut book = TaskBook::default();
        book.insert_pending("job-1", TaskRecord::new("Water plants", Utc::now()));
        book.overdue.insert("job-1".into(), 3);

        book.complete("job-1", CompletionMethod::AutoDetected).unwrap();
        assert!(book.overdue.is_empty());
    }

    #[test]
    fn overdue_respects_threshold() {
        let mut book = TaskBook::default();
        book.insert_pending(
            "job-old",
            TaskRecord::new("Old task", Utc::now() - Duration::hours(30)),
        );
        book.insert_pending("job-new", TaskRecord::new("New task", Utc::now()));

        let overdue = book.overdue_tasks(24);
        assert!(overdue.contains_key("job-old"));
        assert!(!overdue.contains_key("job-new"));

        assert!(book.overdue_tasks(48).is_empty());
    }

    #[test]
    fn latest_pending_picks_newest_created_at() {
        let now = Utc::now();
        let mut book = TaskBook::default();
        book.insert_pending("job-a", record_created_at("Older", now - Duration::hours(5)));
        book.insert_pending("job-b", record_created_at("Newer", now - Duration::hours(1)));

        assert_eq!(book.latest_pending(), Some("job-b"));
    }

    #[test]
    fn latest_pending_ties_break_to_greatest_job_id() {
        let now = Utc::now();
        let mut book = TaskBook::default();
        book.insert_pending("job-a", record_created_at("A", now));
        book.insert_pending("job-b", record_created_at("B", now));

        assert_eq!(book.latest_pending(), Some("job-b"));
    }

    #[test]
    fn latest_pending_empty_book() {
        assert_eq!(TaskBook::default().latest_pending(), None);
    }

    #[test]
    fn completion_method_serde_snake_case() {
        let json = serde_json::to_string(&CompletionMethod::AutoDetected).unwrap();
        assert_eq!(json, "\"auto_detected\"");

        let json = serde_json::to_string(&CompletionMethod::AutoDetectedFallback).unwrap();
        assert_eq!(json, "\"auto_detected_fallback\"");

        let parsed: CompletionMethod = serde_json::from_str("\"manual\"").unwrap();
        assert_eq!(parsed, CompletionMethod::Manual);
    }

    #[test]
    fn completion_method_display_matches_serde() {
        for method in [
            CompletionMethod::Manual,
            CompletionMethod::AutoDetected,
            CompletionMethod::AutoDetectedFallback,
        ] {
            let display = format!("{method}");
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(format!("\"{display}\""), json);
        }
    }

    #[test]
    fn completed_task_flattens_record() {
        let mut book = TaskBook::default();
        book.insert_pending("job-1", TaskRecord::new("Water plants", Utc::now()));
        book.complete("job-1", CompletionMethod::Manual).unwrap();

        let json = serde_json::to_string(&book).unwrap();
        assert!(json.contains("\"task_name\":\"Water plants\""));
        assert!(json.contains("\"completion_method\":\"manual\""));
        assert!(!json.contains("\"record\""));
    }

    #[test]
    fn book_serde_missing_partitions_default() {
        let book: TaskBook = serde_json::from_str("{}").unwrap();
        assert!(book.pending.is_empty());
        assert!(book.completed.is_empty());
        assert!(book.overdue.is_empty());
    }

    #[test]
    fn book_serde_roundtrip() {
        let mut book = TaskBook::default();
        book.insert_pending("job-1", TaskRecord::new("Water plants", Utc::now()));
        book.insert_pending("job-2", TaskRecord::new("Pay rent", Utc::now()));
        book.complete("job-2", CompletionMethod::AutoDetected).unwrap();

        let json = serde_json::to_string(&book).unwrap();
        let parsed: TaskBook = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, book);
    }

    #[test]
    fn parse_rfc3339_timestamp() {
        let dt = parse_scheduled_time("2026-08-22T10:00:00Z").unwrap();
        assert_eq!(dt.to_rfc3339(), "2026-08-22T10:00:00+00:00");

        let with_offset = parse_scheduled_time("2026-08-22T10:00:00-05:00").unwrap();
        assert_eq!(with_offset.to_rfc3339(), "2026-08-22T15:00:00+00:00");
    }

    #[test]
    fn parse_naive_timestamp_as_utc() {
        let dt = parse_scheduled_time("2026-08-22T10:00:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2026-08-22T10:00:00+00:00");
    }

    #[test]
    fn parse_garbage_timestamp_errors() {
        assert!(parse_scheduled_time("tomorrow-ish").is_err());
        assert!(parse_scheduled_time("").is_err());
    }
}
