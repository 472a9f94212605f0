//! Tracker service — ties the matcher, resolver, and store together.
//!
//! One method per command. Every mutating method follows the same shape:
//! load state, apply one logical operation, save, render the outcome.
//! Loads recover from absent or unreadable documents by starting from empty
//! state; save errors always propagate.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::activity::ActivityLog;
use crate::config::TrackerConfig;
use crate::detect::matcher::CompletionMatcher;
use crate::detect::resolver::{Resolution, resolve};
use crate::error::Error;
use crate::store::traits::StateStore;
use crate::tasks::model::{CompletionMethod, TaskBook, TaskRecord};
use crate::tasks::summary::compose_daily_summary;

/// Outcome of a completion attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum CompleteOutcome {
    /// The task moved to completed.
    Completed { task_name: String },
    /// The job id was not in the pending partition. Recoverable: nothing
    /// was mutated.
    NotFound,
}

impl CompleteOutcome {
    /// Render the user-facing result line.
    pub fn render(&self) -> String {
        match self {
            Self::Completed { task_name } => format!("✅ Completed: {}", task_name),
            Self::NotFound => "❌ Task not found in pending list".to_string(),
        }
    }
}

/// Outcome of checking a message for completion phrases.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    /// The message contained no completion phrase.
    NoMatch,
    /// A phrase matched but nothing could be completed.
    NothingToMark,
    /// One outcome per completed task.
    Completed(Vec<CompleteOutcome>),
}

impl CheckOutcome {
    /// Render the user-facing result lines.
    pub fn render_lines(&self) -> Vec<String> {
        match self {
            Self::NoMatch => vec!["No completion detected".to_string()],
            Self::NothingToMark => {
                vec!["🔍 Completion detected but no recent tasks to mark".to_string()]
            }
            Self::Completed(outcomes) => outcomes.iter().map(CompleteOutcome::render).collect(),
        }
    }
}

/// Store-backed tracker implementing the command surface.
pub struct Tracker {
    store: Arc<dyn StateStore>,
    matcher: CompletionMatcher,
    config: TrackerConfig,
}

impl Tracker {
    /// Create a tracker over the given store and config.
    pub fn new(store: Arc<dyn StateStore>, config: TrackerConfig) -> Self {
        Self {
            store,
            matcher: CompletionMatcher::new(),
            config,
        }
    }

    /// Start tracking a task. Overwrites any pending record with the same id.
    pub async fn mark_pending(
        &self,
        job_id: &str,
        task_name: &str,
        scheduled_time: DateTime<Utc>,
    ) -> Result<String, Error> {
        let mut book = self.load_tasks_or_default().await;
        book.insert_pending(job_id, TaskRecord::new(task_name, scheduled_time));
        self.store.save_tasks(&book).await?;

        info!(job_id = %job_id, task_name = %task_name, "Tracking new task");
        Ok(format!("📋 Tracking task: {}", task_name))
    }

    /// Explicitly complete a pending task.
    pub async fn mark_completed(&self, job_id: &str) -> Result<CompleteOutcome, Error> {
        let mut book = self.load_tasks_or_default().await;
        match book.complete(job_id, CompletionMethod::Manual) {
            Some(completed) => {
                self.store.save_tasks(&book).await?;
                info!(job_id = %job_id, method = %CompletionMethod::Manual, "Task completed");
                Ok(CompleteOutcome::Completed {
                    task_name: completed.record.task_name,
                })
            }
            None => Ok(CompleteOutcome::NotFound),
        }
    }

    /// Check a message for completion phrases and complete whatever it
    /// resolves to.
    ///
    /// `explicit_ids` replaces the stored recent-activity view as the
    /// candidate set when given; otherwise candidates come from activity
    /// within the configured query window.
    pub async fn check_message(
        &self,
        message_text: &str,
        explicit_ids: Option<&[String]>,
    ) -> Result<CheckOutcome, Error> {
        let mut book = self.load_tasks_or_default().await;

        let candidates = match explicit_ids {
            Some(ids) => ids.to_vec(),
            None => {
                let log = self.load_activity_or_default().await;
                log.recent_ids(self.config.recent_window_hours)
            }
        };

        match resolve(&self.matcher, message_text, &candidates, &book) {
            Resolution::NoMatch => Ok(CheckOutcome::NoMatch),
            Resolution::NothingToMark => Ok(CheckOutcome::NothingToMark),
            Resolution::Complete { job_ids, method } => {
                let mut outcomes = Vec::new();
                for job_id in &job_ids {
                    if let Some(completed) = book.complete(job_id, method) {
                        info!(job_id = %job_id, method = %method, "Task completed");
                        outcomes.push(CompleteOutcome::Completed {
                            task_name: completed.record.task_name,
                        });
                    }
                }
                self.store.save_tasks(&book).await?;
                Ok(CheckOutcome::Completed(outcomes))
            }
        }
    }

    /// Compose the daily summary, escalating follow-ups for overdue tasks.
    pub async fn daily_summary(&self) -> Result<String, Error> {
        let mut book = self.load_tasks_or_default().await;
        let had_overdue = !book.overdue_tasks(self.config.overdue_hours).is_empty();

        let summary = compose_daily_summary(&mut book, self.config.overdue_hours);

        // Follow-up counters only move when something was overdue
        if had_overdue {
            self.store.save_tasks(&book).await?;
        }
        Ok(summary)
    }

    /// All pending tasks, keyed by job id.
    pub async fn list_pending(&self) -> Result<BTreeMap<String, TaskRecord>, Error> {
        let book = self.load_tasks_or_default().await;
        Ok(book.pending)
    }

    /// Record that a job just executed.
    pub async fn register_job(&self, job_id: &str) -> Result<String, Error> {
        let mut log = self.load_activity_or_default().await;
        log.record(job_id, self.config.retention_hours);
        self.store.save_activity(&log).await?;

        info!(job_id = %job_id, "Registered recent job");
        Ok(format!("📋 Added job {} to recent tracking", job_id))
    }

    /// Job ids seen within the retention window.
    pub async fn recent_jobs(&self) -> Result<Vec<String>, Error> {
        let log = self.load_activity_or_default().await;
        Ok(log.recent_ids(self.config.retention_hours))
    }

    async fn load_tasks_or_default(&self) -> TaskBook {
        match self.store.load_tasks().await {
            Ok(Some(book)) => book,
            Ok(None) => {
                debug!("No task state yet, starting empty");
                TaskBook::default()
            }
            Err(e) => {
                warn!(error = %e, "Could not read task state, starting from empty");
                TaskBook::default()
            }
        }
    }

    async fn load_activity_or_default(&self) -> ActivityLog {
        match self.store.load_activity().await {
            Ok(Some(log)) => log,
            Ok(None) => {
                debug!("No activity log yet, starting empty");
                ActivityLog::default()
            }
            Err(e) => {
                warn!(error = %e, "Could not read activity log, starting from empty");
                ActivityLog::default()
            }
        }
    }
}
