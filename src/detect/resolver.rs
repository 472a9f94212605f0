//! Completion resolution — which pending tasks a matched message closes.

use tracing::debug;

use crate::detect::matcher::CompletionMatcher;
use crate::tasks::model::{CompletionMethod, TaskBook};

/// Outcome of resolving a message against the pending set.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// No completion phrase in the message.
    NoMatch,
    /// A phrase matched but nothing could be completed.
    NothingToMark,
    /// Complete these job ids with the given method.
    Complete {
        job_ids: Vec<String>,
        method: CompletionMethod,
    },
}

/// Decide which pending tasks a message completes.
///
/// Candidates that are actually pending complete as auto-detected; ids
/// without a pending record are dropped. When there are no candidates at
/// all, the newest pending task (latest `created_at`, ties to the greatest
/// job id) completes as the fallback — a best-effort guess when no activity
/// signal exists, not a guarantee the message referred to it.
///
/// Pure decision: the caller applies the completions and persists the book.
pub fn resolve(
    matcher: &CompletionMatcher,
    message_text: &str,
    candidates: &[String],
    book: &TaskBook,
) -> Resolution {
    let Some(pattern) = matcher.first_match(message_text) else {
        return Resolution::NoMatch;
    };
    debug!(
        pattern = %pattern,
        candidates = candidates.len(),
        pending = book.pending.len(),
        "Completion phrase detected"
    );

    if !candidates.is_empty() {
        let job_ids: Vec<String> = candidates
            .iter()
            .filter(|id| book.pending.contains_key(id.as_str()))
            .cloned()
            .collect();
        if job_ids.is_empty() {
            return Resolution::NothingToMark;
        }
        return Resolution::Complete {
            job_ids,
            method: CompletionMethod::AutoDetected,
        };
    }

    match book.latest_pending() {
        Some(job_id) => Resolution::Complete {
            job_ids: vec![job_id.to_string()],
            method: CompletionMethod::AutoDetectedFallback,
        },
        None => Resolution::NothingToMark,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::model::TaskRecord;
    use chrono::{Duration, Utc};

    fn book_with(names: &[(&str, i64)]) -> TaskBook {
        // (job_id, created_at hours ago)
        let now = Utc::now();
        let mut book = TaskBook::default();
        for (job_id, hours_ago) in names {
            let at = now - Duration::hours(*hours_ago);
            book.insert_pending(
                *job_id,
                TaskRecord {
                    task_name: format!("Task {job_id}"),
                    scheduled_time: at,
                    created_at: at,
                    follow_up_count: 0,
                },
            );
        }
        book
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unrelated_message_resolves_no_match() {
        let matcher = CompletionMatcher::new();
        let book = book_with(&[("job-1", 1)]);
        let resolution = resolve(&matcher, "no tiene nada que ver", &ids(&["job-1"]), &book);
        assert_eq!(resolution, Resolution::NoMatch);
    }

    #[test]
    fn recent_candidate_completes_auto_detected() {
        let matcher = CompletionMatcher::new();
        let book = book_with(&[("job-5", 1)]);
        let resolution = resolve(&matcher, "listo", &ids(&["job-5"]), &book);
        assert_eq!(
            resolution,
            Resolution::Complete {
                job_ids: vec!["job-5".to_string()],
                method: CompletionMethod::AutoDetected,
            }
        );
    }

    #[test]
    fn multiple_candidates_all_complete() {
        let matcher = CompletionMatcher::new();
        let book = book_with(&[("job-1", 2), ("job-2", 1)]);
        let resolution = resolve(&matcher, "done", &ids(&["job-1", "job-2"]), &book);
        match resolution {
            Resolution::Complete { job_ids, method } => {
                assert_eq!(job_ids, vec!["job-1".to_string(), "job-2".to_string()]);
                assert_eq!(method, CompletionMethod::AutoDetected);
            }
            other => panic!("Expected Complete, got {:?}", other),
        }
    }

    #[test]
    fn candidates_filtered_to_pending() {
        let matcher = CompletionMatcher::new();
        let book = book_with(&[("job-1", 1)]);
        let resolution = resolve(&matcher, "done", &ids(&["ghost", "job-1"]), &book);
        match resolution {
            Resolution::Complete { job_ids, .. } => {
                assert_eq!(job_ids, vec!["job-1".to_string()]);
            }
            other => panic!("Expected Complete, got {:?}", other),
        }
    }

    #[test]
    fn unknown_candidates_resolve_nothing_to_mark() {
        // Candidates are present but none pending: no fallback guess
        let matcher = CompletionMatcher::new();
        let book = book_with(&[("job-1", 1)]);
        let resolution = resolve(&matcher, "done", &ids(&["ghost"]), &book);
        assert_eq!(resolution, Resolution::NothingToMark);
    }

    #[test]
    fn no_candidates_falls_back_to_newest() {
        let matcher = CompletionMatcher::new();
        let book = book_with(&[("job-a", 5), ("job-b", 1)]);
        let resolution = resolve(&matcher, "listo", &[], &book);
        assert_eq!(
            resolution,
            Resolution::Complete {
                job_ids: vec!["job-b".to_string()],
                method: CompletionMethod::AutoDetectedFallback,
            }
        );
    }

    #[test]
    fn fallback_ties_break_to_greatest_job_id() {
        let now = Utc::now();
        let matcher = CompletionMatcher::new();
        let mut book = TaskBook::default();
        for job_id in ["job-a", "job-b"] {
            book.insert_pending(
                job_id,
                TaskRecord {
                    task_name: job_id.to_string(),
                    scheduled_time: now,
                    created_at: now,
                    follow_up_count: 0,
                },
            );
        }
        let resolution = resolve(&matcher, "listo", &[], &book);
        match resolution {
            Resolution::Complete { job_ids, .. } => {
                assert_eq!(job_ids, vec!["job-b".to_string()]);
            }
            other => panic!("Expected Complete, got {:?}", other),
        }
    }

    #[test]
    fn empty_book_resolves_nothing_to_mark() {
        let matcher = CompletionMatcher::new();
        let book = TaskBook::default();
        assert_eq!(resolve(&matcher, "listo", &[], &book), Resolution::NothingToMark);
    }
}
