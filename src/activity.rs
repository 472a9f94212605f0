//! Recent-activity log — which jobs executed lately.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Rolling log of job executions: job id → epoch seconds last seen.
///
/// Serializes as a bare JSON object, so the on-disk file is just
/// `{"job-id": 1780000000, ...}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityLog {
    jobs: BTreeMap<String, i64>,
}

impl ActivityLog {
    /// Record that a job executed now, pruning entries older than
    /// `retention_hours` in the same pass.
    pub fn record(&mut self, job_id: impl Into<String>, retention_hours: i64) {
        let now = Utc::now();
        self.jobs.insert(job_id.into(), now.timestamp());
        self.prune(retention_hours, now);
    }

    /// Drop entries older than `retention_hours` before `now`.
    fn prune(&mut self, retention_hours: i64, now: DateTime<Utc>) {
        let cutoff = (now - Duration::hours(retention_hours)).timestamp();
        self.jobs.retain(|_, seen| *seen > cutoff);
    }

    /// Job ids seen strictly within the last `window_hours`.
    pub fn recent_ids(&self, window_hours: i64) -> Vec<String> {
        let cutoff = (Utc::now() - Duration::hours(window_hours)).timestamp();
        self.jobs
            .iter()
            .filter(|(_, seen)| **seen > cutoff)
            .map(|(id, _)| id.clone())
            .collect()
    }

}
