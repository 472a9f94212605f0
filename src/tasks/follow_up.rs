//! Escalating follow-up tiers for pending tasks.

use tracing::debug;

use crate::tasks::model::TaskBook;

/// Escalation level of a follow-up reminder, derived from how many
/// follow-ups a task has already received.
///
/// Escalates linearly: Reminder → StillPending → Escalated → Urgent.
/// Urgent is terminal — the per-task counter keeps growing but the
/// phrasing stops escalating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUpTier {
    Reminder,
    StillPending,
    Escalated,
    Urgent,
}

impl FollowUpTier {
    /// Tier for a task that has received `count` follow-ups so far.
    pub fn from_count(count: u32) -> Self {
        match count {
            0 => Self::Reminder,
            1 => Self::StillPending,
            2 => Self::Escalated,
            _ => Self::Urgent,
        }
    }

    /// Message prefix for this tier.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Reminder => "🔔 Recordatorio",
            Self::StillPending => "🔄 Pendiente",
            Self::Escalated => "⚠️ Aún pendiente",
            Self::Urgent => "❗ PENDIENTE",
        }
    }
}

impl std::fmt::Display for FollowUpTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Reminder => "reminder",
            Self::StillPending => "still_pending",
            Self::Escalated => "escalated",
            Self::Urgent => "urgent",
        };
        write!(f, "{s}")
    }
}

/// Render the follow-up message for a pending task and bump its counter.
///
/// The tier is taken from the count before the bump, so the first call for a
/// task produces the Reminder tier. Not idempotent: each call escalates the
/// next message by one step. Returns `None` when the job id is not pending.
/// The caller persists the book.
pub fn follow_up_message(book: &mut TaskBook, job_id: &str) -> Option<String> {
    let record = book.pending.get_mut(job_id)?;
    let tier = FollowUpTier::from_count(record.follow_up_count);
    let message = format!("{}: {}", tier.prefix(), record.task_name);
    record.follow_up_count += 1;
    debug!(job_id = %job_id, tier = %tier, "Generated follow-up");
    Some(message)
}
