//! Daily summary composition.

use crate::tasks::follow_up::follow_up_message;
use crate::tasks::model::TaskBook;

/// Compose the daily pending-task summary.
///
/// Overdue tasks (scheduled more than `overdue_hours` ago) are rendered
/// through the follow-up generator, escalating each one's counter; the
/// remaining pending tasks are listed as plain bullets. Ends with a
/// call-to-action line, or collapses to a single "nothing pending" message
/// when the book has no pending tasks. The caller persists the book.
pub fn compose_daily_summary(book: &mut TaskBook, overdue_hours: i64) -> String {
    if book.pending.is_empty() {
        return "✅ No tienes tareas pendientes".to_string();
    }

    let overdue = book.overdue_tasks(overdue_hours);
    let mut lines = Vec::new();

    if !overdue.is_empty() {
        lines.push("❗ **Tareas Vencidas:**".to_string());
        for job_id in overdue.keys() {
            if let Some(message) = follow_up_message(book, job_id) {
                lines.push(format!("  • {}", message));
            }
        }
    }

    let current: Vec<String> = book
        .pending
        .iter()
        .filter(|(id, _)| !overdue.contains_key(id.as_str()))
        .map(|(_, record)| record.task_name.clone())
        .collect();
    if !current.is_empty() {
        lines.push("\n📋 **Tareas Pendientes:**".to_string());
        for task_name in current {
            lines.push(format!("  • {}", task_name));
        }
    }

    lines.push("\nResponde 'listo [tarea]' para marcar como completada".to_string());

    lines.join("\n")
}
