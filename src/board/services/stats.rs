//! Task counts shown alongside a workspace.

use crate::board::domain::{ColumnId, Workspace};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Column whose tasks count as completed.
const DONE_COLUMN: &str = "done";

/// Summary of a workspace's non-archived tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceStats {
    /// Non-archived tasks.
    pub active: usize,
    /// Non-archived tasks in the done column.
    pub completed: usize,
    /// Non-archived, unfinished tasks due before `now`.
    pub overdue: usize,
    /// Share of active tasks completed, rounded down; 0 for an empty board.
    pub completion_percent: u8,
}

impl WorkspaceStats {
    /// Computes the summary as of `now`.
    #[must_use]
    pub fn of(workspace: &Workspace, now: DateTime<Utc>) -> Self {
        let done = ColumnId::new(DONE_COLUMN);
        let mut stats = Self::default();
        for task in workspace.active_tasks() {
            stats.active += 1;
            if task.status() == &done {
                stats.completed += 1;
            } else if task.due_date().is_some_and(|due| due < now) {
                stats.overdue += 1;
            }
        }
        let percent = stats
            .completed
            .saturating_mul(100)
            .checked_div(stats.active)
            .unwrap_or(0);
        stats.completion_percent = u8::try_from(percent).unwrap_or(u8::MAX);
        stats
    }
}
