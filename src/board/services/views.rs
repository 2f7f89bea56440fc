//! List and calendar presentations of the filtered workspace collection.

use crate::board::domain::{Priority, SystemLevel, TaskId, Workspace, WorkspaceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// The active presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Kanban columns of the selected workspace.
    #[default]
    Board,
    /// Sortable workspace list.
    List,
    /// Due dates on a calendar.
    Calendar,
}

/// Field the list view sorts by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListSortKey {
    /// Title, ignoring case.
    Title,
    /// Priority rank: low < medium < high < urgent.
    Priority,
    /// Due date; workspaces without one always come last.
    DueDate,
    /// Last modification time.
    #[default]
    UpdatedAt,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    #[default]
    Descending,
}

impl SortDirection {
    const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// List view ordering. Defaults to most recently updated first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSort {
    /// Sort field.
    pub key: ListSortKey,
    /// Sort direction.
    pub direction: SortDirection,
}

impl ListSort {
    /// Creates an ordering.
    #[must_use]
    pub const fn new(key: ListSortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Compares two workspaces under this ordering.
    #[must_use]
    pub fn compare(self, left: &Workspace, right: &Workspace) -> Ordering {
        match self.key {
            ListSortKey::Title => self
                .direction
                .apply(left.title().to_lowercase().cmp(&right.title().to_lowercase())),
            ListSortKey::Priority => self
                .direction
                .apply(left.priority().rank().cmp(&right.priority().rank())),
            ListSortKey::DueDate => match (left.due_date(), right.due_date()) {
                (Some(a), Some(b)) => self.direction.apply(a.cmp(&b)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            ListSortKey::UpdatedAt => self
                .direction
                .apply(left.updated_at().cmp(&right.updated_at())),
        }
    }
}

/// Sorts workspaces for the list view. The sort is stable.
pub fn sort_workspaces(workspaces: &mut [&Workspace], sort: ListSort) {
    workspaces.sort_by(|left, right| sort.compare(left, right));
}

/// The calendar's own sub-filter, applied after the shared filter.
///
/// Statuses are matched against the workspace status for workspace events
/// and against the task status (its column) for task events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalendarFilter {
    /// Accepted system levels of the owning workspace.
    pub system_levels: BTreeSet<SystemLevel>,
    /// Accepted status names.
    pub statuses: BTreeSet<String>,
}

impl CalendarFilter {
    /// Adds an accepted system level.
    #[must_use]
    pub fn with_system_level(mut self, level: SystemLevel) -> Self {
        self.system_levels.insert(level);
        self
    }

    /// Adds an accepted status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.statuses.insert(status.into());
        self
    }

    /// Returns `true` when nothing is filtered out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.system_levels.is_empty() && self.statuses.is_empty()
    }

    fn accepts_level(&self, level: SystemLevel) -> bool {
        self.system_levels.is_empty() || self.system_levels.contains(&level)
    }

    fn accepts_status(&self, status: &str) -> bool {
        self.statuses.is_empty() || self.statuses.contains(status)
    }
}

/// What a calendar event marks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CalendarEventKind {
    /// The workspace's own due date.
    Workspace,
    /// A task's due date.
    Task {
        /// The task.
        task_id: TaskId,
    },
}

/// One due date on the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    /// Event source.
    pub kind: CalendarEventKind,
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Workspace or task title.
    pub title: String,
    /// Due date.
    pub date: DateTime<Utc>,
    /// Owning workspace's system level, for colour and icon lookup.
    pub system_level: SystemLevel,
    /// Workspace status or task status, depending on the kind.
    pub status: String,
    /// Workspace or task priority.
    pub priority: Priority,
}

/// Flattens workspace and task due dates into one chronological list.
///
/// Archived tasks and items without a due date produce no event. Events on
/// the same instant keep workspace order, each workspace's own event first.
#[must_use]
pub fn calendar_events(workspaces: &[&Workspace], filter: &CalendarFilter) -> Vec<CalendarEvent> {
    let mut events = Vec::new();
    for workspace in workspaces {
        let level = workspace.effective_system_level();
        if !filter.accepts_level(level) {
            continue;
        }
        if let Some(date) = workspace
            .due_date()
            .filter(|_| filter.accepts_status(workspace.status().as_str()))
        {
            events.push(CalendarEvent {
                kind: CalendarEventKind::Workspace,
                workspace_id: workspace.id().clone(),
                title: workspace.title().to_owned(),
                date,
                system_level: level,
                status: workspace.status().to_string(),
                priority: workspace.priority(),
            });
        }
        for task in workspace.active_tasks() {
            let Some(date) = task.due_date() else {
                continue;
            };
            if !filter.accepts_status(task.status().as_str()) {
                continue;
            }
            events.push(CalendarEvent {
                kind: CalendarEventKind::Task {
                    task_id: task.id().clone(),
                },
                workspace_id: workspace.id().clone(),
                title: task.title().to_owned(),
                date,
                system_level: level,
                status: task.status().to_string(),
                priority: task.priority(),
            });
        }
    }
    events.sort_by_key(|event| event.date);
    events
}
