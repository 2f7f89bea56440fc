//! Workspace aggregate.

use super::{
    BoardColumn, Priority, StoredWorkspace, SystemLevel, Task, TaskId, WorkspaceId,
    WorkspaceStatus, normalize_optional, normalize_required,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use std::collections::BTreeSet;

/// Upper bound of the completion percentage.
const MAX_PROGRESS: u32 = 100;

/// An admin workspace: a project container holding tasks and an optional
/// explicit column layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    id: WorkspaceId,
    title: String,
    description: String,
    status: WorkspaceStatus,
    priority: Priority,
    system_level: Option<SystemLevel>,
    tags: BTreeSet<String>,
    due_date: Option<DateTime<Utc>>,
    progress: u8,
    tasks: Vec<Task>,
    board_columns: Vec<BoardColumn>,
    assigned_to: Vec<String>,
    related_companies: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Workspace {
    /// Normalizes a stored workspace and every task it holds.
    #[must_use]
    pub fn from_stored(stored: StoredWorkspace, clock: &impl Clock) -> Self {
        let progress = stored.progress.unwrap_or(0).min(MAX_PROGRESS);
        let tasks = stored
            .tasks
            .into_iter()
            .map(|task| Task::from_stored(task, clock))
            .collect();

        Self {
            id: stored.id,
            title: stored.title,
            description: stored.description.unwrap_or_default(),
            status: stored.status.unwrap_or_default(),
            priority: stored.priority.unwrap_or_default(),
            system_level: stored.system_level,
            tags: stored.tags.into_iter().collect(),
            due_date: normalize_optional(stored.due_date.as_ref()),
            progress: u8::try_from(progress).unwrap_or(u8::MAX),
            tasks,
            board_columns: stored.board_columns,
            assigned_to: stored.assigned_to,
            related_companies: stored.related_companies,
            created_at: normalize_required(stored.created_at.as_ref(), clock),
            updated_at: normalize_required(stored.updated_at.as_ref(), clock),
        }
    }

    /// Returns the workspace identifier.
    #[must_use]
    pub const fn id(&self) -> &WorkspaceId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description; empty when none was stored.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> WorkspaceStatus {
        self.status
    }

    /// Returns the urgency.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the stored system level, if any.
    #[must_use]
    pub const fn system_level(&self) -> Option<SystemLevel> {
        self.system_level
    }

    /// Returns the system level, treating an unset level as platform.
    #[must_use]
    pub fn effective_system_level(&self) -> SystemLevel {
        self.system_level.unwrap_or_default()
    }

    /// Returns the tags.
    #[must_use]
    pub const fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the stored completion percentage (0–100).
    #[must_use]
    pub const fn progress(&self) -> u8 {
        self.progress
    }

    /// Returns every task, archived ones included, in storage order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the non-archived tasks in storage order.
    pub fn active_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|task| !task.is_archived())
    }

    /// Returns the archived tasks in storage order.
    pub fn archived_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|task| task.is_archived())
    }

    /// Finds a task by identifier.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Finds a task by identifier for mutation.
    pub fn task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id() == id)
    }

    /// Appends a task.
    pub fn push_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Removes a task, returning it if it was present.
    pub fn remove_task(&mut self, id: &TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id() == id)?;
        Some(self.tasks.remove(index))
    }

    /// Returns the explicit column layout; empty when the default template
    /// applies.
    #[must_use]
    pub fn board_columns(&self) -> &[BoardColumn] {
        &self.board_columns
    }

    /// Returns the member identifiers.
    #[must_use]
    pub fn assigned_to(&self) -> &[String] {
        &self.assigned_to
    }

    /// Returns the related company identifiers.
    #[must_use]
    pub fn related_companies(&self) -> &[String] {
        &self.related_companies
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
