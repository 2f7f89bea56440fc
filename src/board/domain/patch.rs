//! Partial-update and creation payloads exchanged with workspace storage.

use super::{
    BoardColumn, BoardDomainError, ColumnId, Priority, SystemLevel, TaskComment, WorkspaceStatus,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Partial update of a task. Unset fields are left untouched by storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_id: Option<ColumnId>,
    /// New status; always sent together with `column_id` by the board.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ColumnId>,
    /// New rank within the column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    /// New urgency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Replacement assignee list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Vec<String>>,
    /// New due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Replacement tag list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Archive flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    /// Archive time, sent when archiving.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
    /// Archiving actor, sent when archiving.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_by: Option<String>,
    /// Replacement comment thread.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<TaskComment>>,
}

impl TaskPatch {
    /// Moves a task: sets column, mirrored status, and position together.
    #[must_use]
    pub fn placement(column_id: ColumnId, position: u32) -> Self {
        Self {
            status: Some(column_id.clone()),
            column_id: Some(column_id),
            position: Some(position),
            ..Self::default()
        }
    }

    /// Marks a task archived.
    #[must_use]
    pub fn archive(by: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            archived: Some(true),
            archived_at: Some(at),
            archived_by: Some(by.into()),
            ..Self::default()
        }
    }

    /// Returns a task from the archive.
    #[must_use]
    pub fn restore() -> Self {
        Self {
            archived: Some(false),
            ..Self::default()
        }
    }

    /// Replaces the comment thread.
    #[must_use]
    pub fn comments(comments: Vec<TaskComment>) -> Self {
        Self {
            comments: Some(comments),
            ..Self::default()
        }
    }

    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Partial update of a workspace. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspacePatch {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New lifecycle status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkspaceStatus>,
    /// New urgency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// New organisational scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_level: Option<SystemLevel>,
    /// Replacement tag list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// New due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// New completion percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    /// Replacement explicit column layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_columns: Option<Vec<BoardColumn>>,
    /// Replacement member list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Vec<String>>,
    /// Replacement related-company list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_companies: Option<Vec<String>>,
}

/// Fields for a task about to be created in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    title: String,
    description: Option<String>,
    column_id: ColumnId,
    position: u32,
    priority: Priority,
    assigned_to: Vec<String>,
    due_date: Option<DateTime<Utc>>,
    tags: Vec<String>,
    system_task: bool,
    automated_task: bool,
}

impl NewTask {
    /// Creates a backlog task with the given title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] if the title is blank.
    pub fn new(title: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = title.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyTaskTitle);
        }
        Ok(Self {
            title: trimmed.to_owned(),
            description: None,
            column_id: ColumnId::backlog(),
            position: 0,
            priority: Priority::default(),
            assigned_to: Vec::new(),
            due_date: None,
            tags: Vec::new(),
            system_task: false,
            automated_task: false,
        })
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Places the task in a column.
    #[must_use]
    pub fn in_column(mut self, column_id: impl Into<ColumnId>) -> Self {
        self.column_id = column_id.into();
        self
    }

    /// Sets the rank within the column.
    #[must_use]
    pub const fn at_position(mut self, position: u32) -> Self {
        self.position = position;
        self
    }

    /// Sets the urgency.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the assignees.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = String>) -> Self {
        self.assigned_to = assignees.into_iter().collect();
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Flags the task as originating from the platform or an automation.
    #[must_use]
    pub const fn flagged(mut self, system_task: bool, automated_task: bool) -> Self {
        self.system_task = system_task;
        self.automated_task = automated_task;
        self
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the target column.
    #[must_use]
    pub const fn column_id(&self) -> &ColumnId {
        &self.column_id
    }

    /// Returns the rank within the column.
    #[must_use]
    pub const fn position(&self) -> u32 {
        self.position
    }

    /// Returns the urgency.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the assignees.
    #[must_use]
    pub fn assigned_to(&self) -> &[String] {
        &self.assigned_to
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns whether the task originates from the platform.
    #[must_use]
    pub const fn system_task(&self) -> bool {
        self.system_task
    }

    /// Returns whether the task was created by an automation.
    #[must_use]
    pub const fn automated_task(&self) -> bool {
        self.automated_task
    }
}
