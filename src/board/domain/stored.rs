//! Ingress shapes for records read from workspace storage.
//!
//! Stored records keep every field that may be missing or loosely typed as
//! optional so a document written by an older client still deserializes.
//! They are converted to canonical aggregates with
//! [`Task::from_stored`](super::Task::from_stored) and
//! [`Workspace::from_stored`](super::Workspace::from_stored).

use super::{
    BoardColumn, Priority, RawTimestamp, SystemLevel, TaskId, WorkspaceId, WorkspaceStatus,
};
use serde::{Deserialize, Serialize};

/// A comment as persisted on a task document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredComment {
    /// Comment identifier, if storage kept one.
    #[serde(default)]
    pub id: Option<String>,
    /// Author identifier.
    #[serde(default)]
    pub author: String,
    /// Comment body.
    #[serde(default)]
    pub content: String,
    /// Creation time in any accepted timestamp shape.
    #[serde(default)]
    pub created_at: Option<RawTimestamp>,
}

/// A task as persisted under a workspace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTask {
    /// Storage-assigned identifier.
    #[serde(alias = "taskId")]
    pub id: TaskId,
    /// Task title.
    #[serde(default)]
    pub title: String,
    /// Optional long-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Stored status, which should mirror `column_id`.
    #[serde(default)]
    pub status: Option<String>,
    /// Identifier of the containing column.
    #[serde(default)]
    pub column_id: Option<String>,
    /// Rank within the column.
    #[serde(default)]
    pub position: Option<u32>,
    /// Urgency; medium when absent.
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Assignee identifiers in display order.
    #[serde(default, alias = "assignees")]
    pub assigned_to: Vec<String>,
    /// Optional due date.
    #[serde(default)]
    pub due_date: Option<RawTimestamp>,
    /// Free-text labels.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether the task has been moved to the archive.
    #[serde(default)]
    pub archived: bool,
    /// When the task was archived.
    #[serde(default)]
    pub archived_at: Option<RawTimestamp>,
    /// Who archived the task.
    #[serde(default)]
    pub archived_by: Option<String>,
    /// Task originated from the platform itself.
    #[serde(default)]
    pub system_task: bool,
    /// Task was created by an automation.
    #[serde(default)]
    pub automated_task: bool,
    /// Append-only comment thread.
    #[serde(default)]
    pub comments: Vec<StoredComment>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<RawTimestamp>,
    /// Last modification time.
    #[serde(default)]
    pub updated_at: Option<RawTimestamp>,
}

impl StoredTask {
    /// Creates a stored task with only an identifier and title.
    #[must_use]
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the stored column identifier.
    #[must_use]
    pub fn with_column(mut self, column_id: impl Into<String>) -> Self {
        self.column_id = Some(column_id.into());
        self
    }

    /// Sets the stored status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the stored position.
    #[must_use]
    pub const fn with_position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<RawTimestamp>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Marks the task as archived.
    #[must_use]
    pub const fn archived(mut self) -> Self {
        self.archived = true;
        self
    }
}

/// A workspace document as persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredWorkspace {
    /// Storage-assigned identifier.
    #[serde(alias = "workspaceId")]
    pub id: WorkspaceId,
    /// Workspace title.
    #[serde(default, alias = "name")]
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Lifecycle status; active when absent.
    #[serde(default)]
    pub status: Option<WorkspaceStatus>,
    /// Urgency; medium when absent.
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Organisational scope; treated as platform when absent.
    #[serde(default)]
    pub system_level: Option<SystemLevel>,
    /// Free-text labels.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Optional due date.
    #[serde(default)]
    pub due_date: Option<RawTimestamp>,
    /// Completion percentage; values above 100 are clamped.
    #[serde(default)]
    pub progress: Option<u32>,
    /// Every task of the workspace, archived ones included.
    #[serde(default)]
    pub tasks: Vec<StoredTask>,
    /// Explicit column layout, empty when the default template applies.
    #[serde(default)]
    pub board_columns: Vec<BoardColumn>,
    /// Member identifiers.
    #[serde(default, alias = "members")]
    pub assigned_to: Vec<String>,
    /// Identifiers of related customer companies.
    #[serde(default)]
    pub related_companies: Vec<String>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<RawTimestamp>,
    /// Last modification time.
    #[serde(default)]
    pub updated_at: Option<RawTimestamp>,
}

impl StoredWorkspace {
    /// Creates a stored workspace with only an identifier and title.
    #[must_use]
    pub fn new(id: impl Into<WorkspaceId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Replaces the stored task list.
    #[must_use]
    pub fn with_tasks(mut self, tasks: impl IntoIterator<Item = StoredTask>) -> Self {
        self.tasks = tasks.into_iter().collect();
        self
    }

    /// Replaces the explicit column layout.
    #[must_use]
    pub fn with_columns(mut self, columns: impl IntoIterator<Item = BoardColumn>) -> Self {
        self.board_columns = columns.into_iter().collect();
        self
    }
}
