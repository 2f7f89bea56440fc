//! Task aggregate and its comment thread.

use super::{
    BoardDomainError, ColumnId, CommentId, Priority, StoredComment, StoredTask, TaskId,
    normalize_optional, normalize_required,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A comment appended to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskComment {
    id: CommentId,
    author: String,
    content: String,
    created_at: DateTime<Utc>,
}

impl TaskComment {
    fn from_stored(stored: StoredComment, clock: &impl Clock) -> Self {
        Self {
            id: stored.id.map_or_else(CommentId::generate, CommentId::from),
            created_at: normalize_required(stored.created_at.as_ref(), clock),
            author: stored.author,
            content: stored.content,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> &CommentId {
        &self.id
    }

    /// Returns the author identifier.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the comment body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when the comment was written.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Where a task sits on the board: its column, mirrored status, and rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPlacement {
    /// Containing column.
    pub column_id: ColumnId,
    /// Status as stored; mirrors `column_id` after any board move.
    pub status: ColumnId,
    /// Rank within the column.
    pub position: u32,
}

/// Task aggregate in canonical form.
///
/// Every date-bearing field is a [`DateTime<Utc>`]; loosely shaped storage
/// values are normalized by [`Task::from_stored`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    status: ColumnId,
    column_id: ColumnId,
    position: u32,
    priority: Priority,
    assigned_to: Vec<String>,
    due_date: Option<DateTime<Utc>>,
    tags: BTreeSet<String>,
    archived: bool,
    archived_at: Option<DateTime<Utc>>,
    archived_by: Option<String>,
    system_task: bool,
    automated_task: bool,
    comments: Vec<TaskComment>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Normalizes a stored task.
    ///
    /// The column is taken from the stored column id, then the stored
    /// status, then the backlog. A missing status mirrors the column.
    /// Missing or unrecognizable creation and update times become the
    /// clock's current time; an unrecognizable due date is dropped.
    #[must_use]
    pub fn from_stored(stored: StoredTask, clock: &impl Clock) -> Self {
        let status = non_blank(stored.status);
        let column_id = non_blank(stored.column_id)
            .or_else(|| status.clone())
            .map_or_else(ColumnId::backlog, ColumnId::from);
        let comments = stored
            .comments
            .into_iter()
            .map(|comment| TaskComment::from_stored(comment, clock))
            .collect();

        Self {
            id: stored.id,
            title: stored.title,
            description: stored.description,
            status: status.map_or_else(|| column_id.clone(), ColumnId::from),
            column_id,
            position: stored.position.unwrap_or(0),
            priority: stored.priority.unwrap_or_default(),
            assigned_to: stored.assigned_to,
            due_date: normalize_optional(stored.due_date.as_ref()),
            tags: stored.tags.into_iter().collect(),
            archived: stored.archived,
            archived_at: normalize_optional(stored.archived_at.as_ref()),
            archived_by: stored.archived_by,
            system_task: stored.system_task,
            automated_task: stored.automated_task,
            comments,
            created_at: normalize_required(stored.created_at.as_ref(), clock),
            updated_at: normalize_required(stored.updated_at.as_ref(), clock),
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> &ColumnId {
        &self.status
    }

    /// Returns the containing column.
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

    /// Returns the assignees in display order.
    #[must_use]
    pub fn assigned_to(&self) -> &[String] {
        &self.assigned_to
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the tags.
    #[must_use]
    pub const fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Returns whether the task is archived.
    #[must_use]
    pub const fn is_archived(&self) -> bool {
        self.archived
    }

    /// Returns when the task was archived.
    #[must_use]
    pub const fn archived_at(&self) -> Option<DateTime<Utc>> {
        self.archived_at
    }

    /// Returns who archived the task.
    #[must_use]
    pub fn archived_by(&self) -> Option<&str> {
        self.archived_by.as_deref()
    }

    /// Returns whether the task originates from the platform.
    #[must_use]
    pub const fn is_system_task(&self) -> bool {
        self.system_task
    }

    /// Returns whether the task was created by an automation.
    #[must_use]
    pub const fn is_automated_task(&self) -> bool {
        self.automated_task
    }

    /// Returns the comment thread, oldest first.
    #[must_use]
    pub fn comments(&self) -> &[TaskComment] {
        &self.comments
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

    /// Returns the current placement.
    #[must_use]
    pub fn placement(&self) -> TaskPlacement {
        TaskPlacement {
            column_id: self.column_id.clone(),
            status: self.status.clone(),
            position: self.position,
        }
    }

    /// Moves the task to `position` within `column_id`.
    ///
    /// Column and status are always set together.
    pub fn move_to(&mut self, column_id: ColumnId, position: u32, clock: &impl Clock) {
        self.status = column_id.clone();
        self.column_id = column_id;
        self.position = position;
        self.touch(clock);
    }

    /// Puts back a placement captured earlier with [`Task::placement`].
    pub fn restore_placement(&mut self, placement: TaskPlacement, clock: &impl Clock) {
        self.column_id = placement.column_id;
        self.status = placement.status;
        self.position = placement.position;
        self.touch(clock);
    }

    /// Moves the task to the archive.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::AlreadyArchived`] if the task is already
    /// archived.
    pub fn archive(
        &mut self,
        archived_by: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), BoardDomainError> {
        if self.archived {
            return Err(BoardDomainError::AlreadyArchived(self.id.clone()));
        }
        let now = clock.utc();
        self.archived = true;
        self.archived_at = Some(now);
        self.archived_by = Some(archived_by.into());
        self.updated_at = now;
        Ok(())
    }

    /// Returns the task from the archive to the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::NotArchived`] if the task is not archived.
    pub fn restore(&mut self, clock: &impl Clock) -> Result<(), BoardDomainError> {
        if !self.archived {
            return Err(BoardDomainError::NotArchived(self.id.clone()));
        }
        self.archived = false;
        self.archived_at = None;
        self.archived_by = None;
        self.touch(clock);
        Ok(())
    }

    /// Appends a comment.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyComment`] if the body is blank.
    pub fn add_comment(
        &mut self,
        author: impl Into<String>,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<&TaskComment, BoardDomainError> {
        let body = content.into();
        if body.trim().is_empty() {
            return Err(BoardDomainError::EmptyComment(self.id.clone()));
        }
        let now = clock.utc();
        self.comments.push(TaskComment {
            id: CommentId::generate(),
            author: author.into(),
            content: body,
            created_at: now,
        });
        self.updated_at = now;
        self.comments
            .last()
            .ok_or_else(|| BoardDomainError::EmptyComment(self.id.clone()))
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
