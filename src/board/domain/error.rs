//! Error types for board domain validation and parsing.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing or mutating board domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// A task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// A comment body is empty after trimming.
    #[error("comment on task {0} must not be empty")]
    EmptyComment(TaskId),

    /// The task is already archived.
    #[error("task {0} is already archived")]
    AlreadyArchived(TaskId),

    /// The task is not archived, so it cannot be restored.
    #[error("task {0} is not archived")]
    NotArchived(TaskId),
}
