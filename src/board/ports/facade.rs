//! Mutation façade over workspace and task storage.
//!
//! Every call is asynchronous and may fail independently. Retry and timeout
//! policy belong to the implementation, not to the board.

use crate::board::domain::{
    NewTask, StoredTask, StoredWorkspace, TaskId, TaskPatch, WorkspaceId, WorkspacePatch,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for façade operations.
pub type FacadeResult<T> = Result<T, FacadeError>;

/// Storage boundary for admin workspaces and their tasks.
#[async_trait]
pub trait WorkspaceFacade: Send + Sync {
    /// Lists every workspace visible to the acting admin.
    async fn list_workspaces(&self) -> FacadeResult<Vec<StoredWorkspace>>;

    /// Fetches one workspace with its tasks.
    ///
    /// Returns `None` when the workspace does not exist.
    async fn get_workspace(&self, id: &WorkspaceId) -> FacadeResult<Option<StoredWorkspace>>;

    /// Applies a partial update to a workspace.
    ///
    /// # Errors
    ///
    /// Returns [`FacadeError::WorkspaceNotFound`] when the workspace does not
    /// exist.
    async fn update_workspace(&self, id: &WorkspaceId, patch: WorkspacePatch) -> FacadeResult<()>;

    /// Deletes a workspace.
    ///
    /// # Errors
    ///
    /// Returns [`FacadeError::WorkspaceNotFound`] when the workspace does not
    /// exist.
    async fn delete_workspace(&self, id: &WorkspaceId) -> FacadeResult<()>;

    /// Creates a task, returning the stored record with its assigned
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns [`FacadeError::WorkspaceNotFound`] when the workspace does not
    /// exist.
    async fn create_task(
        &self,
        workspace_id: &WorkspaceId,
        task: NewTask,
    ) -> FacadeResult<StoredTask>;

    /// Applies a partial update to a task.
    ///
    /// # Errors
    ///
    /// Returns [`FacadeError::TaskNotFound`] when the task does not exist.
    async fn update_task(
        &self,
        workspace_id: &WorkspaceId,
        task_id: &TaskId,
        patch: TaskPatch,
    ) -> FacadeResult<()>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`FacadeError::TaskNotFound`] when the task does not exist.
    async fn delete_task(&self, workspace_id: &WorkspaceId, task_id: &TaskId) -> FacadeResult<()>;
}

/// Errors returned by façade implementations.
#[derive(Debug, Clone, Error)]
pub enum FacadeError {
    /// The workspace was not found.
    #[error("workspace not found: {0}")]
    WorkspaceNotFound(WorkspaceId),

    /// The task was not found in the workspace.
    #[error("task {task_id} not found in workspace {workspace_id}")]
    TaskNotFound {
        /// Workspace that was searched.
        workspace_id: WorkspaceId,
        /// Task that was missing.
        task_id: TaskId,
    },

    /// Storage refused the request.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl FacadeError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
