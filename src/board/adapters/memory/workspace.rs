//! In-memory workspace façade.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::board::{
    domain::{
        NewTask, RawTimestamp, StoredComment, StoredTask, StoredWorkspace, TaskComment, TaskId,
        TaskPatch, WorkspaceId, WorkspacePatch,
    },
    ports::{FacadeError, FacadeResult, WorkspaceFacade},
};

/// A task update received by the in-memory façade, kept for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTaskUpdate {
    /// Workspace addressed by the update.
    pub workspace_id: WorkspaceId,
    /// Task addressed by the update.
    pub task_id: TaskId,
    /// Fields sent.
    pub patch: TaskPatch,
}

/// Thread-safe in-memory workspace store.
///
/// Writes can be made to fail on demand with
/// [`InMemoryWorkspaceFacade::fail_next_writes`], which lets tests exercise
/// the board's persistence-failure handling.
#[derive(Clone)]
pub struct InMemoryWorkspaceFacade {
    state: Arc<RwLock<InMemoryFacadeState>>,
    clock: Arc<dyn Clock + Send + Sync>,
}

#[derive(Debug, Default)]
struct InMemoryFacadeState {
    workspaces: Vec<StoredWorkspace>,
    task_updates: Vec<RecordedTaskUpdate>,
    pending_failures: usize,
}

impl InMemoryWorkspaceFacade {
    /// Creates an empty store using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    /// Creates an empty store stamping writes with `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryFacadeState::default())),
            clock,
        }
    }

    /// Inserts or replaces a workspace record.
    ///
    /// # Errors
    ///
    /// Returns [`FacadeError::Persistence`] if the store lock is poisoned.
    pub fn seed(&self, workspace: StoredWorkspace) -> FacadeResult<()> {
        let mut state = self.write()?;
        match state
            .workspaces
            .iter_mut()
            .find(|existing| existing.id == workspace.id)
        {
            Some(existing) => *existing = workspace,
            None => state.workspaces.push(workspace),
        }
        Ok(())
    }

    /// Makes the next `count` write operations fail with
    /// [`FacadeError::Rejected`].
    ///
    /// # Errors
    ///
    /// Returns [`FacadeError::Persistence`] if the store lock is poisoned.
    pub fn fail_next_writes(&self, count: usize) -> FacadeResult<()> {
        self.write()?.pending_failures = count;
        Ok(())
    }

    /// Returns every task update received so far, oldest first, including
    /// ones that were made to fail.
    ///
    /// # Errors
    ///
    /// Returns [`FacadeError::Persistence`] if the store lock is poisoned.
    pub fn task_updates(&self) -> FacadeResult<Vec<RecordedTaskUpdate>> {
        Ok(self.read()?.task_updates.clone())
    }

    fn read(&self) -> FacadeResult<RwLockReadGuard<'_, InMemoryFacadeState>> {
        self.state
            .read()
            .map_err(|err| FacadeError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> FacadeResult<RwLockWriteGuard<'_, InMemoryFacadeState>> {
        self.state
            .write()
            .map_err(|err| FacadeError::persistence(std::io::Error::other(err.to_string())))
    }
}

impl Default for InMemoryWorkspaceFacade {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InMemoryWorkspaceFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryWorkspaceFacade")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl InMemoryFacadeState {
    fn take_injected_failure(&mut self) -> FacadeResult<()> {
        if self.pending_failures == 0 {
            return Ok(());
        }
        self.pending_failures -= 1;
        Err(FacadeError::Rejected("injected write failure".to_owned()))
    }

    fn workspace_mut(&mut self, id: &WorkspaceId) -> FacadeResult<&mut StoredWorkspace> {
        self.workspaces
            .iter_mut()
            .find(|workspace| &workspace.id == id)
            .ok_or_else(|| FacadeError::WorkspaceNotFound(id.clone()))
    }
}

fn task_not_found(workspace_id: &WorkspaceId, task_id: &TaskId) -> FacadeError {
    FacadeError::TaskNotFound {
        workspace_id: workspace_id.clone(),
        task_id: task_id.clone(),
    }
}

fn stored_comment(comment: &TaskComment) -> StoredComment {
    StoredComment {
        id: Some(comment.id().to_string()),
        author: comment.author().to_owned(),
        content: comment.content().to_owned(),
        created_at: Some(RawTimestamp::Native(comment.created_at())),
    }
}

fn apply_task_patch(task: &mut StoredTask, patch: TaskPatch, now: DateTime<Utc>) {
    if let Some(title) = patch.title {
        task.title = title;
    }
    if let Some(description) = patch.description {
        task.description = Some(description);
    }
    if let Some(column_id) = patch.column_id {
        task.column_id = Some(column_id.to_string());
    }
    if let Some(status) = patch.status {
        task.status = Some(status.to_string());
    }
    if let Some(position) = patch.position {
        task.position = Some(position);
    }
    if let Some(priority) = patch.priority {
        task.priority = Some(priority);
    }
    if let Some(assigned_to) = patch.assigned_to {
        task.assigned_to = assigned_to;
    }
    if let Some(due_date) = patch.due_date {
        task.due_date = Some(RawTimestamp::Native(due_date));
    }
    if let Some(tags) = patch.tags {
        task.tags = tags;
    }
    if let Some(archived) = patch.archived {
        task.archived = archived;
        if !archived {
            task.archived_at = None;
            task.archived_by = None;
        }
    }
    if let Some(archived_at) = patch.archived_at {
        task.archived_at = Some(RawTimestamp::Native(archived_at));
    }
    if let Some(archived_by) = patch.archived_by {
        task.archived_by = Some(archived_by);
    }
    if let Some(comments) = patch.comments {
        task.comments = comments.iter().map(stored_comment).collect();
    }
    task.updated_at = Some(RawTimestamp::Native(now));
}

fn apply_workspace_patch(
    workspace: &mut StoredWorkspace,
    patch: WorkspacePatch,
    now: DateTime<Utc>,
) {
    if let Some(title) = patch.title {
        workspace.title = title;
    }
    if let Some(description) = patch.description {
        workspace.description = Some(description);
    }
    if let Some(status) = patch.status {
        workspace.status = Some(status);
    }
    if let Some(priority) = patch.priority {
        workspace.priority = Some(priority);
    }
    if let Some(system_level) = patch.system_level {
        workspace.system_level = Some(system_level);
    }
    if let Some(tags) = patch.tags {
        workspace.tags = tags;
    }
    if let Some(due_date) = patch.due_date {
        workspace.due_date = Some(RawTimestamp::Native(due_date));
    }
    if let Some(progress) = patch.progress {
        workspace.progress = Some(u32::from(progress));
    }
    if let Some(board_columns) = patch.board_columns {
        workspace.board_columns = board_columns;
    }
    if let Some(assigned_to) = patch.assigned_to {
        workspace.assigned_to = assigned_to;
    }
    if let Some(related_companies) = patch.related_companies {
        workspace.related_companies = related_companies;
    }
    workspace.updated_at = Some(RawTimestamp::Native(now));
}

fn stored_task_from_new(task: &NewTask, now: DateTime<Utc>) -> StoredTask {
    let column = task.column_id().to_string();
    StoredTask {
        id: TaskId::new(format!("task_{}", Uuid::new_v4().simple())),
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        status: Some(column.clone()),
        column_id: Some(column),
        position: Some(task.position()),
        priority: Some(task.priority()),
        assigned_to: task.assigned_to().to_vec(),
        due_date: task.due_date().map(RawTimestamp::Native),
        tags: task.tags().to_vec(),
        system_task: task.system_task(),
        automated_task: task.automated_task(),
        created_at: Some(RawTimestamp::Native(now)),
        updated_at: Some(RawTimestamp::Native(now)),
        ..StoredTask::default()
    }
}

#[async_trait]
impl WorkspaceFacade for InMemoryWorkspaceFacade {
    async fn list_workspaces(&self) -> FacadeResult<Vec<StoredWorkspace>> {
        Ok(self.read()?.workspaces.clone())
    }

    async fn get_workspace(&self, id: &WorkspaceId) -> FacadeResult<Option<StoredWorkspace>> {
        let state = self.read()?;
        Ok(state
            .workspaces
            .iter()
            .find(|workspace| &workspace.id == id)
            .cloned())
    }

    async fn update_workspace(&self, id: &WorkspaceId, patch: WorkspacePatch) -> FacadeResult<()> {
        let now = self.clock.utc();
        let mut state = self.write()?;
        state.take_injected_failure()?;
        let workspace = state.workspace_mut(id)?;
        apply_workspace_patch(workspace, patch, now);
        Ok(())
    }

    async fn delete_workspace(&self, id: &WorkspaceId) -> FacadeResult<()> {
        let mut state = self.write()?;
        state.take_injected_failure()?;
        let index = state
            .workspaces
            .iter()
            .position(|workspace| &workspace.id == id)
            .ok_or_else(|| FacadeError::WorkspaceNotFound(id.clone()))?;
        state.workspaces.remove(index);
        Ok(())
    }

    async fn create_task(
        &self,
        workspace_id: &WorkspaceId,
        task: NewTask,
    ) -> FacadeResult<StoredTask> {
        let now = self.clock.utc();
        let mut state = self.write()?;
        state.take_injected_failure()?;
        let workspace = state.workspace_mut(workspace_id)?;
        let stored = stored_task_from_new(&task, now);
        workspace.tasks.push(stored.clone());
        workspace.updated_at = Some(RawTimestamp::Native(now));
        Ok(stored)
    }

    async fn update_task(
        &self,
        workspace_id: &WorkspaceId,
        task_id: &TaskId,
        patch: TaskPatch,
    ) -> FacadeResult<()> {
        let now = self.clock.utc();
        let mut state = self.write()?;
        state.task_updates.push(RecordedTaskUpdate {
            workspace_id: workspace_id.clone(),
            task_id: task_id.clone(),
            patch: patch.clone(),
        });
        state.take_injected_failure()?;
        let workspace = state.workspace_mut(workspace_id)?;
        let task = workspace
            .tasks
            .iter_mut()
            .find(|task| &task.id == task_id)
            .ok_or_else(|| task_not_found(workspace_id, task_id))?;
        apply_task_patch(task, patch, now);
        Ok(())
    }

    async fn delete_task(&self, workspace_id: &WorkspaceId, task_id: &TaskId) -> FacadeResult<()> {
        let mut state = self.write()?;
        state.take_injected_failure()?;
        let workspace = state.workspace_mut(workspace_id)?;
        let index = workspace
            .tasks
            .iter()
            .position(|task| &task.id == task_id)
            .ok_or_else(|| task_not_found(workspace_id, task_id))?;
        workspace.tasks.remove(index);
        Ok(())
    }
}
