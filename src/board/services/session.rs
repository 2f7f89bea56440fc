//! Board session: application state wired to the workspace façade.

use super::{
    drag::{DragKind, DragOutcome, DragReorderController, DragStart, DropResult, PersistReport},
    projection::{BoardProjection, BoardProjector},
    state::{AppAction, AppState},
    stats::WorkspaceStats,
    views::CalendarEvent,
};
use crate::board::{
    config::{BoardConfig, ReconcilePolicy},
    domain::{
        BoardDomainError, NewTask, Task, TaskComment, TaskId, TaskPatch, Workspace, WorkspaceId,
        WorkspacePatch,
    },
    ports::{FacadeError, WorkspaceFacade},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for board session operations.
#[derive(Debug, Error)]
pub enum BoardSessionError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// The façade rejected or failed the call.
    #[error(transparent)]
    Facade(#[from] FacadeError),
    /// The workspace is not loaded in the session.
    #[error("workspace {0} is not loaded")]
    WorkspaceNotFound(WorkspaceId),
    /// The task is not part of the loaded workspace.
    #[error("task {task_id} is not in workspace {workspace_id}")]
    TaskNotFound {
        /// Workspace searched.
        workspace_id: WorkspaceId,
        /// Missing task.
        task_id: TaskId,
    },
}

/// Result type for board session operations.
pub type BoardSessionResult<T> = Result<T, BoardSessionError>;

/// How a persisted task move was reconciled with local state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    /// Storage accepted the move.
    Confirmed,
    /// Storage rejected the move and the optimistic state was kept.
    Kept,
    /// Storage rejected the move and the task went back to its previous
    /// placement.
    RolledBack,
    /// Storage rejected the move and the workspace was re-fetched.
    Refreshed,
    /// Storage rejected the move but the task had changed since, so nothing
    /// was undone.
    Skipped,
}

/// One admin's view of the task board.
///
/// The session owns the application state and applies every change to it
/// synchronously. Calls to the façade are the only suspension points.
pub struct BoardSession<F, C>
where
    F: WorkspaceFacade,
    C: Clock + Send + Sync,
{
    facade: Arc<F>,
    clock: Arc<C>,
    config: BoardConfig,
    projector: BoardProjector,
    controller: DragReorderController,
    state: AppState,
}

impl<F, C> BoardSession<F, C>
where
    F: WorkspaceFacade,
    C: Clock + Send + Sync,
{
    /// Creates a session with an empty state.
    #[must_use]
    pub fn new(facade: Arc<F>, clock: Arc<C>, config: BoardConfig) -> Self {
        let projector = BoardProjector::new(config.fallback_column.clone());
        Self {
            facade,
            clock,
            config,
            controller: DragReorderController::new(projector.clone()),
            projector,
            state: AppState::new(),
        }
    }

    /// Returns the application state.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Returns the session configuration.
    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Returns the drag controller.
    #[must_use]
    pub const fn controller(&self) -> &DragReorderController {
        &self.controller
    }

    /// Returns a handle to the façade, for sending pending updates without
    /// borrowing the session.
    #[must_use]
    pub fn facade(&self) -> Arc<F> {
        Arc::clone(&self.facade)
    }

    /// Applies a state action.
    pub fn dispatch(&mut self, action: AppAction) {
        self.state.apply(action);
    }

    /// Loads every workspace from storage, replacing local state.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Facade`] when the listing fails.
    pub async fn load(&mut self) -> BoardSessionResult<()> {
        let stored = self.facade.list_workspaces().await?;
        let workspaces: Vec<Workspace> = stored
            .into_iter()
            .map(|workspace| Workspace::from_stored(workspace, &*self.clock))
            .collect();
        tracing::info!(count = workspaces.len(), "workspaces loaded");
        self.state.apply(AppAction::SetWorkspaces(workspaces));
        Ok(())
    }

    /// Re-fetches one workspace and replaces the local copy. A workspace no
    /// longer in storage is dropped locally.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Facade`] when the lookup fails.
    pub async fn refresh_workspace(&mut self, id: &WorkspaceId) -> BoardSessionResult<()> {
        match self.facade.get_workspace(id).await? {
            Some(stored) => {
                let workspace = Workspace::from_stored(stored, &*self.clock);
                self.state.apply(AppAction::ReplaceWorkspace(workspace));
            }
            None => {
                tracing::debug!(workspace_id = %id, "workspace gone from storage");
                self.state.apply(AppAction::RemoveWorkspace(id.clone()));
            }
        }
        Ok(())
    }

    /// Returns the board of the selected workspace.
    #[must_use]
    pub fn projection(&self) -> Option<BoardProjection> {
        self.state
            .selected()
            .map(|workspace| self.projector.project(workspace))
    }

    /// Returns the visible workspaces in list-view order.
    #[must_use]
    pub fn list(&self) -> Vec<&Workspace> {
        self.state.list()
    }

    /// Returns the calendar events of the visible workspaces.
    #[must_use]
    pub fn calendar(&self) -> Vec<CalendarEvent> {
        self.state.calendar()
    }

    /// Returns task counts of a loaded workspace as of now.
    #[must_use]
    pub fn stats(&self, id: &WorkspaceId) -> Option<WorkspaceStats> {
        self.state
            .workspace(id)
            .map(|workspace| WorkspaceStats::of(workspace, self.clock.utc()))
    }

    /// Records the start of a drag gesture.
    pub fn drag_start(&mut self, start: DragStart) {
        self.controller.begin(start);
    }

    /// Ends a drag gesture.
    ///
    /// Task drops act on the selected workspace's board and are applied
    /// locally before this returns. A [`DragOutcome::Committed`] carries the
    /// update to send; [`BoardSession::settle`] reconciles its result.
    pub fn drag_end(&mut self, drop: &DropResult) -> DragOutcome {
        match drop.kind {
            DragKind::Workspace => {
                let outcome = self.controller.end_workspace(drop);
                if let DragOutcome::WorkspaceReordered { from, to } = outcome {
                    self.state.apply(AppAction::ReorderWorkspaces { from, to });
                }
                outcome
            }
            DragKind::Task => {
                let selected = self.state.selected_id().cloned();
                let Some(workspace) = selected.and_then(|id| self.state.workspace_mut(&id))
                else {
                    self.controller.cancel();
                    tracing::debug!("task dropped with no workspace selected");
                    return DragOutcome::NotFound;
                };
                self.controller.end_task(drop, workspace, &*self.clock)
            }
        }
    }

    /// Reconciles local state with the result of a sent task update.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Facade`] when the refresh required by
    /// [`ReconcilePolicy::Refresh`] fails.
    pub async fn settle(&mut self, report: PersistReport) -> BoardSessionResult<SettleOutcome> {
        if report.is_success() {
            return Ok(SettleOutcome::Confirmed);
        }
        let update = report.update();
        match self.config.reconcile_policy {
            ReconcilePolicy::KeepLocal => Ok(SettleOutcome::Kept),
            ReconcilePolicy::Refresh => {
                self.refresh_workspace(update.workspace_id()).await?;
                Ok(SettleOutcome::Refreshed)
            }
            ReconcilePolicy::Rollback => {
                let task = self
                    .state
                    .workspace_mut(update.workspace_id())
                    .and_then(|workspace| workspace.task_mut(update.task_id()))
                    .filter(|task| &task.placement() == update.applied());
                let Some(unchanged) = task else {
                    tracing::debug!(
                        workspace_id = %update.workspace_id(),
                        task_id = %update.task_id(),
                        "task moved again; rollback skipped"
                    );
                    return Ok(SettleOutcome::Skipped);
                };
                unchanged.restore_placement(update.previous().clone(), &*self.clock);
                Ok(SettleOutcome::RolledBack)
            }
        }
    }

    /// Ends a drag gesture, persists any resulting move, and settles it.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Facade`] when reconciliation needs a
    /// refresh and it fails.
    pub async fn commit_drag(
        &mut self,
        drop: &DropResult,
    ) -> BoardSessionResult<(DragOutcome, Option<SettleOutcome>)> {
        let outcome = self.drag_end(drop);
        let DragOutcome::Committed(pending) = outcome.clone() else {
            return Ok((outcome, None));
        };
        let report = pending.send(self.facade.as_ref()).await;
        let settled = self.settle(report).await?;
        Ok((outcome, Some(settled)))
    }

    /// Creates a task in storage, then refreshes its workspace.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Facade`] when creation or the refresh
    /// fails.
    pub async fn create_task(
        &mut self,
        workspace_id: &WorkspaceId,
        task: NewTask,
    ) -> BoardSessionResult<Task> {
        let stored = self.facade.create_task(workspace_id, task).await?;
        let created = Task::from_stored(stored, &*self.clock);
        tracing::info!(workspace_id = %workspace_id, task_id = %created.id(), "task created");
        self.refresh_workspace(workspace_id).await?;
        Ok(created)
    }

    /// Deletes a task in storage, then refreshes its workspace.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Facade`] when deletion or the refresh
    /// fails.
    pub async fn delete_task(
        &mut self,
        workspace_id: &WorkspaceId,
        task_id: &TaskId,
    ) -> BoardSessionResult<()> {
        self.facade.delete_task(workspace_id, task_id).await?;
        tracing::info!(workspace_id = %workspace_id, task_id = %task_id, "task deleted");
        self.refresh_workspace(workspace_id).await
    }

    /// Archives a task, removing it from the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Domain`] if the task is already archived,
    /// a not-found error if it is not loaded, or
    /// [`BoardSessionError::Facade`] if storage rejects the change; local
    /// state is untouched on error.
    pub async fn archive_task(
        &mut self,
        workspace_id: &WorkspaceId,
        task_id: &TaskId,
        archived_by: &str,
    ) -> BoardSessionResult<()> {
        let mut task = self.task_snapshot(workspace_id, task_id)?;
        task.archive(archived_by, &*self.clock)?;
        let archived_at = task.archived_at().unwrap_or_else(|| self.clock.utc());
        let patch = TaskPatch::archive(archived_by, archived_at);
        self.persist_task(workspace_id, task, patch).await
    }

    /// Returns an archived task to the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Domain`] if the task is not archived, a
    /// not-found error if it is not loaded, or [`BoardSessionError::Facade`]
    /// if storage rejects the change.
    pub async fn restore_task(
        &mut self,
        workspace_id: &WorkspaceId,
        task_id: &TaskId,
    ) -> BoardSessionResult<()> {
        let mut task = self.task_snapshot(workspace_id, task_id)?;
        task.restore(&*self.clock)?;
        self.persist_task(workspace_id, task, TaskPatch::restore()).await
    }

    /// Appends a comment to a task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Domain`] for a blank comment, a not-found
    /// error if the task is not loaded, or [`BoardSessionError::Facade`] if
    /// storage rejects the change.
    pub async fn add_comment(
        &mut self,
        workspace_id: &WorkspaceId,
        task_id: &TaskId,
        author: &str,
        content: &str,
    ) -> BoardSessionResult<TaskComment> {
        let mut task = self.task_snapshot(workspace_id, task_id)?;
        let comment = task.add_comment(author, content, &*self.clock)?.clone();
        let patch = TaskPatch::comments(task.comments().to_vec());
        self.persist_task(workspace_id, task, patch).await?;
        Ok(comment)
    }

    /// Updates workspace fields in storage, then refreshes the workspace.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Facade`] when the update or the refresh
    /// fails.
    pub async fn update_workspace(
        &mut self,
        workspace_id: &WorkspaceId,
        patch: WorkspacePatch,
    ) -> BoardSessionResult<()> {
        self.facade.update_workspace(workspace_id, patch).await?;
        self.refresh_workspace(workspace_id).await
    }

    /// Deletes a workspace in storage and drops it locally.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Facade`] when deletion fails.
    pub async fn delete_workspace(&mut self, workspace_id: &WorkspaceId) -> BoardSessionResult<()> {
        self.facade.delete_workspace(workspace_id).await?;
        tracing::info!(workspace_id = %workspace_id, "workspace deleted");
        self.state.apply(AppAction::RemoveWorkspace(workspace_id.clone()));
        Ok(())
    }

    fn task_snapshot(
        &self,
        workspace_id: &WorkspaceId,
        task_id: &TaskId,
    ) -> BoardSessionResult<Task> {
        let workspace = self
            .state
            .workspace(workspace_id)
            .ok_or_else(|| BoardSessionError::WorkspaceNotFound(workspace_id.clone()))?;
        workspace
            .task(task_id)
            .cloned()
            .ok_or_else(|| BoardSessionError::TaskNotFound {
                workspace_id: workspace_id.clone(),
                task_id: task_id.clone(),
            })
    }

    async fn persist_task(
        &mut self,
        workspace_id: &WorkspaceId,
        task: Task,
        patch: TaskPatch,
    ) -> BoardSessionResult<()> {
        self.facade.update_task(workspace_id, task.id(), patch).await?;
        if let Some(slot) = self
            .state
            .workspace_mut(workspace_id)
            .and_then(|workspace| workspace.task_mut(task.id()))
        {
            *slot = task;
        }
        Ok(())
    }
}
