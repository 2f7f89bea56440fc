//! Drag-and-drop interpretation for the board.
//!
//! A drop moves the task optimistically in the in-memory workspace before
//! anything is sent to storage. The returned [`PendingTaskUpdate`] carries
//! the matching storage update; callers send it whenever convenient and may
//! start further drags while it is in flight.

use super::projection::BoardProjector;
use crate::board::{
    domain::{ColumnId, TaskId, TaskPatch, TaskPlacement, Workspace, WorkspaceId},
    ports::{FacadeError, FacadeResult, WorkspaceFacade},
};
use mockable::Clock;

/// What is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// A task card between or within board columns.
    Task,
    /// A workspace within the workspace list.
    Workspace,
}

/// A drop zone and an index inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragLocation {
    /// Identifier of the drop zone: a column id for tasks.
    pub droppable_id: String,
    /// Index within the drop zone's list.
    pub index: usize,
}

impl DragLocation {
    /// Creates a location.
    #[must_use]
    pub fn new(droppable_id: impl Into<String>, index: usize) -> Self {
        Self {
            droppable_id: droppable_id.into(),
            index,
        }
    }
}

/// The start of a drag gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragStart {
    /// Identifier of the dragged item.
    pub draggable_id: String,
    /// What is being dragged.
    pub kind: DragKind,
    /// Where the drag began.
    pub source: DragLocation,
}

/// The end of a drag gesture as reported by the drag-and-drop layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropResult {
    /// Identifier of the dragged item.
    pub draggable_id: String,
    /// What was dragged.
    pub kind: DragKind,
    /// Where the drag began.
    pub source: DragLocation,
    /// Where the item was dropped; `None` when dropped outside any zone.
    pub destination: Option<DragLocation>,
}

impl DropResult {
    /// A task dropped at `destination`.
    #[must_use]
    pub fn task(
        task_id: impl Into<String>,
        source: DragLocation,
        destination: DragLocation,
    ) -> Self {
        Self {
            draggable_id: task_id.into(),
            kind: DragKind::Task,
            source,
            destination: Some(destination),
        }
    }

    /// A workspace moved within the workspace list.
    #[must_use]
    pub fn workspace(workspace_id: impl Into<String>, from: usize, to: usize) -> Self {
        Self {
            draggable_id: workspace_id.into(),
            kind: DragKind::Workspace,
            source: DragLocation::new("workspaces", from),
            destination: Some(DragLocation::new("workspaces", to)),
        }
    }

    /// A gesture released outside every drop zone.
    #[must_use]
    pub fn outside(draggable_id: impl Into<String>, kind: DragKind, source: DragLocation) -> Self {
        Self {
            draggable_id: draggable_id.into(),
            kind,
            source,
            destination: None,
        }
    }
}

/// Controller state across one gesture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A gesture has started and not yet ended.
    Dragging(DragStart),
}

/// A task move applied locally and not yet confirmed by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTaskUpdate {
    workspace_id: WorkspaceId,
    task_id: TaskId,
    patch: TaskPatch,
    previous: TaskPlacement,
    applied: TaskPlacement,
}

impl PendingTaskUpdate {
    /// Returns the workspace holding the task.
    #[must_use]
    pub const fn workspace_id(&self) -> &WorkspaceId {
        &self.workspace_id
    }

    /// Returns the moved task.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the fields to persist: column, status, and position.
    #[must_use]
    pub const fn patch(&self) -> &TaskPatch {
        &self.patch
    }

    /// Returns the placement before the move.
    #[must_use]
    pub const fn previous(&self) -> &TaskPlacement {
        &self.previous
    }

    /// Returns the placement applied locally.
    #[must_use]
    pub const fn applied(&self) -> &TaskPlacement {
        &self.applied
    }

    /// Sends the update to storage.
    ///
    /// Never fails: a rejection is logged and captured in the report.
    pub async fn send<F>(self, facade: &F) -> PersistReport
    where
        F: WorkspaceFacade + ?Sized,
    {
        let result = facade
            .update_task(&self.workspace_id, &self.task_id, self.patch.clone())
            .await;
        if let Err(err) = &result {
            tracing::warn!(
                workspace_id = %self.workspace_id,
                task_id = %self.task_id,
                error = %err,
                "persisting task move failed"
            );
        }
        PersistReport {
            update: self,
            result,
        }
    }
}

/// Outcome of sending a [`PendingTaskUpdate`].
#[derive(Debug, Clone)]
pub struct PersistReport {
    update: PendingTaskUpdate,
    result: FacadeResult<()>,
}

impl PersistReport {
    /// Returns the update that was sent.
    #[must_use]
    pub const fn update(&self) -> &PendingTaskUpdate {
        &self.update
    }

    /// Returns the storage error, if the update was rejected.
    #[must_use]
    pub const fn error(&self) -> Option<&FacadeError> {
        match &self.result {
            Ok(()) => None,
            Err(err) => Some(err),
        }
    }

    /// Returns `true` when storage accepted the update.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// What a finished gesture amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// Released outside every drop zone; nothing changed.
    DroppedOutside,
    /// The dragged task or a named column was not on the current board; the
    /// gesture was ignored.
    NotFound,
    /// A workspace was moved within the local workspace list. Nothing is
    /// persisted for this.
    WorkspaceReordered {
        /// Index the workspace was dragged from.
        from: usize,
        /// Index it was dropped at.
        to: usize,
    },
    /// A task was moved locally and must be persisted.
    Committed(PendingTaskUpdate),
}

/// Interprets drag gestures into task moves.
#[derive(Debug, Clone, Default)]
pub struct DragReorderController {
    state: DragState,
    projector: BoardProjector,
}

impl DragReorderController {
    /// Creates an idle controller projecting boards with `projector`.
    #[must_use]
    pub const fn new(projector: BoardProjector) -> Self {
        Self {
            state: DragState::Idle,
            projector,
        }
    }

    /// Returns the gesture state.
    #[must_use]
    pub const fn state(&self) -> &DragState {
        &self.state
    }

    /// Records the start of a gesture. Has no other effect.
    pub fn begin(&mut self, start: DragStart) {
        self.state = DragState::Dragging(start);
    }

    /// Abandons the current gesture without interpreting it.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Ends a task gesture on `workspace`'s board.
    ///
    /// The task is looked up in the projected source column. When found, its
    /// column, status, and position are updated in `workspace` immediately
    /// and the matching storage update is returned. The destination index is
    /// the task's new position. Dropping a task back on its own slot keeps
    /// its stored position so the board order cannot change.
    pub fn end_task(
        &mut self,
        drop: &DropResult,
        workspace: &mut Workspace,
        clock: &impl Clock,
    ) -> DragOutcome {
        self.state = DragState::Idle;
        let Some(destination) = drop.destination.as_ref() else {
            return DragOutcome::DroppedOutside;
        };
        let task_id = TaskId::new(drop.draggable_id.as_str());

        let projection = self.projector.project(workspace);
        let Some((source_index, task)) =
            projection.find_task(&drop.source.droppable_id, &task_id)
        else {
            tracing::debug!(
                workspace_id = %workspace.id(),
                task_id = %task_id,
                column_id = %drop.source.droppable_id,
                "dragged task not in source column"
            );
            return DragOutcome::NotFound;
        };
        let Some(target_column) = projection.column(&destination.droppable_id) else {
            tracing::debug!(
                workspace_id = %workspace.id(),
                column_id = %destination.droppable_id,
                "drop column not on board"
            );
            return DragOutcome::NotFound;
        };

        let same_slot = drop.source.droppable_id == destination.droppable_id
            && source_index == destination.index;
        let position = if same_slot {
            task.position()
        } else {
            u32::try_from(destination.index).unwrap_or(u32::MAX)
        };
        let column_id: ColumnId = target_column.id().clone();
        let previous = task.placement();

        let Some(target) = workspace.task_mut(&task_id) else {
            return DragOutcome::NotFound;
        };
        target.move_to(column_id.clone(), position, clock);
        let applied = target.placement();

        tracing::info!(
            workspace_id = %workspace.id(),
            task_id = %task_id,
            column_id = %column_id,
            position,
            "task moved"
        );
        DragOutcome::Committed(PendingTaskUpdate {
            workspace_id: workspace.id().clone(),
            task_id,
            patch: TaskPatch::placement(column_id, position),
            previous,
            applied,
        })
    }

    /// Ends a workspace-list gesture. Only reports the move; reordering the
    /// list is up to the caller.
    pub fn end_workspace(&mut self, drop: &DropResult) -> DragOutcome {
        self.state = DragState::Idle;
        drop.destination
            .as_ref()
            .map_or(DragOutcome::DroppedOutside, |destination| {
                DragOutcome::WorkspaceReordered {
                    from: drop.source.index,
                    to: destination.index,
                }
            })
    }
}

/// Moves the item at `from` so that it ends up at index `to`.
///
/// Returns `false`, leaving `items` untouched, when either index is out of
/// range.
pub fn reorder<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}
