//! Board projection: a workspace's tasks partitioned into ordered columns.

use crate::board::domain::{
    BoardColumn, ColumnId, ColumnLayout, ColumnSource, Task, TaskId, Workspace, resolve_column,
};

/// One column of a projected board with its tasks in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedColumn {
    column: BoardColumn,
    tasks: Vec<Task>,
}

impl ProjectedColumn {
    /// Returns the column definition.
    #[must_use]
    pub const fn column(&self) -> &BoardColumn {
        &self.column
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> &ColumnId {
        self.column.id()
    }

    /// Returns the tasks ordered by ascending position.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}

/// The column-to-tasks view of one workspace, in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardProjection {
    source: ColumnSource,
    columns: Vec<ProjectedColumn>,
}

impl BoardProjection {
    /// Returns where the column set came from.
    #[must_use]
    pub const fn source(&self) -> ColumnSource {
        self.source
    }

    /// Returns the projected columns in board order.
    #[must_use]
    pub fn columns(&self) -> &[ProjectedColumn] {
        &self.columns
    }

    /// Finds a projected column.
    #[must_use]
    pub fn column(&self, id: &str) -> Option<&ProjectedColumn> {
        self.columns
            .iter()
            .find(|projected| projected.id().as_str() == id)
    }

    /// Returns the ordered tasks of a column; empty for unknown columns.
    #[must_use]
    pub fn tasks_in(&self, id: &str) -> &[Task] {
        self.column(id)
            .map(ProjectedColumn::tasks)
            .unwrap_or_default()
    }

    /// Locates a task within a column, returning its index and the task.
    #[must_use]
    pub fn find_task(&self, column_id: &str, task_id: &TaskId) -> Option<(usize, &Task)> {
        self.tasks_in(column_id)
            .iter()
            .enumerate()
            .find(|(_, task)| task.id() == task_id)
    }

    /// Returns the number of tasks placed on the board.
    #[must_use]
    pub fn total_tasks(&self) -> usize {
        self.columns.iter().map(|projected| projected.tasks.len()).sum()
    }
}

/// Projects workspaces onto board columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardProjector {
    fallback_column: ColumnId,
}

impl Default for BoardProjector {
    fn default() -> Self {
        Self::new(ColumnId::backlog())
    }
}

impl BoardProjector {
    /// Creates a projector sending unmatched tasks of default-template boards
    /// to `fallback_column`.
    #[must_use]
    pub const fn new(fallback_column: ColumnId) -> Self {
        Self { fallback_column }
    }

    /// Projects a workspace.
    ///
    /// Archived tasks are left out. Every other task is placed in exactly one
    /// column according to [`resolve_column`], except on explicit layouts,
    /// where a task matching no column is left off the board. Tasks within a
    /// column are ordered by ascending position, ties keeping storage order.
    #[must_use]
    pub fn project(&self, workspace: &Workspace) -> BoardProjection {
        let layout = ColumnLayout::for_columns(workspace.board_columns());
        let source = layout.source();
        let mut buckets: Vec<Vec<Task>> = vec![Vec::new(); layout.columns().len()];

        for task in workspace.active_tasks() {
            let slot = resolve_column(&layout, task, &self.fallback_column).and_then(|column| {
                layout
                    .columns()
                    .iter()
                    .position(|candidate| candidate.id() == column.id())
            });
            match slot.and_then(|index| buckets.get_mut(index)) {
                Some(bucket) => bucket.push(task.clone()),
                None => tracing::debug!(
                    workspace_id = %workspace.id(),
                    task_id = %task.id(),
                    column_id = %task.column_id(),
                    "task matches no board column"
                ),
            }
        }

        let columns = layout
            .into_columns()
            .into_iter()
            .zip(buckets)
            .map(|(column, mut tasks)| {
                tasks.sort_by_key(Task::position);
                ProjectedColumn { column, tasks }
            })
            .collect();

        BoardProjection { source, columns }
    }
}

/// Projects a workspace with the default backlog fallback.
#[must_use]
pub fn project(workspace: &Workspace) -> BoardProjection {
    BoardProjector::default().project(workspace)
}
