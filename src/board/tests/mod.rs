//! Unit tests for the task board.

use crate::board::{
    domain::{
        NewTask, StoredTask, StoredWorkspace, TaskId, TaskPatch, Workspace, WorkspaceId,
        WorkspacePatch,
    },
    ports::{FacadeResult, WorkspaceFacade},
};
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;


/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// 2024-03-01T12:00:00Z, later than every timestamp in the fixtures.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .expect("valid fixed instant")
}

#[fixture]
pub fn clock() -> FixedClock {
    FixedClock(now())
}

/// Builds a task stored in `column` at `position`.
pub fn stored_task(id: &str, column: &str, position: u32) -> StoredTask {
    StoredTask::new(id, format!("Task {id}"))
        .with_column(column)
        .with_status(column)
        .with_position(position)
}

/// Normalizes a stored workspace with the fixed clock.
pub fn workspace(stored: StoredWorkspace) -> Workspace {
    Workspace::from_stored(stored, &FixedClock(now()))
}

mockall::mock! {
    pub Facade {}

    #[async_trait]
    impl WorkspaceFacade for Facade {
        async fn list_workspaces(&self) -> FacadeResult<Vec<StoredWorkspace>>;
        async fn get_workspace(&self, id: &WorkspaceId) -> FacadeResult<Option<StoredWorkspace>>;
        async fn update_workspace(
            &self,
            id: &WorkspaceId,
            patch: WorkspacePatch,
        ) -> FacadeResult<()>;
        async fn delete_workspace(&self, id: &WorkspaceId) -> FacadeResult<()>;
        async fn create_task(
            &self,
            workspace_id: &WorkspaceId,
            task: NewTask,
        ) -> FacadeResult<StoredTask>;
        async fn update_task(
            &self,
            workspace_id: &WorkspaceId,
            task_id: &TaskId,
            patch: TaskPatch,
        ) -> FacadeResult<()>;
        async fn delete_task(&self, workspace_id: &WorkspaceId, task_id: &TaskId) -> FacadeResult<()>;
    }
}
