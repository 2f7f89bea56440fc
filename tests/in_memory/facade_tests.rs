//! Storage operations of the in-memory workspace façade.

use super::helpers::facade;
use rstest::rstest;
use taskboard::board::{
    adapters::memory::InMemoryWorkspaceFacade,
    domain::{ColumnId, NewTask, Priority, TaskId, TaskPatch, WorkspaceId, WorkspacePatch},
    ports::{FacadeError, WorkspaceFacade},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lists_seeded_workspaces_in_order(
    facade: Result<InMemoryWorkspaceFacade, eyre::Report>,
) -> Result<(), eyre::Report> {
    let store = facade?;

    let listed = store.list_workspaces().await?;

    let ids: Vec<&str> = listed.iter().map(|workspace| workspace.id.as_str()).collect();
    eyre::ensure!(ids == ["ws-launch", "ws-billing"], "unexpected order {ids:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_task_assigns_identity_and_mirrors_column(
    facade: Result<InMemoryWorkspaceFacade, eyre::Report>,
) -> Result<(), eyre::Report> {
    let store = facade?;
    let workspace_id = WorkspaceId::new("ws-launch");
    let request = NewTask::new("Analytics")?
        .in_column("review")
        .at_position(2)
        .with_priority(Priority::High);

    let created = store.create_task(&workspace_id, request).await?;

    eyre::ensure!(!created.id.as_str().is_empty(), "task id must be assigned");
    eyre::ensure!(created.column_id.as_deref() == Some("review"), "column mismatch");
    eyre::ensure!(created.status.as_deref() == Some("review"), "status mismatch");
    let stored = store
        .get_workspace(&workspace_id)
        .await?
        .ok_or_else(|| eyre::eyre!("workspace missing"))?;
    eyre::ensure!(
        stored.tasks.iter().any(|task| task.id == created.id),
        "created task not stored"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_task_applies_only_set_fields(
    facade: Result<InMemoryWorkspaceFacade, eyre::Report>,
) -> Result<(), eyre::Report> {
    let store = facade?;
    let workspace_id = WorkspaceId::new("ws-launch");
    let task_id = TaskId::new("t1");

    store
        .update_task(
            &workspace_id,
            &task_id,
            TaskPatch::placement(ColumnId::new("done"), 4),
        )
        .await?;

    let stored = store
        .get_workspace(&workspace_id)
        .await?
        .ok_or_else(|| eyre::eyre!("workspace missing"))?;
    let task = stored
        .tasks
        .iter()
        .find(|task| task.id == task_id)
        .ok_or_else(|| eyre::eyre!("task missing"))?;
    eyre::ensure!(task.column_id.as_deref() == Some("done"), "column not updated");
    eyre::ensure!(task.status.as_deref() == Some("done"), "status not updated");
    eyre::ensure!(task.position == Some(4), "position not updated");
    eyre::ensure!(task.title == "Hero copy", "title must be untouched");
    eyre::ensure!(task.updated_at.is_some(), "update time must be stamped");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_records_are_reported(
    facade: Result<InMemoryWorkspaceFacade, eyre::Report>,
) -> Result<(), eyre::Report> {
    let store = facade?;

    let missing_task = store
        .delete_task(&WorkspaceId::new("ws-launch"), &TaskId::new("ghost"))
        .await;
    let missing_workspace = store
        .update_workspace(&WorkspaceId::new("ghost"), WorkspacePatch::default())
        .await;

    eyre::ensure!(
        matches!(missing_task, Err(FacadeError::TaskNotFound { .. })),
        "expected TaskNotFound, got {missing_task:?}"
    );
    eyre::ensure!(
        matches!(missing_workspace, Err(FacadeError::WorkspaceNotFound(_))),
        "expected WorkspaceNotFound, got {missing_workspace:?}"
    );
    eyre::ensure!(
        store.get_workspace(&WorkspaceId::new("ghost")).await?.is_none(),
        "unknown workspace must be absent"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn injected_failures_reject_writes_then_clear(
    facade: Result<InMemoryWorkspaceFacade, eyre::Report>,
) -> Result<(), eyre::Report> {
    let store = facade?;
    let workspace_id = WorkspaceId::new("ws-launch");
    let task_id = TaskId::new("t1");
    store.fail_next_writes(1)?;

    let rejected = store
        .update_task(&workspace_id, &task_id, TaskPatch::restore())
        .await;
    let accepted = store
        .update_task(&workspace_id, &task_id, TaskPatch::restore())
        .await;

    eyre::ensure!(
        matches!(rejected, Err(FacadeError::Rejected(_))),
        "first write should be rejected"
    );
    eyre::ensure!(accepted.is_ok(), "second write should succeed");
    eyre::ensure!(store.task_updates()?.len() == 2, "both attempts recorded");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn workspace_patch_updates_fields_and_deletion_removes(
    facade: Result<InMemoryWorkspaceFacade, eyre::Report>,
) -> Result<(), eyre::Report> {
    let store = facade?;
    let workspace_id = WorkspaceId::new("ws-billing");
    let patch = WorkspacePatch {
        title: Some("Billing v2".to_owned()),
        progress: Some(80),
        ..WorkspacePatch::default()
    };

    store.update_workspace(&workspace_id, patch).await?;
    let updated = store
        .get_workspace(&workspace_id)
        .await?
        .ok_or_else(|| eyre::eyre!("workspace missing"))?;
    eyre::ensure!(updated.title == "Billing v2", "title not updated");
    eyre::ensure!(updated.progress == Some(80), "progress not updated");

    store.delete_workspace(&workspace_id).await?;
    eyre::ensure!(
        store.get_workspace(&workspace_id).await?.is_none(),
        "workspace should be gone"
    );
    Ok(())
}
