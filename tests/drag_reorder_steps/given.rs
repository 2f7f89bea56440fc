//! Given steps for drag-reorder BDD scenarios.

use super::world::{DragWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::board::{
    config::ReconcilePolicy,
    domain::{StoredTask, StoredWorkspace},
    services::BoardSession,
};

fn pending(world: &mut DragWorld) -> Result<&mut StoredWorkspace, eyre::Report> {
    world
        .pending_workspace
        .as_mut()
        .ok_or_else(|| eyre::eyre!("missing pending workspace in scenario world"))
}

#[given(r#"a workspace "{id}" titled "{title}""#)]
fn a_workspace(world: &mut DragWorld, id: String, title: String) {
    world.pending_workspace = Some(StoredWorkspace::new(id, title));
}

#[given(r#"the workspace has task "{task_id}" in column "{column}" at position {position:u32}"#)]
fn task_in_column(
    world: &mut DragWorld,
    task_id: String,
    column: String,
    position: u32,
) -> Result<(), eyre::Report> {
    let mut task = StoredTask::new(task_id.as_str(), format!("Task {task_id}"))
        .with_column(column.as_str())
        .with_status(column);
    task.position = Some(position);
    pending(world)?.tasks.push(task);
    Ok(())
}

#[given(r#"the workspace has task "{task_id}" with status "{status}""#)]
fn task_with_status(
    world: &mut DragWorld,
    task_id: String,
    status: String,
) -> Result<(), eyre::Report> {
    let task = StoredTask::new(task_id.as_str(), format!("Task {task_id}")).with_status(status);
    pending(world)?.tasks.push(task);
    Ok(())
}

#[given("the board session is loaded")]
fn session_loaded(world: &mut DragWorld) -> Result<(), eyre::Report> {
    let workspace = world
        .pending_workspace
        .take()
        .ok_or_else(|| eyre::eyre!("missing pending workspace in scenario world"))?;
    world
        .facade
        .seed(workspace)
        .wrap_err("seed workspace for drag scenario")?;
    let mut session = BoardSession::new(
        world.facade.clone(),
        std::sync::Arc::new(mockable::DefaultClock),
        world.config.clone(),
    );
    run_async(session.load()).wrap_err("load board session")?;
    world.session = Some(session);
    Ok(())
}

#[given(r#"the reconcile policy is "{policy}""#)]
fn reconcile_policy(world: &mut DragWorld, policy: String) -> Result<(), eyre::Report> {
    let parsed: ReconcilePolicy = serde_json::from_value(serde_json::Value::String(policy))
        .wrap_err("parse reconcile policy")?;
    world.config = world.config.clone().with_reconcile_policy(parsed);
    let facade = world.facade.clone();
    let mut session = BoardSession::new(
        facade,
        std::sync::Arc::new(mockable::DefaultClock),
        world.config.clone(),
    );
    run_async(session.load()).wrap_err("reload board session with new policy")?;
    world.session = Some(session);
    Ok(())
}

#[given("storage rejects the next write")]
fn storage_rejects_next_write(world: &mut DragWorld) -> Result<(), eyre::Report> {
    world
        .facade
        .fail_next_writes(1)
        .wrap_err("inject storage failure")?;
    Ok(())
}
