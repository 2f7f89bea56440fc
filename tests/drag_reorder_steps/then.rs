//! Then steps for drag-reorder BDD scenarios.

use super::world::{DragWorld, run_async};
use rstest_bdd_macros::then;
use taskboard::board::{
    domain::WorkspaceId,
    ports::WorkspaceFacade,
    services::{DragOutcome, SettleOutcome},
};

fn column_ids(world: &DragWorld, column: &str) -> Result<Vec<String>, eyre::Report> {
    let session = world
        .session
        .as_ref()
        .ok_or_else(|| eyre::eyre!("board session not loaded in scenario world"))?;
    let projection = session
        .projection()
        .ok_or_else(|| eyre::eyre!("no workspace selected"))?;
    Ok(projection
        .tasks_in(column)
        .iter()
        .map(|task| task.id().to_string())
        .collect())
}

fn expect_settle(world: &DragWorld, expected: SettleOutcome) -> Result<(), eyre::Report> {
    if world.last_settle != Some(expected) {
        return Err(eyre::eyre!(
            "expected {expected:?}, found {:?}",
            world.last_settle
        ));
    }
    Ok(())
}

#[then("the drag is committed")]
fn drag_committed(world: &DragWorld) -> Result<(), eyre::Report> {
    if !matches!(world.last_outcome, Some(DragOutcome::Committed(_))) {
        return Err(eyre::eyre!(
            "expected a committed drag, got {:?}",
            world.last_outcome
        ));
    }
    Ok(())
}

#[then("the drag is discarded")]
fn drag_discarded(world: &DragWorld) -> Result<(), eyre::Report> {
    if world.last_outcome != Some(DragOutcome::DroppedOutside) {
        return Err(eyre::eyre!(
            "expected DroppedOutside, got {:?}",
            world.last_outcome
        ));
    }
    Ok(())
}

#[then("the drag is ignored")]
fn drag_ignored(world: &DragWorld) -> Result<(), eyre::Report> {
    if world.last_outcome != Some(DragOutcome::NotFound) {
        return Err(eyre::eyre!("expected NotFound, got {:?}", world.last_outcome));
    }
    Ok(())
}

#[then("the move is confirmed by storage")]
fn move_confirmed(world: &DragWorld) -> Result<(), eyre::Report> {
    expect_settle(world, SettleOutcome::Confirmed)
}

#[then("the move is rolled back")]
fn move_rolled_back(world: &DragWorld) -> Result<(), eyre::Report> {
    expect_settle(world, SettleOutcome::RolledBack)
}

#[then("the move is kept locally")]
fn move_kept(world: &DragWorld) -> Result<(), eyre::Report> {
    expect_settle(world, SettleOutcome::Kept)
}

#[then(r#"column "{column}" lists "{tasks}""#)]
fn column_lists(world: &DragWorld, column: String, tasks: String) -> Result<(), eyre::Report> {
    let expected: Vec<String> = tasks.split(", ").map(str::to_owned).collect();
    let actual = column_ids(world, &column)?;
    if actual != expected {
        return Err(eyre::eyre!(
            "column {column}: expected {expected:?}, found {actual:?}"
        ));
    }
    Ok(())
}

#[then(r#"column "{column}" is empty"#)]
fn column_empty(world: &DragWorld, column: String) -> Result<(), eyre::Report> {
    let actual = column_ids(world, &column)?;
    if !actual.is_empty() {
        return Err(eyre::eyre!("column {column} should be empty, found {actual:?}"));
    }
    Ok(())
}

#[then("storage recorded no task updates")]
fn no_task_updates(world: &DragWorld) -> Result<(), eyre::Report> {
    let updates = world.facade.task_updates()?;
    if !updates.is_empty() {
        return Err(eyre::eyre!("expected no task updates, found {updates:?}"));
    }
    Ok(())
}

#[then(r#"storage places task "{task_id}" in column "{column}""#)]
fn storage_places_task(
    world: &DragWorld,
    task_id: String,
    column: String,
) -> Result<(), eyre::Report> {
    let stored = run_async(world.facade.get_workspace(&WorkspaceId::new("w1")))?
        .ok_or_else(|| eyre::eyre!("workspace missing from storage"))?;
    let task = stored
        .tasks
        .iter()
        .find(|task| task.id.as_str() == task_id)
        .ok_or_else(|| eyre::eyre!("task {task_id} missing from storage"))?;
    if task.column_id.as_deref() != Some(column.as_str()) {
        return Err(eyre::eyre!(
            "expected stored column {column}, found {:?}",
            task.column_id
        ));
    }
    Ok(())
}
