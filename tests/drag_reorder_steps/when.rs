//! When steps for drag-reorder BDD scenarios.

use super::world::{DragWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskboard::board::services::{DragKind, DragLocation, DropResult};

#[when(
    r#"task "{task_id}" is dragged from "{source}" index {from:usize} to "{destination}" index {to:usize}"#
)]
fn task_dragged(
    world: &mut DragWorld,
    task_id: String,
    source: String,
    from: usize,
    destination: String,
    to: usize,
) -> Result<(), eyre::Report> {
    let drop = DropResult::task(
        task_id,
        DragLocation::new(source, from),
        DragLocation::new(destination, to),
    );
    let session = world.session_mut()?;
    let (outcome, settled) = run_async(session.commit_drag(&drop)).wrap_err("commit drag")?;
    world.last_outcome = Some(outcome);
    world.last_settle = settled;
    Ok(())
}

#[when(r#"task "{task_id}" is dropped outside the board from "{source}" index {from:usize}"#)]
fn task_dropped_outside(
    world: &mut DragWorld,
    task_id: String,
    source: String,
    from: usize,
) -> Result<(), eyre::Report> {
    let drop = DropResult::outside(task_id, DragKind::Task, DragLocation::new(source, from));
    let session = world.session_mut()?;
    let (outcome, settled) = run_async(session.commit_drag(&drop)).wrap_err("commit drag")?;
    world.last_outcome = Some(outcome);
    world.last_settle = settled;
    Ok(())
}
