//! End-to-end board session behaviour against the in-memory façade.

use super::helpers::{TestSession, facade, session};
use rstest::rstest;
use taskboard::board::{
    adapters::memory::InMemoryWorkspaceFacade,
    config::BoardConfig,
    domain::{TaskId, WorkspaceId, WorkspaceStatus},
    services::{
        AppAction, CalendarEventKind, DragLocation, DragOutcome, DropResult, FilterCriteria,
        SettleOutcome, ViewMode,
    },
};

async fn loaded(
    facade: Result<InMemoryWorkspaceFacade, eyre::Report>,
    config: BoardConfig,
) -> Result<TestSession, eyre::Report> {
    let mut board = session(facade?, config);
    board.load().await?;
    Ok(board)
}

fn column_tasks(board: &TestSession, column: &str) -> Vec<String> {
    board
        .projection()
        .map(|projection| {
            projection
                .tasks_in(column)
                .iter()
                .map(|task| task.id().to_string())
                .collect()
        })
        .unwrap_or_default()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn loose_documents_project_onto_default_columns(
    facade: Result<InMemoryWorkspaceFacade, eyre::Report>,
) -> Result<(), eyre::Report> {
    let board = loaded(facade, BoardConfig::default()).await?;

    let selected = board
        .state()
        .selected()
        .ok_or_else(|| eyre::eyre!("a workspace should be selected"))?;
    eyre::ensure!(selected.id().as_str() == "ws-launch", "first workspace selected");
    eyre::ensure!(selected.title() == "Website launch", "title read via alias");
    eyre::ensure!(column_tasks(&board, "todo") == ["t1", "t2"], "todo column");
    eyre::ensure!(column_tasks(&board, "done") == ["t3"], "status fallback");
    let projection = board
        .projection()
        .ok_or_else(|| eyre::eyre!("projection missing"))?;
    eyre::ensure!(projection.total_tasks() == 3, "archived task must be hidden");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn explicit_columns_drop_unmatched_tasks(
    facade: Result<InMemoryWorkspaceFacade, eyre::Report>,
) -> Result<(), eyre::Report> {
    let mut board = loaded(facade, BoardConfig::default()).await?;

    board.dispatch(AppAction::SelectWorkspace(WorkspaceId::new("ws-billing")));

    let projection = board
        .projection()
        .ok_or_else(|| eyre::eyre!("projection missing"))?;
    let columns: Vec<&str> = projection
        .columns()
        .iter()
        .map(|column| column.id().as_str())
        .collect();
    eyre::ensure!(columns == ["ideas", "shipping"], "columns {columns:?}");
    eyre::ensure!(column_tasks(&board, "ideas") == ["b1"], "ideas column");
    eyre::ensure!(projection.total_tasks() == 1, "orphan task must be dropped");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn filters_narrow_list_and_calendar(
    facade: Result<InMemoryWorkspaceFacade, eyre::Report>,
) -> Result<(), eyre::Report> {
    let mut board = loaded(facade, BoardConfig::default()).await?;

    let events = board.calendar();
    let titles: Vec<&str> = events.iter().map(|event| event.title.as_str()).collect();
    eyre::ensure!(titles == ["Pricing page", "Website launch"], "events {titles:?}");
    eyre::ensure!(
        matches!(events.first().map(|event| &event.kind), Some(CalendarEventKind::Task { .. })),
        "earliest event should be the task"
    );

    board.dispatch(AppAction::SetFilter(FilterCriteria::new().with_tag("finance")));
    board.dispatch(AppAction::SelectView(ViewMode::List));

    let listed: Vec<&str> = board
        .list()
        .iter()
        .map(|workspace| workspace.id().as_str())
        .collect();
    eyre::ensure!(listed == ["ws-billing"], "listed {listed:?}");
    eyre::ensure!(board.calendar().is_empty(), "billing has no due dates");

    board.dispatch(AppAction::SetFilter(
        FilterCriteria::new().with_status(WorkspaceStatus::Completed),
    ));
    eyre::ensure!(board.list().is_empty(), "no completed workspaces");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn committed_move_survives_reload(
    facade: Result<InMemoryWorkspaceFacade, eyre::Report>,
) -> Result<(), eyre::Report> {
    let mut board = loaded(facade, BoardConfig::default()).await?;
    let drop = DropResult::task(
        "t2",
        DragLocation::new("todo", 1),
        DragLocation::new("review", 0),
    );

    let (outcome, settled) = board.commit_drag(&drop).await?;

    eyre::ensure!(matches!(outcome, DragOutcome::Committed(_)), "drag should commit");
    eyre::ensure!(settled == Some(SettleOutcome::Confirmed), "storage should accept");

    board.load().await?;
    eyre::ensure!(column_tasks(&board, "review") == ["t2"], "move not persisted");
    eyre::ensure!(column_tasks(&board, "todo") == ["t1"], "source column");
    let task = board
        .state()
        .workspace(&WorkspaceId::new("ws-launch"))
        .and_then(|workspace| workspace.task(&TaskId::new("t2")))
        .ok_or_else(|| eyre::eyre!("task missing"))?;
    eyre::ensure!(task.status().as_str() == "review", "status mirrors column");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_move_is_rolled_back_under_strict_config(
    facade: Result<InMemoryWorkspaceFacade, eyre::Report>,
) -> Result<(), eyre::Report> {
    let mut board = loaded(facade, BoardConfig::strict()).await?;
    board.facade().fail_next_writes(1)?;
    let drop = DropResult::task(
        "t1",
        DragLocation::new("todo", 0),
        DragLocation::new("done", 1),
    );

    let (_, settled) = board.commit_drag(&drop).await?;

    eyre::ensure!(settled == Some(SettleOutcome::RolledBack), "got {settled:?}");
    eyre::ensure!(column_tasks(&board, "todo") == ["t1", "t2"], "t1 restored");
    eyre::ensure!(column_tasks(&board, "done") == ["t3"], "done column untouched");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stats_reflect_active_tasks(
    facade: Result<InMemoryWorkspaceFacade, eyre::Report>,
) -> Result<(), eyre::Report> {
    let board = loaded(facade, BoardConfig::default()).await?;

    let stats = board
        .stats(&WorkspaceId::new("ws-launch"))
        .ok_or_else(|| eyre::eyre!("stats missing"))?;

    eyre::ensure!(stats.active == 3, "active {}", stats.active);
    eyre::ensure!(stats.completed == 1, "completed {}", stats.completed);
    eyre::ensure!(stats.completion_percent == 33, "percent {}", stats.completion_percent);
    Ok(())
}
