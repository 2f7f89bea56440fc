//! Shared test helpers for in-memory façade integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use serde_json::json;
use taskboard::board::{
    adapters::memory::InMemoryWorkspaceFacade, config::BoardConfig, domain::StoredWorkspace,
    services::BoardSession,
};

/// Session type used across integration tests.
pub type TestSession = BoardSession<InMemoryWorkspaceFacade, DefaultClock>;

/// Workspace documents in the loose shapes storage produces: timestamp
/// objects, bare dates, aliases, and missing fields.
///
/// # Errors
///
/// Returns an error if a document does not deserialize.
pub fn stored_workspaces() -> Result<Vec<StoredWorkspace>, serde_json::Error> {
    serde_json::from_value(json!([
        {
            "id": "ws-launch",
            "name": "Website launch",
            "description": "Public marketing site",
            "status": "active",
            "priority": "urgent",
            "tags": ["marketing", "web"],
            "dueDate": "2030-06-01",
            "progress": 40,
            "createdAt": {"_seconds": 1_700_000_000, "_nanoseconds": 0},
            "updatedAt": "2024-02-01T10:00:00Z",
            "tasks": [
                {"id": "t1", "title": "Hero copy", "columnId": "todo", "status": "todo", "position": 0},
                {"id": "t2", "title": "Pricing page", "columnId": "todo", "status": "todo", "position": 1,
                 "dueDate": {"seconds": 1_900_000_000, "nanoseconds": 0}},
                {"id": "t3", "title": "Legacy banner", "status": "done", "position": 0},
                {"id": "t4", "title": "Old draft", "columnId": "todo", "position": 5, "archived": true}
            ]
        },
        {
            "workspaceId": "ws-billing",
            "title": "Billing revamp",
            "status": "paused",
            "priority": "high",
            "systemLevel": "company",
            "tags": ["finance"],
            "updatedAt": 1_706_000_000_000_i64,
            "boardColumns": [
                {"id": "ideas", "title": "Ideas", "color": "#ffffff", "position": 0},
                {"id": "shipping", "title": "Shipping", "color": "#000000", "position": 1}
            ],
            "tasks": [
                {"taskId": "b1", "title": "Invoice template", "columnId": "ideas", "position": 0},
                {"taskId": "b2", "title": "Orphan", "columnId": "backlog", "position": 0}
            ]
        }
    ]))
}

/// Provides a façade seeded with [`stored_workspaces`].
///
/// # Errors
///
/// Returns an error if the documents do not deserialize or seeding fails.
#[fixture]
pub fn facade() -> Result<InMemoryWorkspaceFacade, eyre::Report> {
    let facade = InMemoryWorkspaceFacade::new();
    for workspace in stored_workspaces()? {
        facade.seed(workspace)?;
    }
    Ok(facade)
}

/// Builds a session over `facade` with the system clock.
#[must_use]
pub fn session(facade: InMemoryWorkspaceFacade, config: BoardConfig) -> TestSession {
    BoardSession::new(Arc::new(facade), Arc::new(DefaultClock), config)
}
