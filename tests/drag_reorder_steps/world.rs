//! Shared world state for drag-reorder BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::board::{
    adapters::memory::InMemoryWorkspaceFacade,
    config::BoardConfig,
    domain::StoredWorkspace,
    services::{BoardSession, DragOutcome, SettleOutcome},
};

/// Session type used by the BDD world.
pub type TestSession = BoardSession<InMemoryWorkspaceFacade, DefaultClock>;

/// Scenario world for drag-reorder behaviour tests.
pub struct DragWorld {
    pub facade: Arc<InMemoryWorkspaceFacade>,
    pub config: BoardConfig,
    pub pending_workspace: Option<StoredWorkspace>,
    pub session: Option<TestSession>,
    pub last_outcome: Option<DragOutcome>,
    pub last_settle: Option<SettleOutcome>,
}

impl DragWorld {
    /// Creates a world with an empty façade and default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            facade: Arc::new(InMemoryWorkspaceFacade::new()),
            config: BoardConfig::default(),
            pending_workspace: None,
            session: None,
            last_outcome: None,
            last_settle: None,
        }
    }

    /// Returns the loaded session.
    ///
    /// # Errors
    ///
    /// Returns an error when no session has been loaded yet.
    pub fn session_mut(&mut self) -> Result<&mut TestSession, eyre::Report> {
        self.session
            .as_mut()
            .ok_or_else(|| eyre::eyre!("board session not loaded in scenario world"))
    }
}

impl Default for DragWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DragWorld {
    DragWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
