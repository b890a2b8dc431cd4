//! Shared world state for board drag-and-drop BDD scenarios.

use std::sync::Arc;

use micro_kanban::board::{
    adapters::{InMemoryBoardStore, SchemaDocumentValidator},
    config::BoardConfig,
    domain::TaskStatus,
    services::BoardController,
};
use mockable::DefaultClock;
use rstest::fixture;

/// Controller type used by the BDD world.
pub type TestController =
    BoardController<InMemoryBoardStore, SchemaDocumentValidator, DefaultClock>;

/// Scenario world for board behaviour tests.
#[derive(Default)]
pub struct BoardWorld {
    /// The session under test, opened by a given step.
    pub controller: Option<TestController>,
}

impl BoardWorld {
    /// Returns the open session.
    pub fn controller(&self) -> Result<&TestController, eyre::Report> {
        self.controller
            .as_ref()
            .ok_or_else(|| eyre::eyre!("board has not been opened"))
    }

    /// Returns the open session mutably.
    pub fn controller_mut(&mut self) -> Result<&mut TestController, eyre::Report> {
        self.controller
            .as_mut()
            .ok_or_else(|| eyre::eyre!("board has not been opened"))
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Opens a session on an empty in-memory store.
pub async fn open_board() -> TestController {
    BoardController::open(
        Arc::new(InMemoryBoardStore::new()),
        Arc::new(SchemaDocumentValidator::new()),
        Arc::new(DefaultClock),
        BoardConfig::default(),
    )
    .await
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses a column name used in feature files.
pub fn parse_status(raw: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(raw).map_err(|err| eyre::eyre!("{err}"))
}
