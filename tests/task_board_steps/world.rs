//! Shared world state for task board BDD scenarios.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use flexido::task::{
    adapters::memory::{InMemoryTaskRepository, SessionIdentity},
    categorizer::CategorizedTasks,
    domain::TaskId,
    services::{TaskBoardService, TaskServiceError},
};
use mockable::Clock;
use rstest::fixture;

/// Clock the scenarios move explicitly.
#[derive(Debug)]
pub struct ScenarioClock {
    now: RwLock<DateTime<Utc>>,
}

impl ScenarioClock {
    fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, delta: TimeDelta) -> Result<(), eyre::Report> {
        let mut now = self
            .now
            .write()
            .map_err(|_| eyre::eyre!("scenario clock lock poisoned"))?;
        *now = now
            .checked_add_signed(delta)
            .ok_or_else(|| eyre::eyre!("scenario clock overflow"))?;
        Ok(())
    }
}

impl Clock for ScenarioClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.read().expect("scenario clock lock")
    }
}

/// Service type used by the BDD world.
pub type TestBoardService =
    TaskBoardService<InMemoryTaskRepository, SessionIdentity, ScenarioClock>;

/// Scenario world for task board behaviour tests.
pub struct TaskBoardWorld {
    pub service: TestBoardService,
    pub identity: Arc<SessionIdentity>,
    pub clock: Arc<ScenarioClock>,
    pub tasks_by_title: HashMap<String, TaskId>,
    pub last_board: Option<Result<CategorizedTasks, TaskServiceError>>,
}

impl TaskBoardWorld {
    /// Creates a world with nobody signed in, starting at 2026-06-01 08:00 UTC.
    #[must_use]
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 6, 1, 8, 0, 0)
            .single()
            .expect("valid scenario start");
        let identity = Arc::new(SessionIdentity::new());
        let clock = Arc::new(ScenarioClock::starting_at(start));
        let service = TaskBoardService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::clone(&identity),
            Arc::clone(&clock),
        );

        Self {
            service,
            identity,
            clock,
            tasks_by_title: HashMap::new(),
            last_board: None,
        }
    }

    /// Returns the scenario's current instant.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    /// Looks up a task created earlier in the scenario.
    pub fn task_id(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.tasks_by_title
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("no task titled {title:?} in scenario world"))
    }

    /// Returns the board produced by the last request.
    pub fn board(&self) -> Result<&CategorizedTasks, eyre::Report> {
        match self.last_board.as_ref() {
            Some(Ok(board)) => Ok(board),
            Some(Err(err)) => Err(eyre::eyre!("board request failed: {err}")),
            None => Err(eyre::eyre!("the board was never requested")),
        }
    }
}

impl Default for TaskBoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskBoardWorld {
    TaskBoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
