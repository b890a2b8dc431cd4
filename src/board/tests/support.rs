//! Shared fixtures for board unit tests.

use std::sync::Arc;

use crate::board::{
    domain::{
        BoardState, EstimateMinutes, ExtendedMode, Ordinal, Task, TaskData, TaskId, TaskPriority,
        TaskStatus, TaskTitle, seed_state,
    },
    services::{BoardService, Transition},
};
use chrono::{DateTime, Local, Utc};
use mockable::Clock;
use rstest::fixture;

/// Clock frozen at a single instant.
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

pub fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("valid RFC 3339 timestamp")
        .with_timezone(&Utc)
}

pub fn now() -> DateTime<Utc> {
    at("2026-02-02T09:00:00Z")
}

#[fixture]
pub fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(now()))
}

#[fixture]
pub fn service(clock: Arc<FixedClock>) -> BoardService<FixedClock> {
    BoardService::new(clock)
}

#[fixture]
pub fn seed() -> BoardState {
    seed_state()
}

/// Builds a task directly, bypassing creation rules.
pub fn task(id: &str, status: TaskStatus, ordinal: i64) -> Task {
    Task::from_data(TaskData {
        id: TaskId::from(id),
        title: TaskTitle::new(format!("Task {id}")).expect("valid title"),
        description: None,
        priority: TaskPriority::Medium,
        tags: Vec::new(),
        estimate_minutes: EstimateMinutes::new(30).expect("valid estimate"),
        created_at: at("2026-01-01T00:00:00Z"),
        due_at: None,
        status,
        ordinal: Ordinal::new(ordinal).expect("valid ordinal"),
        rubric_score: None,
        rubric_comment: None,
        observations: None,
    })
}

pub fn board(tasks: Vec<Task>) -> BoardState {
    BoardState::new(tasks, Vec::new(), ExtendedMode::default())
}

/// Column contents as `(id, ordinal)` pairs in display order.
pub fn column(state: &BoardState, status: TaskStatus) -> Vec<(String, u32)> {
    ids_and_ordinals(state.tasks(), status)
}

pub fn ids_and_ordinals(tasks: &[Task], status: TaskStatus) -> Vec<(String, u32)> {
    let mut entries: Vec<(String, u32)> = tasks
        .iter()
        .filter(|task| task.status() == status)
        .map(|task| (task.id().as_str().to_owned(), task.ordinal().value()))
        .collect();
    entries.sort_by(|left, right| left.1.cmp(&right.1).then_with(|| left.0.cmp(&right.0)));
    entries
}

pub fn applied(transition: Transition) -> (BoardState, Vec<crate::board::domain::AuditEvent>) {
    match transition {
        Transition::Applied { state, events } => (state, events),
        Transition::Unchanged => panic!("expected the operation to change the board"),
    }
}
