//! Board operations: the single entry point for every mutation.
//!
//! Each operation takes the current snapshot and returns a [`Transition`].
//! The input snapshot is never modified, so a failed operation leaves the
//! caller's state exactly as it was.

use super::{
    AuditRecorder, BoardError, BoardResult, Direction, DropTarget, ReorderOutcome, move_adjacent,
    plan_drop, reorder_column,
};
use crate::board::domain::{
    AuditEvent, BoardState, NewTask, TaskId, TaskPatch, TaskRepository, TaskStatus,
};
use mockable::Clock;
use std::sync::Arc;
use tracing::debug;

/// Outcome of a board operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Nothing changed; no audit entry was produced.
    Unchanged,
    /// A new snapshot, with the audit entries that were prepended to its log.
    Applied {
        /// Snapshot after the operation.
        state: BoardState,
        /// Entries added by the operation, newest first.
        events: Vec<AuditEvent>,
    },
}

impl Transition {
    /// Returns `true` when the operation changed nothing.
    #[must_use]
    pub const fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// Returns the new snapshot, if any.
    #[must_use]
    pub const fn state(&self) -> Option<&BoardState> {
        match self {
            Self::Unchanged => None,
            Self::Applied { state, .. } => Some(state),
        }
    }

    /// Returns the audit entries produced by the operation.
    #[must_use]
    pub fn events(&self) -> &[AuditEvent] {
        match self {
            Self::Unchanged => &[],
            Self::Applied { events, .. } => events,
        }
    }

    /// Returns the snapshot to keep: the new one, or `current` when nothing
    /// changed.
    #[must_use]
    pub fn into_state_or(self, current: BoardState) -> BoardState {
        match self {
            Self::Unchanged => current,
            Self::Applied { state, .. } => state,
        }
    }
}

/// Board operation service.
#[derive(Debug, Clone)]
pub struct BoardService<C>
where
    C: Clock,
{
    clock: Arc<C>,
}

impl<C> BoardService<C>
where
    C: Clock,
{
    /// Creates a board service reading time from `clock`.
    #[must_use]
    pub const fn new(clock: Arc<C>) -> Self {
        Self { clock }
    }

    /// Returns the clock used for timestamps.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub(crate) fn recorder(&self) -> AuditRecorder<'_, C> {
        AuditRecorder::new(&*self.clock)
    }

    /// Creates a task at the end of its target column and records a CREATE
    /// entry.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Validation`] when the input is malformed.
    pub fn create(&self, state: &BoardState, input: NewTask) -> BoardResult<Transition> {
        let mut repository = TaskRepository::from_tasks(state.tasks().to_vec());
        let task = repository.create(input, state.extended_mode(), &*self.clock)?;
        let event = self.recorder().created(&task);
        debug!(
            task_id = %task.id(),
            status = %task.status(),
            ordinal = %task.ordinal(),
            "task created"
        );
        repository.insert(task)?;
        Ok(Transition::Applied {
            state: state.evolve(repository.into_tasks(), vec![event.clone()]),
            events: vec![event],
        })
    }

    /// Applies a patch to a task and records an UPDATE entry holding the
    /// changed fields.
    ///
    /// A patch that changes nothing is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] when the task is absent or
    /// [`BoardError::Validation`] when a patched field is invalid.
    pub fn update(
        &self,
        state: &BoardState,
        task_id: &TaskId,
        patch: &TaskPatch,
    ) -> BoardResult<Transition> {
        let mut repository = TaskRepository::from_tasks(state.tasks().to_vec());
        let (before, after) = repository.update(task_id, patch, state.extended_mode())?;
        if before == after {
            return Ok(Transition::Unchanged);
        }
        let event = self.recorder().updated(&before, &after);
        debug!(task_id = %task_id, "task updated");
        Ok(Transition::Applied {
            state: state.evolve(repository.into_tasks(), vec![event.clone()]),
            events: vec![event],
        })
    }

    /// Removes a task and records a DELETE entry. Sibling ordinals are left
    /// as they are.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] when the task is absent.
    pub fn delete(&self, state: &BoardState, task_id: &TaskId) -> BoardResult<Transition> {
        let mut repository = TaskRepository::from_tasks(state.tasks().to_vec());
        let removed = repository.delete(task_id)?;
        let event = self.recorder().deleted(&removed);
        debug!(task_id = %task_id, status = %removed.status(), "task deleted");
        Ok(Transition::Applied {
            state: state.evolve(repository.into_tasks(), vec![event.clone()]),
            events: vec![event],
        })
    }

    /// Moves the task at `from_index` to `to_index` within one column.
    ///
    /// Ordinal churn inside a column is not audited.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::PositionOutOfRange`] for indices outside the
    /// column.
    pub fn reorder(
        &self,
        state: &BoardState,
        status: TaskStatus,
        from_index: usize,
        to_index: usize,
    ) -> BoardResult<Transition> {
        let outcome = reorder_column(state.tasks(), status, from_index, to_index)?;
        Ok(self.apply_reorder(state, outcome))
    }

    /// Applies a drag-and-drop release.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] when the dragged or target task is
    /// absent.
    pub fn move_task(
        &self,
        state: &BoardState,
        task_id: &TaskId,
        target: &DropTarget,
    ) -> BoardResult<Transition> {
        let outcome = plan_drop(state.tasks(), task_id, target)?;
        Ok(self.apply_reorder(state, outcome))
    }

    /// Moves a task to the neighbouring column, appending it at the end.
    /// Moves past the first or last column are no-ops.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] when the task is absent.
    pub fn move_adjacent(
        &self,
        state: &BoardState,
        task_id: &TaskId,
        direction: Direction,
    ) -> BoardResult<Transition> {
        let outcome = move_adjacent(state.tasks(), task_id, direction)?;
        Ok(self.apply_reorder(state, outcome))
    }

    fn apply_reorder(&self, state: &BoardState, outcome: ReorderOutcome) -> Transition {
        if outcome.is_noop() {
            return Transition::Unchanged;
        }
        let events: Vec<AuditEvent> = outcome
            .column_move
            .iter()
            .map(|column_move| {
                debug!(
                    task_id = %column_move.task_id,
                    from = %column_move.from,
                    to = %column_move.to,
                    "task moved"
                );
                self.recorder()
                    .moved(&column_move.task_id, column_move.from, column_move.to)
            })
            .collect();
        Transition::Applied {
            state: state.evolve(outcome.tasks, events.clone()),
            events,
        }
    }
}

/// Turns extended mode on or off. Not audited.
#[must_use]
pub fn set_extended_mode(state: &BoardState, enabled: bool) -> Transition {
    if state.extended_mode() == enabled {
        return Transition::Unchanged;
    }
    Transition::Applied {
        state: state.with_extended_mode(enabled),
        events: Vec::new(),
    }
}

/// Serialises the board as JSON, pretty-printed when `pretty` is set.
///
/// # Errors
///
/// Returns [`BoardError::Serialization`] when encoding fails.
pub fn export_board(state: &BoardState, pretty: bool) -> BoardResult<String> {
    let encoded = if pretty {
        serde_json::to_string_pretty(state)
    } else {
        serde_json::to_string(state)
    };
    encoded.map_err(|err| BoardError::Serialization(err.to_string()))
}
