//! Column ordering for drag-and-drop and keyboard moves.
//!
//! Every interactive move re-derives the affected columns as a contiguous
//! `1..N` sequence. Deletes never pass through here, so holes they leave
//! survive until the column is next reordered.

use super::{BoardError, BoardResult};
use crate::board::domain::{Ordinal, Task, TaskId, TaskRepository, TaskStatus};

/// Where a dragged task was released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Onto another task: the dragged task lands immediately before it.
    Task(TaskId),
    /// Onto a column's empty area: the dragged task lands at the end.
    Column(TaskStatus),
}

/// Keyboard move direction through the fixed column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards `todo`.
    Left,
    /// Towards `done`.
    Right,
}

/// Position change of a single task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdinalChange {
    /// Task that changed.
    pub task_id: TaskId,
    /// Column before the move.
    pub from_status: TaskStatus,
    /// Column after the move.
    pub to_status: TaskStatus,
    /// Ordinal before the move.
    pub from_ordinal: Ordinal,
    /// Ordinal after the move.
    pub to_ordinal: Ordinal,
}

/// A task that changed column as part of a reorder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMove {
    /// Moved task.
    pub task_id: TaskId,
    /// Source column.
    pub from: TaskStatus,
    /// Destination column.
    pub to: TaskStatus,
}

/// Result of a reorder: the full task list plus the minimal diff.
#[derive(Debug, Clone, PartialEq)]
pub struct ReorderOutcome {
    /// Every task after the reorder.
    pub tasks: Vec<Task>,
    /// Tasks whose status or ordinal changed.
    pub changes: Vec<OrdinalChange>,
    /// The column change, when the moved task switched columns.
    pub column_move: Option<ColumnMove>,
}

impl ReorderOutcome {
    fn unchanged(tasks: &[Task]) -> Self {
        Self {
            tasks: tasks.to_vec(),
            changes: Vec::new(),
            column_move: None,
        }
    }

    fn diff(before: &[Task], after: TaskRepository, column_move: Option<ColumnMove>) -> Self {
        let changes = after
            .tasks()
            .iter()
            .filter_map(|task| {
                let old = before.iter().find(|candidate| candidate.id() == task.id())?;
                let moved = old.status() != task.status() || old.ordinal() != task.ordinal();
                moved.then(|| OrdinalChange {
                    task_id: task.id().clone(),
                    from_status: old.status(),
                    to_status: task.status(),
                    from_ordinal: old.ordinal(),
                    to_ordinal: task.ordinal(),
                })
            })
            .collect();
        Self {
            tasks: after.into_tasks(),
            changes,
            column_move,
        }
    }

    /// Returns `true` when no task changed status or position.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Moves the task at `from_index` to `to_index` inside `status` and
/// renumbers the whole column.
///
/// # Errors
///
/// Returns [`BoardError::PositionOutOfRange`] when either index lies
/// outside the column.
pub fn reorder_column(
    tasks: &[Task],
    status: TaskStatus,
    from_index: usize,
    to_index: usize,
) -> BoardResult<ReorderOutcome> {
    let mut repository = TaskRepository::from_tasks(tasks.to_vec());
    let mut column = repository.column_ids(status);
    let len = column.len();
    for index in [from_index, to_index] {
        if index >= len {
            return Err(BoardError::PositionOutOfRange { status, index, len });
        }
    }
    if from_index == to_index {
        return Ok(ReorderOutcome::unchanged(tasks));
    }

    let moved = column.remove(from_index);
    column.insert(to_index, moved);
    renumber(&mut repository, &column, status);
    Ok(ReorderOutcome::diff(tasks, repository, None))
}

/// Moves a task into another column, before `before` when given or at the
/// end otherwise, renumbering both columns.
///
/// Moving into the task's own column appends it to the end of that column.
///
/// # Errors
///
/// Returns [`BoardError::NotFound`] when the task, or the `before` anchor,
/// is not in the expected column.
pub fn move_to_column(
    tasks: &[Task],
    task_id: &TaskId,
    destination: TaskStatus,
    before: Option<&TaskId>,
) -> BoardResult<ReorderOutcome> {
    let mut repository = TaskRepository::from_tasks(tasks.to_vec());
    let source = repository
        .find_by_id(task_id)
        .map(Task::status)
        .ok_or_else(|| BoardError::NotFound(task_id.clone()))?;

    let mut source_column = repository.column_ids(source);
    source_column.retain(|id| id != task_id);

    let mut destination_column = if source == destination {
        source_column.clone()
    } else {
        repository.column_ids(destination)
    };
    let insert_at = match before {
        Some(anchor) => destination_column
            .iter()
            .position(|id| id == anchor)
            .ok_or_else(|| BoardError::NotFound(anchor.clone()))?,
        None => destination_column.len(),
    };
    destination_column.insert(insert_at, task_id.clone());

    if source != destination {
        renumber(&mut repository, &source_column, source);
    }
    renumber(&mut repository, &destination_column, destination);

    let column_move = (source != destination).then(|| ColumnMove {
        task_id: task_id.clone(),
        from: source,
        to: destination,
    });
    Ok(ReorderOutcome::diff(tasks, repository, column_move))
}

/// Resolves a drop gesture into a reorder.
///
/// Dropping onto a task of the same column swaps positions the way a
/// sortable list does (the dragged task takes the target's index). Dropping
/// onto a task of another column inserts before it; dropping onto a column
/// appends. Dropping a task onto itself changes nothing.
///
/// # Errors
///
/// Returns [`BoardError::NotFound`] when the dragged or target task does
/// not exist.
pub fn plan_drop(
    tasks: &[Task],
    task_id: &TaskId,
    target: &DropTarget,
) -> BoardResult<ReorderOutcome> {
    let dragged = tasks
        .iter()
        .find(|task| task.id() == task_id)
        .ok_or_else(|| BoardError::NotFound(task_id.clone()))?;

    match target {
        DropTarget::Task(over_id) if over_id == task_id => Ok(ReorderOutcome::unchanged(tasks)),
        DropTarget::Task(over_id) => {
            let over = tasks
                .iter()
                .find(|task| task.id() == over_id)
                .ok_or_else(|| BoardError::NotFound(over_id.clone()))?;
            if over.status() == dragged.status() {
                let column =
                    TaskRepository::from_tasks(tasks.to_vec()).column_ids(dragged.status());
                let from_index = index_in(&column, task_id)?;
                let to_index = index_in(&column, over_id)?;
                reorder_column(tasks, dragged.status(), from_index, to_index)
            } else {
                move_to_column(tasks, task_id, over.status(), Some(over_id))
            }
        }
        DropTarget::Column(status) if *status == dragged.status() => {
            let column = TaskRepository::from_tasks(tasks.to_vec()).column_ids(*status);
            let from_index = index_in(&column, task_id)?;
            let last = column.len().saturating_sub(1);
            reorder_column(tasks, *status, from_index, last)
        }
        DropTarget::Column(status) => move_to_column(tasks, task_id, *status, None),
    }
}

/// Moves a task one column left or right, appending it to the end.
///
/// Moving left of `todo` or right of `done` changes nothing.
///
/// # Errors
///
/// Returns [`BoardError::NotFound`] when the task does not exist.
pub fn move_adjacent(
    tasks: &[Task],
    task_id: &TaskId,
    direction: Direction,
) -> BoardResult<ReorderOutcome> {
    let current = tasks
        .iter()
        .find(|task| task.id() == task_id)
        .map(Task::status)
        .ok_or_else(|| BoardError::NotFound(task_id.clone()))?;
    let neighbour = match direction {
        Direction::Left => current.left(),
        Direction::Right => current.right(),
    };
    match neighbour {
        Some(destination) => move_to_column(tasks, task_id, destination, None),
        None => Ok(ReorderOutcome::unchanged(tasks)),
    }
}

fn index_in(column: &[TaskId], task_id: &TaskId) -> BoardResult<usize> {
    column
        .iter()
        .position(|id| id == task_id)
        .ok_or_else(|| BoardError::NotFound(task_id.clone()))
}

fn renumber(repository: &mut TaskRepository, column: &[TaskId], status: TaskStatus) {
    for (index, id) in column.iter().enumerate() {
        repository.place(id, status, Ordinal::from_index(index));
    }
}
