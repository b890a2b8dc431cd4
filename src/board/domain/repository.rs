//! In-memory task collection with per-column ordinal bookkeeping.

use super::{NewTask, Ordinal, Task, TaskId, TaskPatch, TaskRepositoryError, TaskStatus};
use mockable::Clock;
use tracing::debug;

/// Result type for task collection operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Owned collection of tasks.
///
/// Enforces that no two tasks in the same status share an ordinal. Deleting
/// a task leaves a hole in its column; holes are only closed by reorders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskRepository {
    tasks: Vec<Task>,
}

impl TaskRepository {
    /// Wraps an existing task list.
    #[must_use]
    pub const fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Returns the tasks in storage order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Consumes the collection and returns its tasks.
    #[must_use]
    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    /// Returns the ordinal a new task appended to `status` receives: one
    /// past the largest ordinal in the column, or 1 for an empty column.
    ///
    /// Returns `None` when the column's largest ordinal is `u32::MAX`.
    #[must_use]
    pub fn next_ordinal(&self, status: TaskStatus) -> Option<Ordinal> {
        self.tasks
            .iter()
            .filter(|task| task.status() == status)
            .map(Task::ordinal)
            .max()
            .map_or(Some(Ordinal::FIRST), Ordinal::checked_next)
    }

    /// Builds a new task at the end of its target column.
    ///
    /// The task is not inserted; the caller records audit data and then
    /// calls [`TaskRepository::insert`]. A column whose largest ordinal
    /// cannot be exceeded is renumbered 1..N first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Validation`] when the title, estimate,
    /// tags or rubric fields are invalid. The collection is untouched then.
    pub fn create(
        &mut self,
        input: NewTask,
        extended_mode: bool,
        clock: &impl Clock,
    ) -> TaskRepositoryResult<Task> {
        let status = input.status();
        let mut task = input.build(Ordinal::FIRST, extended_mode, clock)?;
        task.place(status, self.append_slot(status));
        Ok(task)
    }

    /// Adds a task to the collection.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the id is taken or
    /// [`TaskRepositoryError::OrdinalConflict`] when its column already holds
    /// its ordinal.
    pub fn insert(&mut self, task: Task) -> TaskRepositoryResult<()> {
        if self.find_by_id(task.id()).is_some() {
            return Err(TaskRepositoryError::DuplicateTask(task.id().clone()));
        }
        if self.ordinal_taken(task.status(), task.ordinal()) {
            return Err(TaskRepositoryError::OrdinalConflict {
                status: task.status(),
                ordinal: task.ordinal(),
            });
        }
        self.tasks.push(task);
        Ok(())
    }

    /// Applies a patch and returns the task as `(before, after)`.
    ///
    /// The ordinal is kept unless the patch changes the status, in which
    /// case the task is appended to its new column. The old column is not
    /// renumbered.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task is absent,
    /// [`TaskRepositoryError::Validation`] when a patched field is invalid,
    /// or [`TaskRepositoryError::OrdinalConflict`] when the destination
    /// column already holds the assigned ordinal.
    pub fn update(
        &mut self,
        id: &TaskId,
        patch: &TaskPatch,
        extended_mode: bool,
    ) -> TaskRepositoryResult<(Task, Task)> {
        let before = self
            .find_by_id(id)
            .cloned()
            .ok_or_else(|| TaskRepositoryError::NotFound(id.clone()))?;
        let mut after = before.patched(patch, extended_mode)?;
        if after.status() != before.status() {
            let ordinal = self.append_slot(after.status());
            if self.ordinal_taken(after.status(), ordinal) {
                return Err(TaskRepositoryError::OrdinalConflict {
                    status: after.status(),
                    ordinal,
                });
            }
            after.place(after.status(), ordinal);
        }

        if let Some(slot) = self.tasks.iter_mut().find(|task| task.id() == id) {
            *slot = after.clone();
        }
        Ok((before, after))
    }

    /// Removes a task and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task is absent.
    pub fn delete(&mut self, id: &TaskId) -> TaskRepositoryResult<Task> {
        let position = self
            .tasks
            .iter()
            .position(|task| task.id() == id)
            .ok_or_else(|| TaskRepositoryError::NotFound(id.clone()))?;
        Ok(self.tasks.remove(position))
    }

    /// Finds a task by identifier.
    #[must_use]
    pub fn find_by_id(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns the ids of one column ordered by ascending ordinal.
    #[must_use]
    pub fn column_ids(&self, status: TaskStatus) -> Vec<TaskId> {
        let mut column: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|task| task.status() == status)
            .collect();
        column.sort_by(|left, right| {
            left.ordinal()
                .cmp(&right.ordinal())
                .then_with(|| left.id().cmp(right.id()))
        });
        column.into_iter().map(|task| task.id().clone()).collect()
    }

    /// Places a task at `status`/`ordinal` without any checks.
    pub(crate) fn place(&mut self, id: &TaskId, status: TaskStatus, ordinal: Ordinal) {
        if let Some(task) = self.tasks.iter_mut().find(|task| task.id() == id) {
            task.place(status, ordinal);
        }
    }

    /// Returns the ordinal for a task appended to `status`, renumbering the
    /// column 1..N first when its largest ordinal cannot be exceeded.
    fn append_slot(&mut self, status: TaskStatus) -> Ordinal {
        if let Some(ordinal) = self.next_ordinal(status) {
            return ordinal;
        }
        let column = self.column_ids(status);
        for (index, id) in column.iter().enumerate() {
            self.place(id, status, Ordinal::from_index(index));
        }
        debug!(status = %status, len = column.len(), "column renumbered at ordinal limit");
        Ordinal::from_index(column.len())
    }

    fn ordinal_taken(&self, status: TaskStatus, ordinal: Ordinal) -> bool {
        self.tasks
            .iter()
            .any(|task| task.status() == status && task.ordinal() == ordinal)
    }
}
