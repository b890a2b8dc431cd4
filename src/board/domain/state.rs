//! Aggregate board snapshot.

use super::{AuditEvent, Task, TaskId, TaskStatus};
use serde::{Deserialize, Serialize};

/// Session flag unlocking the rubric scoring fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedMode {
    /// Whether rubric fields are enabled.
    pub enabled: bool,
}

/// The unit of persistence, import and export.
///
/// Task order in `tasks` carries no meaning; column order is derived from
/// ordinals. The audit log is ordered newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    tasks: Vec<Task>,
    audit_log: Vec<AuditEvent>,
    #[serde(default)]
    extended_mode: ExtendedMode,
}

impl BoardState {
    /// Creates a board snapshot.
    #[must_use]
    pub const fn new(
        tasks: Vec<Task>,
        audit_log: Vec<AuditEvent>,
        extended_mode: ExtendedMode,
    ) -> Self {
        Self {
            tasks,
            audit_log,
            extended_mode,
        }
    }

    /// Returns all tasks in storage order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the audit log, newest entry first.
    #[must_use]
    pub fn audit_log(&self) -> &[AuditEvent] {
        &self.audit_log
    }

    /// Returns whether extended mode is enabled.
    #[must_use]
    pub const fn extended_mode(&self) -> bool {
        self.extended_mode.enabled
    }

    /// Finds a task by identifier.
    #[must_use]
    pub fn find_task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns the tasks of one column ordered by ascending ordinal.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> Vec<&Task> {
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
        column
    }

    /// Returns a copy with the given tasks and audit entries prepended to
    /// the log.
    pub(crate) fn evolve(&self, tasks: Vec<Task>, new_events: Vec<AuditEvent>) -> Self {
        let mut audit_log = new_events;
        audit_log.extend(self.audit_log.iter().cloned());
        Self {
            tasks,
            audit_log,
            extended_mode: self.extended_mode,
        }
    }

    /// Returns a copy with a different extended-mode flag.
    #[must_use]
    pub fn with_extended_mode(&self, enabled: bool) -> Self {
        Self {
            extended_mode: ExtendedMode { enabled },
            ..self.clone()
        }
    }
}
