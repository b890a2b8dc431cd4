//! Audit entry construction.

use crate::board::domain::{
    AuditChange, AuditEvent, AuditEventId, Task, TaskId, TaskSnapshot, TaskStatus,
};
use mockable::Clock;

/// Builds audit entries stamped with the clock's current time.
///
/// The recorder only constructs entries; callers prepend them to the log.
#[derive(Debug)]
pub struct AuditRecorder<'a, C: Clock> {
    clock: &'a C,
}

impl<'a, C: Clock> AuditRecorder<'a, C> {
    /// Creates a recorder reading time from `clock`.
    #[must_use]
    pub const fn new(clock: &'a C) -> Self {
        Self { clock }
    }

    /// Records `change` against `task_id` with a fresh entry id.
    #[must_use]
    pub fn record(&self, task_id: &TaskId, change: AuditChange) -> AuditEvent {
        AuditEvent::new(AuditEventId::new(), self.clock.utc(), task_id.clone(), change)
    }

    /// Records the creation of `task` with a full snapshot.
    #[must_use]
    pub fn created(&self, task: &Task) -> AuditEvent {
        self.record(
            task.id(),
            AuditChange::Create {
                after: TaskSnapshot::of(task),
            },
        )
    }

    /// Records an edit, keeping only the fields that changed.
    #[must_use]
    pub fn updated(&self, before: &Task, after: &Task) -> AuditEvent {
        let (old, new) = TaskSnapshot::changed_fields(before, after);
        self.record(
            after.id(),
            AuditChange::Update {
                before: old,
                after: new,
            },
        )
    }

    /// Records a replacement with full before and after snapshots.
    #[must_use]
    pub fn replaced(&self, before: &Task, after: &Task) -> AuditEvent {
        self.record(
            after.id(),
            AuditChange::Update {
                before: TaskSnapshot::of(before),
                after: TaskSnapshot::of(after),
            },
        )
    }

    /// Records the removal of `task` with a full snapshot.
    #[must_use]
    pub fn deleted(&self, task: &Task) -> AuditEvent {
        self.record(
            task.id(),
            AuditChange::Delete {
                before: TaskSnapshot::of(task),
            },
        )
    }

    /// Records a column change. Only the statuses are captured.
    #[must_use]
    pub fn moved(&self, task_id: &TaskId, from: TaskStatus, to: TaskStatus) -> AuditEvent {
        self.record(
            task_id,
            AuditChange::Move {
                before: TaskSnapshot::status_only(from),
                after: TaskSnapshot::status_only(to),
            },
        )
    }
}
