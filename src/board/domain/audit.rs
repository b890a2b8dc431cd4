//! Audit trail entries.
//!
//! Each entry records one mutation of one task. The before/after payload is
//! a tagged variant so that every action carries exactly the snapshots it
//! is allowed to have.

use super::{
    AuditEventId, ParseAuditActionError, Task, TaskId, TaskPriority, TaskStatus,
    TaskValidationError,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label recorded as the actor of every audit entry.
pub const ACTOR_LABEL: &str = "Alumno/a";

/// Kind of mutation recorded by an audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    /// A task was created.
    Create,
    /// Task fields were changed.
    Update,
    /// A task was removed.
    Delete,
    /// A task changed column.
    Move,
}

impl AuditAction {
    /// All actions, in display order.
    pub const ALL: [Self; 4] = [Self::Create, Self::Update, Self::Delete, Self::Move];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Move => "MOVE",
        }
    }
}

impl TryFrom<&str> for AuditAction {
    type Error = ParseAuditActionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "CREATE" => Ok(Self::Create),
            "UPDATE" => Ok(Self::Update),
            "DELETE" => Ok(Self::Delete),
            "MOVE" => Ok(Self::Move),
            _ => Err(ParseAuditActionError(value.to_owned())),
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Partial copy of task fields captured in an audit diff.
///
/// Unset fields were not part of the recorded change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSnapshot {
    /// Task identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,
    /// Title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    /// Tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Estimate in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate_minutes: Option<u32>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Due timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
    /// Column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// Position inside the column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<u32>,
    /// Rubric score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rubric_score: Option<f64>,
    /// Rubric comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rubric_comment: Option<String>,
    /// Reviewer observations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

impl TaskSnapshot {
    /// Captures every field of `task`.
    #[must_use]
    pub fn of(task: &Task) -> Self {
        Self {
            id: Some(task.id().clone()),
            title: Some(task.title().as_str().to_owned()),
            description: task.description().map(str::to_owned),
            priority: Some(task.priority()),
            tags: Some(task.tags().to_vec()),
            estimate_minutes: Some(task.estimate_minutes().value()),
            created_at: Some(task.created_at()),
            due_at: task.due_at(),
            status: Some(task.status()),
            ordinal: Some(task.ordinal().value()),
            rubric_score: task.rubric_score().map(|score| score.value()),
            rubric_comment: task.rubric_comment().map(str::to_owned),
            observations: task.observations().map(str::to_owned),
        }
    }

    /// Captures only a status.
    #[must_use]
    pub fn status_only(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Captures the user-visible fields that differ between two versions of
    /// a task, returning `(before, after)`.
    ///
    /// Ordinals are excluded; position churn is not an auditable fact.
    #[must_use]
    pub fn changed_fields(before: &Task, after: &Task) -> (Self, Self) {
        let old = Self::of(before);
        let new = Self::of(after);
        let mut old_diff = Self::default();
        let mut new_diff = Self::default();

        macro_rules! keep_if_changed {
            ($($field:ident),+) => {
                $(
                    if old.$field != new.$field {
                        old_diff.$field = old.$field.clone();
                        new_diff.$field = new.$field.clone();
                    }
                )+
            };
        }
        keep_if_changed!(
            title,
            description,
            priority,
            tags,
            estimate_minutes,
            due_at,
            status,
            rubric_score,
            rubric_comment,
            observations
        );
        (old_diff, new_diff)
    }

    /// Returns `true` when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Before/after payload of an audit entry, keyed by action.
#[derive(Debug, Clone, PartialEq)]
pub enum AuditChange {
    /// A task was created.
    Create {
        /// The created task.
        after: TaskSnapshot,
    },
    /// Task fields were changed.
    Update {
        /// Values before the change.
        before: TaskSnapshot,
        /// Values after the change.
        after: TaskSnapshot,
    },
    /// A task was removed.
    Delete {
        /// The removed task.
        before: TaskSnapshot,
    },
    /// A task changed column.
    Move {
        /// Column before the move.
        before: TaskSnapshot,
        /// Column after the move.
        after: TaskSnapshot,
    },
}

impl AuditChange {
    /// Returns the action this change records.
    #[must_use]
    pub const fn action(&self) -> AuditAction {
        match self {
            Self::Create { .. } => AuditAction::Create,
            Self::Update { .. } => AuditAction::Update,
            Self::Delete { .. } => AuditAction::Delete,
            Self::Move { .. } => AuditAction::Move,
        }
    }

    /// Returns the snapshot taken before the change, if the action has one.
    #[must_use]
    pub const fn before(&self) -> Option<&TaskSnapshot> {
        match self {
            Self::Create { .. } => None,
            Self::Update { before, .. } | Self::Delete { before } | Self::Move { before, .. } => {
                Some(before)
            }
        }
    }

    /// Returns the snapshot taken after the change, if the action has one.
    #[must_use]
    pub const fn after(&self) -> Option<&TaskSnapshot> {
        match self {
            Self::Delete { .. } => None,
            Self::Create { after } | Self::Update { after, .. } | Self::Move { after, .. } => {
                Some(after)
            }
        }
    }

    fn from_parts(
        action: AuditAction,
        before: Option<TaskSnapshot>,
        after: Option<TaskSnapshot>,
    ) -> Result<Self, TaskValidationError> {
        let shape_error = |reason| TaskValidationError::InvalidAuditShape {
            action: action.as_str().to_owned(),
            reason,
        };
        match (action, before, after) {
            (AuditAction::Create, None, Some(after)) => Ok(Self::Create { after }),
            (AuditAction::Delete, Some(before), None) => Ok(Self::Delete { before }),
            (AuditAction::Update, Some(before), Some(after)) => Ok(Self::Update { before, after }),
            (AuditAction::Move, Some(before), Some(after)) => Ok(Self::Move { before, after }),
            (AuditAction::Create, ..) => Err(shape_error("expected only `after`")),
            (AuditAction::Delete, ..) => Err(shape_error("expected only `before`")),
            (AuditAction::Update | AuditAction::Move, ..) => {
                Err(shape_error("expected both `before` and `after`"))
            }
        }
    }
}

/// Immutable audit log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AuditEventRecord", into = "AuditEventRecord")]
pub struct AuditEvent {
    id: AuditEventId,
    timestamp: DateTime<Utc>,
    task_id: TaskId,
    change: AuditChange,
}

impl AuditEvent {
    /// Creates an audit entry from its parts.
    #[must_use]
    pub const fn new(
        id: AuditEventId,
        timestamp: DateTime<Utc>,
        task_id: TaskId,
        change: AuditChange,
    ) -> Self {
        Self {
            id,
            timestamp,
            task_id,
            change,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> &AuditEventId {
        &self.id
    }

    /// Returns when the entry was recorded.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the task the entry refers to. The task may no longer exist.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the recorded change.
    #[must_use]
    pub const fn change(&self) -> &AuditChange {
        &self.change
    }

    /// Returns the recorded action.
    #[must_use]
    pub const fn action(&self) -> AuditAction {
        self.change.action()
    }

    /// Returns the actor label, which is fixed for this board.
    #[must_use]
    pub const fn actor_label(&self) -> &'static str {
        ACTOR_LABEL
    }
}

/// Flat wire shape of an audit entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuditEventRecord {
    id: AuditEventId,
    timestamp: DateTime<Utc>,
    action: AuditAction,
    task_id: TaskId,
    #[serde(default)]
    diff: AuditDiffRecord,
    actor_label: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct AuditDiffRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    before: Option<TaskSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    after: Option<TaskSnapshot>,
}

impl TryFrom<AuditEventRecord> for AuditEvent {
    type Error = TaskValidationError;

    fn try_from(record: AuditEventRecord) -> Result<Self, Self::Error> {
        if record.actor_label != ACTOR_LABEL {
            return Err(TaskValidationError::UnknownActor(record.actor_label));
        }
        let change = AuditChange::from_parts(record.action, record.diff.before, record.diff.after)?;
        Ok(Self::new(record.id, record.timestamp, record.task_id, change))
    }
}

impl From<AuditEvent> for AuditEventRecord {
    fn from(event: AuditEvent) -> Self {
        let action = event.change.action();
        let diff = match event.change {
            AuditChange::Create { after } => AuditDiffRecord {
                before: None,
                after: Some(after),
            },
            AuditChange::Delete { before } => AuditDiffRecord {
                before: Some(before),
                after: None,
            },
            AuditChange::Update { before, after } | AuditChange::Move { before, after } => {
                AuditDiffRecord {
                    before: Some(before),
                    after: Some(after),
                }
            }
        };
        Self {
            id: event.id,
            timestamp: event.timestamp,
            action,
            task_id: event.task_id,
            diff,
            actor_label: ACTOR_LABEL.to_owned(),
        }
    }
}
