//! Error types for board domain validation and parsing.

use super::{Ordinal, TaskId, TaskStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors returned while constructing or changing domain task values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TaskValidationError {
    /// The title is shorter than the required minimum after trimming.
    #[error("title must be at least {min} characters, got {actual}")]
    TitleTooShort {
        /// Minimum accepted length in characters.
        min: usize,
        /// Length of the rejected title.
        actual: usize,
    },

    /// The estimate is not a positive number of minutes.
    #[error("estimate must be a positive number of minutes, got {0}")]
    InvalidEstimate(i64),

    /// The ordinal is not a positive integer.
    #[error("ordinal must be a positive integer, got {0}")]
    InvalidOrdinal(i64),

    /// The rubric score lies outside `[0, 10]`.
    #[error("rubric score must be between 0 and 10, got {0}")]
    RubricScoreOutOfRange(f64),

    /// A tag is empty after trimming.
    #[error("tags must not be empty")]
    EmptyTag,

    /// Rubric fields were supplied while extended mode is disabled.
    #[error("rubric fields require extended mode")]
    ExtendedModeRequired,

    /// An audit entry names an actor other than the single board user.
    #[error("unknown audit actor label: {0}")]
    UnknownActor(String),

    /// An audit diff does not have the shape its action requires.
    #[error("audit {action} entry has an invalid diff: {reason}")]
    InvalidAuditShape {
        /// Action named by the entry.
        action: String,
        /// Description of the shape violation.
        reason: &'static str,
    },
}

/// Errors returned by the in-memory task collection.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// Another task already holds the ordinal in the same column.
    #[error("ordinal {ordinal} is already taken in column {status}")]
    OrdinalConflict {
        /// Column of the conflict.
        status: TaskStatus,
        /// Contested ordinal.
        ordinal: Ordinal,
    },

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] TaskValidationError),
}

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);

/// Error returned while parsing audit actions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown audit action: {0}")]
pub struct ParseAuditActionError(pub String);

/// A single structural problem found in an external document.
///
/// `path` uses dotted segments with bracketed indices, for example
/// `tasks[2].title`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Location of the offending value.
    pub path: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl FieldError {
    /// Creates a field error.
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}
