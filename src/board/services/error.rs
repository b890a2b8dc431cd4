//! Service-level errors for board operations.

use crate::board::domain::{
    FieldError, Ordinal, TaskId, TaskRepositoryError, TaskStatus, TaskValidationError,
};
use thiserror::Error;

/// Errors returned by board operations.
///
/// Every error aborts the operation in progress and leaves the board
/// unchanged.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BoardError {
    /// Create or update input was malformed.
    #[error(transparent)]
    Validation(#[from] TaskValidationError),

    /// The operation referenced a task that does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

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

    /// A reorder referenced a position outside the column.
    #[error("position {index} is outside column {status} of length {len}")]
    PositionOutOfRange {
        /// Column being reordered.
        status: TaskStatus,
        /// Offending zero-based position.
        index: usize,
        /// Number of tasks in the column.
        len: usize,
    },

    /// An imported document failed structural validation.
    #[error("imported document is invalid: {}", format_field_errors(.0))]
    ImportSchema(Vec<FieldError>),

    /// An imported document is not well-formed JSON.
    #[error("imported document is not valid JSON: {0}")]
    ImportParse(String),

    /// The board could not be serialised for export.
    #[error("failed to serialize board: {0}")]
    Serialization(String),

    /// The audit report template failed to render.
    #[error("failed to render audit report: {0}")]
    ReportRender(String),
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<TaskRepositoryError> for BoardError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::DuplicateTask(id) => Self::DuplicateTask(id),
            TaskRepositoryError::OrdinalConflict { status, ordinal } => {
                Self::OrdinalConflict { status, ordinal }
            }
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            TaskRepositoryError::Validation(inner) => Self::Validation(inner),
        }
    }
}

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardError>;
