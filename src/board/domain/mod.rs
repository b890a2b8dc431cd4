//! Domain model for the task board.
//!
//! The board domain models tasks, their per-status ordinal positions, the
//! audit trail, and the aggregate board snapshot while keeping persistence
//! and schema checking outside of the domain boundary.

mod audit;
mod error;
mod ids;
mod repository;
mod seed;
mod state;
mod task;
mod view;

pub use audit::{ACTOR_LABEL, AuditAction, AuditChange, AuditEvent, TaskSnapshot};
pub use error::{
    FieldError, ParseAuditActionError, ParseTaskPriorityError, ParseTaskStatusError,
    TaskRepositoryError, TaskValidationError,
};
pub use ids::{AuditEventId, EstimateMinutes, Ordinal, RubricScore, TaskId, TaskTitle};
pub use repository::{TaskRepository, TaskRepositoryResult};
pub use seed::seed_state;
pub use state::{BoardState, ExtendedMode};
pub use task::{NewTask, Task, TaskData, TaskPatch, TaskPriority, TaskStatus};
pub use view::{ColumnView, DueStatus, SortMode, column_views, due_status};
