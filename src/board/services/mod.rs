//! Application services for the task board.

mod controller;
mod error;
mod import;
mod operations;
mod recorder;
mod reorder;
mod report;

pub use controller::BoardController;
pub use error::{BoardError, BoardResult};
pub use import::parse_document;
pub use operations::{BoardService, Transition, export_board, set_extended_mode};
pub use recorder::AuditRecorder;
pub use reorder::{
    ColumnMove, Direction, DropTarget, OrdinalChange, ReorderOutcome, move_adjacent,
    move_to_column, plan_drop, reorder_column,
};
pub use report::{AuditFilter, AuditSummary, filter_audit_log};
