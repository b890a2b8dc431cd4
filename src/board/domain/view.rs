//! Read-only column projections for presentation.
//!
//! Nothing here feeds back into stored ordinals.

use super::{Task, TaskStatus};
use chrono::{DateTime, TimeZone};
use std::cmp::Ordering;

/// Display order inside a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Ascending ordinal.
    #[default]
    Ordinal,
    /// Tasks with a due date first, earliest first; undated tasks follow in
    /// ordinal order.
    DueDateFirst,
}

/// Tasks of one column in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnView<'a> {
    /// Column shown.
    pub status: TaskStatus,
    /// Tasks in display order.
    pub tasks: Vec<&'a Task>,
}

/// Groups tasks into the three columns, in column order, sorted by `sort`.
#[must_use]
pub fn column_views<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
    sort: SortMode,
) -> Vec<ColumnView<'a>> {
    let all: Vec<&Task> = tasks.into_iter().collect();
    TaskStatus::ALL
        .iter()
        .map(|status| {
            let mut column: Vec<&Task> = all
                .iter()
                .copied()
                .filter(|task| task.status() == *status)
                .collect();
            column.sort_by(|left, right| compare(left, right, sort));
            ColumnView {
                status: *status,
                tasks: column,
            }
        })
        .collect()
}

fn compare(left: &Task, right: &Task, sort: SortMode) -> Ordering {
    let by_ordinal = left
        .ordinal()
        .cmp(&right.ordinal())
        .then_with(|| left.id().cmp(right.id()));
    match sort {
        SortMode::Ordinal => by_ordinal,
        SortMode::DueDateFirst => match (left.due_at(), right.due_at()) {
            (Some(a), Some(b)) => a.cmp(&b).then(by_ordinal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => by_ordinal,
        },
    }
}

/// Due-date badge of a task relative to the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    /// No due date set.
    NoDueDate,
    /// The due day has passed.
    Overdue,
    /// Due today.
    DueToday,
    /// Due within the configured window.
    DueSoon {
        /// Whole days until the due day.
        days: i64,
    },
    /// Due after the window.
    Later,
}

/// Classifies a task's due date by calendar day in the time zone of `now`.
#[must_use]
pub fn due_status<Tz: TimeZone>(task: &Task, now: &DateTime<Tz>, soon_days: i64) -> DueStatus {
    let Some(due_at) = task.due_at() else {
        return DueStatus::NoDueDate;
    };
    let today = now.date_naive();
    let due_day = due_at.with_timezone(&now.timezone()).date_naive();
    let days = due_day.signed_duration_since(today).num_days();
    match days {
        _ if days < 0 => DueStatus::Overdue,
        0 => DueStatus::DueToday,
        _ if days <= soon_days => DueStatus::DueSoon { days },
        _ => DueStatus::Later,
    }
}
