//! Reconciling an imported board document with the current board.

use super::{BoardError, BoardResult, BoardService, Transition};
use crate::board::domain::{AuditEvent, BoardState, ExtendedMode, Ordinal, Task, TaskStatus};
use crate::board::ports::DocumentValidator;
use mockable::Clock;
use std::collections::HashSet;
use tracing::{debug, info};

/// Parses and validates a raw JSON document.
///
/// # Errors
///
/// Returns [`BoardError::ImportParse`] when `raw` is not JSON, or
/// [`BoardError::ImportSchema`] with every offending field when the
/// validator rejects it.
pub fn parse_document(raw: &str, validator: &impl DocumentValidator) -> BoardResult<BoardState> {
    let document: serde_json::Value =
        serde_json::from_str(raw).map_err(|err| BoardError::ImportParse(err.to_string()))?;
    validator.validate(&document).map_err(BoardError::ImportSchema)
}

impl<C> BoardService<C>
where
    C: Clock,
{
    /// Imports a raw JSON document into the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::ImportParse`] or [`BoardError::ImportSchema`]
    /// when the document is rejected; the board is left untouched.
    pub fn import(
        &self,
        state: &BoardState,
        raw: &str,
        validator: &impl DocumentValidator,
    ) -> BoardResult<Transition> {
        let incoming = parse_document(raw, validator)?;
        Ok(self.merge(state, incoming))
    }

    /// Merges a validated document into the board by task id.
    ///
    /// Unknown tasks are inserted with a synthetic CREATE entry; tasks that
    /// differ from their current version replace it with a synthetic UPDATE
    /// entry holding both full versions; identical tasks are skipped. A
    /// document listing one id twice merges both copies in order, so no id
    /// is ever regenerated. Synthetic entries record the ordinal each task
    /// is stored at. Imported audit entries are added unless their id is
    /// already present. The current extended-mode flag is kept.
    #[must_use]
    pub fn merge(&self, state: &BoardState, incoming: BoardState) -> Transition {
        let mut tasks = state.tasks().to_vec();
        let mut effects: Vec<MergeEffect> = Vec::new();

        for task in incoming.tasks() {
            match tasks.iter_mut().find(|current| current.id() == task.id()) {
                None => {
                    effects.push(MergeEffect::Created(task.clone()));
                    tasks.push(task.clone());
                }
                Some(current) if current != task => {
                    effects.push(MergeEffect::Replaced {
                        before: current.clone(),
                        after: task.clone(),
                    });
                    *current = task.clone();
                }
                Some(_) => {}
            }
        }

        let imported_log = merge_audit_logs(state.audit_log(), incoming.audit_log());
        if effects.is_empty() && imported_log.is_none() {
            debug!("import matched the current board; nothing to merge");
            return Transition::Unchanged;
        }

        for status in TaskStatus::ALL {
            normalize_if_colliding(&mut tasks, status);
        }

        let recorder = self.recorder();
        let synthetic: Vec<AuditEvent> = effects
            .into_iter()
            .rev()
            .map(|effect| match effect {
                MergeEffect::Created(task) => recorder.created(&as_stored(task, &tasks)),
                MergeEffect::Replaced { before, after } => {
                    recorder.replaced(&before, &as_stored(after, &tasks))
                }
            })
            .collect();

        let mut audit_log = synthetic.clone();
        audit_log.extend(imported_log.unwrap_or_else(|| state.audit_log().to_vec()));
        info!(
            synthetic_entries = synthetic.len(),
            tasks = tasks.len(),
            "board document imported"
        );
        Transition::Applied {
            state: BoardState::new(
                tasks,
                audit_log,
                ExtendedMode {
                    enabled: state.extended_mode(),
                },
            ),
            events: synthetic,
        }
    }
}

/// Task-level effect of merging one incoming task.
enum MergeEffect {
    Created(Task),
    Replaced { before: Task, after: Task },
}

/// Returns `task` placed where the merged board stores its id.
fn as_stored(mut task: Task, stored: &[Task]) -> Task {
    if let Some(current) = stored.iter().find(|current| current.id() == task.id()) {
        task.place(current.status(), current.ordinal());
    }
    task
}

/// Adds imported entries whose id is unknown, keeping the log newest first.
///
/// Returns `None` when the import brings no new entries.
fn merge_audit_logs(current: &[AuditEvent], incoming: &[AuditEvent]) -> Option<Vec<AuditEvent>> {
    let known: HashSet<_> = current.iter().map(AuditEvent::id).collect();
    let mut added: Vec<AuditEvent> = Vec::new();
    for event in incoming {
        if !known.contains(event.id()) && !added.iter().any(|seen| seen.id() == event.id()) {
            added.push(event.clone());
        }
    }
    if added.is_empty() {
        return None;
    }

    let mut merged = current.to_vec();
    merged.extend(added);
    merged.sort_by(|left, right| right.timestamp().cmp(&left.timestamp()));
    Some(merged)
}

/// Renumbers a column `1..N` when two of its tasks share an ordinal.
///
/// Columns without collisions keep their ordinals, holes included.
fn normalize_if_colliding(tasks: &mut [Task], status: TaskStatus) {
    let mut seen = HashSet::new();
    let colliding = tasks
        .iter()
        .filter(|task| task.status() == status)
        .any(|task| !seen.insert(task.ordinal()));
    if !colliding {
        return;
    }

    let mut column: Vec<&mut Task> = tasks
        .iter_mut()
        .filter(|task| task.status() == status)
        .collect();
    column.sort_by(|left, right| {
        left.ordinal()
            .cmp(&right.ordinal())
            .then_with(|| left.created_at().cmp(&right.created_at()))
            .then_with(|| left.id().cmp(right.id()))
    });
    for (index, task) in column.into_iter().enumerate() {
        task.place(status, Ordinal::from_index(index));
    }
    debug!(%status, "renumbered column after ordinal collision on import");
}
