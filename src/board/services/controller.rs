//! Board session: owns the current snapshot and drives the collaborators.

use super::{
    AuditFilter, AuditSummary, BoardError, BoardResult, BoardService, Direction, DropTarget,
    Transition, export_board, filter_audit_log, set_extended_mode,
};
use crate::board::config::BoardConfig;
use crate::board::domain::{
    AuditEvent, BoardState, ColumnView, DueStatus, NewTask, SortMode, Task, TaskId, TaskPatch,
    TaskStatus, column_views, due_status, seed_state,
};
use crate::board::ports::{BoardStore, DocumentValidator};
use crate::board::query::filter_tasks;
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A single-user board session.
///
/// The controller holds the only live [`BoardState`], replaces it after
/// each successful operation, and writes it to the store. Store failures
/// are logged and otherwise ignored; the in-memory board stays
/// authoritative.
pub struct BoardController<S, V, C>
where
    S: BoardStore,
    V: DocumentValidator,
    C: Clock,
{
    state: BoardState,
    service: BoardService<C>,
    store: Arc<S>,
    validator: Arc<V>,
    config: BoardConfig,
    dragging: Option<TaskId>,
}

impl<S, V, C> BoardController<S, V, C>
where
    S: BoardStore,
    V: DocumentValidator,
    C: Clock,
{
    /// Opens a session from the stored snapshot.
    ///
    /// Falls back to the seed board when nothing is stored or the stored
    /// snapshot cannot be read.
    pub async fn open(
        store: Arc<S>,
        validator: Arc<V>,
        clock: Arc<C>,
        config: BoardConfig,
    ) -> Self {
        let state = match store.load().await {
            Ok(Some(state)) => {
                info!(tasks = state.tasks().len(), "board restored from storage");
                state
            }
            Ok(None) => {
                info!("no stored board; starting from the seed board");
                seed_state()
            }
            Err(err) => {
                warn!(error = %err, "stored board unreadable; starting from the seed board");
                seed_state()
            }
        };
        Self {
            state,
            service: BoardService::new(clock),
            store,
            validator,
            config,
            dragging: None,
        }
    }

    /// Returns the current snapshot.
    #[must_use]
    pub const fn state(&self) -> &BoardState {
        &self.state
    }

    /// Returns the session configuration.
    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Creates a task. Returns the CREATE entry.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Validation`] when the input is malformed.
    pub async fn create(&mut self, input: NewTask) -> BoardResult<Vec<AuditEvent>> {
        let transition = self.service.create(&self.state, input)?;
        Ok(self.commit(transition).await)
    }

    /// Edits a task. Returns the UPDATE entry, or nothing for a no-op patch.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] or [`BoardError::Validation`].
    pub async fn update(
        &mut self,
        task_id: &TaskId,
        patch: &TaskPatch,
    ) -> BoardResult<Vec<AuditEvent>> {
        let transition = self.service.update(&self.state, task_id, patch)?;
        Ok(self.commit(transition).await)
    }

    /// Deletes a task. Returns the DELETE entry.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] when the task is absent.
    pub async fn delete(&mut self, task_id: &TaskId) -> BoardResult<Vec<AuditEvent>> {
        let transition = self.service.delete(&self.state, task_id)?;
        Ok(self.commit(transition).await)
    }

    /// Reorders a column by position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::PositionOutOfRange`] for positions outside the
    /// column.
    pub async fn reorder(
        &mut self,
        status: TaskStatus,
        from_index: usize,
        to_index: usize,
    ) -> BoardResult<Vec<AuditEvent>> {
        let transition = self
            .service
            .reorder(&self.state, status, from_index, to_index)?;
        Ok(self.commit(transition).await)
    }

    /// Drops a task onto a target. Returns the MOVE entry for column
    /// changes.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] when either task is absent.
    pub async fn move_task(
        &mut self,
        task_id: &TaskId,
        target: &DropTarget,
    ) -> BoardResult<Vec<AuditEvent>> {
        let transition = self.service.move_task(&self.state, task_id, target)?;
        Ok(self.commit(transition).await)
    }

    /// Moves a task to the neighbouring column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] when the task is absent.
    pub async fn move_adjacent(
        &mut self,
        task_id: &TaskId,
        direction: Direction,
    ) -> BoardResult<Vec<AuditEvent>> {
        let transition = self
            .service
            .move_adjacent(&self.state, task_id, direction)?;
        Ok(self.commit(transition).await)
    }

    /// Starts dragging a task, replacing any drag in progress.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] when the task is absent.
    pub fn begin_drag(&mut self, task_id: &TaskId) -> BoardResult<()> {
        if self.state.find_task(task_id).is_none() {
            return Err(BoardError::NotFound(task_id.clone()));
        }
        debug!(task_id = %task_id, "drag started");
        self.dragging = Some(task_id.clone());
        Ok(())
    }

    /// Returns the task being dragged, if any.
    #[must_use]
    pub const fn dragging(&self) -> Option<&TaskId> {
        self.dragging.as_ref()
    }

    /// Finishes the current drag.
    ///
    /// Releasing outside any target, or ending when no drag is active,
    /// changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] when the target task is absent. The
    /// drag ends either way.
    pub async fn end_drag(&mut self, target: Option<&DropTarget>) -> BoardResult<Vec<AuditEvent>> {
        let Some(task_id) = self.dragging.take() else {
            return Ok(Vec::new());
        };
        let Some(drop_target) = target else {
            debug!(task_id = %task_id, "drag released outside any target");
            return Ok(Vec::new());
        };
        self.move_task(&task_id, drop_target).await
    }

    /// Abandons the current drag.
    pub fn cancel_drag(&mut self) {
        if let Some(task_id) = self.dragging.take() {
            debug!(task_id = %task_id, "drag cancelled");
        }
    }

    /// Turns extended mode on or off. Returns `true` when the flag changed.
    pub async fn set_extended_mode(&mut self, enabled: bool) -> bool {
        let transition = set_extended_mode(&self.state, enabled);
        let changed = !transition.is_unchanged();
        self.commit(transition).await;
        changed
    }

    /// Replaces the board with the seed board.
    pub async fn reset(&mut self) {
        info!("board reset to the seed board");
        self.state = seed_state();
        self.dragging = None;
        self.persist().await;
    }

    /// Imports a JSON board document. Returns the synthetic entries.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::ImportParse`] or [`BoardError::ImportSchema`];
    /// the board is left untouched.
    pub async fn import_json(&mut self, raw: &str) -> BoardResult<Vec<AuditEvent>> {
        let transition = self
            .service
            .import(&self.state, raw, self.validator.as_ref())?;
        Ok(self.commit(transition).await)
    }

    /// Exports the board as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Serialization`] when encoding fails.
    pub fn export_json(&self) -> BoardResult<String> {
        export_board(&self.state, self.config.pretty_export)
    }

    /// Returns the tasks matching `query`, evaluated against the local day.
    #[must_use]
    pub fn filtered(&self, query: &str) -> Vec<&Task> {
        filter_tasks(self.state.tasks(), query, &self.service.clock().local())
    }

    /// Returns the three columns in display order.
    #[must_use]
    pub fn columns(&self, sort: SortMode) -> Vec<ColumnView<'_>> {
        column_views(self.state.tasks(), sort)
    }

    /// Returns the due-date badge for `task` relative to the local day.
    #[must_use]
    pub fn due_status(&self, task: &Task) -> DueStatus {
        due_status(
            task,
            &self.service.clock().local(),
            self.config.due_soon_days,
        )
    }

    /// Returns the audit entries passing `filter`, newest first.
    #[must_use]
    pub fn audit_entries(&self, filter: &AuditFilter) -> Vec<&AuditEvent> {
        filter_audit_log(self.state.audit_log(), self.state.tasks(), filter)
    }

    /// Summarises the audit log.
    #[must_use]
    pub fn audit_summary(&self) -> AuditSummary {
        AuditSummary::from_log(self.state.audit_log(), self.config.report_recent_events)
    }

    /// Renders the audit summary as plain text.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::ReportRender`] when the template fails.
    pub fn audit_report(&self) -> BoardResult<String> {
        self.audit_summary().render(self.state.tasks())
    }

    async fn commit(&mut self, transition: Transition) -> Vec<AuditEvent> {
        match transition {
            Transition::Unchanged => Vec::new(),
            Transition::Applied { state, events } => {
                self.state = state;
                self.persist().await;
                events
            }
        }
    }

    async fn persist(&self) {
        if let Err(err) = self.store.save(&self.state).await {
            warn!(error = %err, "failed to persist board snapshot");
        }
    }
}
