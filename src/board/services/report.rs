//! Audit log filtering and the plain-text activity report.

use super::{BoardError, BoardResult};
use crate::board::domain::{AuditAction, AuditEvent, Task};
use minijinja::Environment;
use serde_json::{Value, json};

const REPORT_TEMPLATE: &str = "\
Audit log: {{ total }} entries
{% for row in counts %}- {{ row.action }}: {{ row.count }}
{% endfor %}{% if recent %}Most recent:
{% for event in recent %}- {{ event.timestamp }} {{ event.action }} {{ event.task }} [{{ event.actor }}]
{% endfor %}{% endif %}";

/// Audit log panel filter.
///
/// An empty filter matches every entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditFilter {
    /// Only entries with this action, when set.
    pub action: Option<AuditAction>,
    /// Case-insensitive text matched against the task id, its short form,
    /// and the task title.
    pub text: String,
}

impl AuditFilter {
    /// Creates a filter that matches everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the filter to one action.
    #[must_use]
    pub const fn with_action(mut self, action: AuditAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Sets the free-text needle.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Returns `true` when `event` passes the filter.
    ///
    /// The title is taken from the entry's diff, falling back to the task
    /// as it currently exists in `tasks`.
    #[must_use]
    pub fn matches(&self, event: &AuditEvent, tasks: &[Task]) -> bool {
        if self.action.is_some_and(|action| action != event.action()) {
            return false;
        }
        let needle = self.text.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let task_id = event.task_id();
        let title = task_title(event, tasks).unwrap_or_default();
        [task_id.as_str(), task_id.short(), title.as_str()]
            .iter()
            .any(|candidate| candidate.to_lowercase().contains(&needle))
    }
}

/// Returns the entries of `log` that pass `filter`, keeping log order.
#[must_use]
pub fn filter_audit_log<'a>(
    log: &'a [AuditEvent],
    tasks: &[Task],
    filter: &AuditFilter,
) -> Vec<&'a AuditEvent> {
    log.iter().filter(|event| filter.matches(event, tasks)).collect()
}

fn task_title(event: &AuditEvent, tasks: &[Task]) -> Option<String> {
    let change = event.change();
    change
        .after()
        .and_then(|snapshot| snapshot.title.clone())
        .or_else(|| change.before().and_then(|snapshot| snapshot.title.clone()))
        .or_else(|| {
            tasks
                .iter()
                .find(|task| task.id() == event.task_id())
                .map(|task| task.title().as_str().to_owned())
        })
}

/// Per-action counts and the latest entries of an audit log.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditSummary {
    /// Number of entries in the log.
    pub total: usize,
    /// Entry count per action, in [`AuditAction::ALL`] order.
    pub counts: Vec<(AuditAction, usize)>,
    /// The newest entries, newest first.
    pub recent: Vec<AuditEvent>,
}

impl AuditSummary {
    /// Summarises `log`, keeping at most `recent` of its newest entries.
    ///
    /// The log is assumed to be newest first.
    #[must_use]
    pub fn from_log(log: &[AuditEvent], recent: usize) -> Self {
        let counts = AuditAction::ALL
            .iter()
            .map(|action| {
                let count = log.iter().filter(|event| event.action() == *action).count();
                (*action, count)
            })
            .collect();
        Self {
            total: log.len(),
            counts,
            recent: log.iter().take(recent).cloned().collect(),
        }
    }

    /// Returns the number of entries recorded for `action`.
    #[must_use]
    pub fn count(&self, action: AuditAction) -> usize {
        self.counts
            .iter()
            .find(|(candidate, _)| *candidate == action)
            .map_or(0, |(_, count)| *count)
    }

    /// Renders the summary as a plain-text report, naming tasks by their
    /// title where one is known.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::ReportRender`] when the template fails.
    pub fn render(&self, tasks: &[Task]) -> BoardResult<String> {
        let environment = Environment::new();
        environment
            .render_str(REPORT_TEMPLATE, self.template_context(tasks))
            .map_err(|err| BoardError::ReportRender(err.to_string()))
    }

    fn template_context(&self, tasks: &[Task]) -> Value {
        let counts: Vec<Value> = self
            .counts
            .iter()
            .map(|(action, count)| json!({ "action": action.as_str(), "count": count }))
            .collect();
        let recent: Vec<Value> = self
            .recent
            .iter()
            .map(|event| {
                let task = task_title(event, tasks)
                    .unwrap_or_else(|| event.task_id().short().to_owned());
                json!({
                    "timestamp": event.timestamp().to_rfc3339(),
                    "action": event.action().as_str(),
                    "task": task,
                    "actor": event.actor_label(),
                })
            })
            .collect();
        json!({ "total": self.total, "counts": counts, "recent": recent })
    }
}
