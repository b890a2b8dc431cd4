//! Task aggregate and related input types.

use super::{
    EstimateMinutes, Ordinal, ParseTaskPriorityError, ParseTaskStatusError, RubricScore, TaskId,
    TaskTitle, TaskValidationError,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Normal priority.
    #[default]
    Medium,
    /// Needs attention first.
    High,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Board column a task belongs to.
///
/// Columns have a fixed left-to-right order: `todo`, `doing`, `done`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Not started.
    #[default]
    Todo,
    /// In progress.
    Doing,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// All statuses in column order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::Doing, Self::Done];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
        }
    }

    /// Returns the column to the left, or `None` for `todo`.
    #[must_use]
    pub const fn left(self) -> Option<Self> {
        match self {
            Self::Todo => None,
            Self::Doing => Some(Self::Todo),
            Self::Done => Some(Self::Doing),
        }
    }

    /// Returns the column to the right, or `None` for `done`.
    #[must_use]
    pub const fn right(self) -> Option<Self> {
        match self {
            Self::Todo => Some(Self::Doing),
            Self::Doing => Some(Self::Done),
            Self::Done => None,
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "doing" => Ok(Self::Doing),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A task on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    priority: TaskPriority,
    #[serde(default)]
    tags: Vec<String>,
    estimate_minutes: EstimateMinutes,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due_at: Option<DateTime<Utc>>,
    status: TaskStatus,
    ordinal: Ordinal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rubric_score: Option<RubricScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rubric_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    observations: Option<String>,
}

/// Parameter object for reconstructing a task from stored or seeded data.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskData {
    /// Task identifier.
    pub id: TaskId,
    /// Validated title.
    pub title: TaskTitle,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Priority.
    pub priority: TaskPriority,
    /// Ordered tags.
    pub tags: Vec<String>,
    /// Estimate in minutes.
    pub estimate_minutes: EstimateMinutes,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional due timestamp.
    pub due_at: Option<DateTime<Utc>>,
    /// Column.
    pub status: TaskStatus,
    /// Position inside the column.
    pub ordinal: Ordinal,
    /// Optional rubric score.
    pub rubric_score: Option<RubricScore>,
    /// Optional rubric comment.
    pub rubric_comment: Option<String>,
    /// Optional reviewer observations.
    pub observations: Option<String>,
}

impl Task {
    /// Reconstructs a task from already validated parts.
    #[must_use]
    pub fn from_data(data: TaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            priority: data.priority,
            tags: data.tags,
            estimate_minutes: data.estimate_minutes,
            created_at: data.created_at,
            due_at: data.due_at,
            status: data.status,
            ordinal: data.ordinal,
            rubric_score: data.rubric_score,
            rubric_comment: data.rubric_comment,
            observations: data.observations,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the tags in their stored order.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the estimate.
    #[must_use]
    pub const fn estimate_minutes(&self) -> EstimateMinutes {
        self.estimate_minutes
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the due timestamp, if any.
    #[must_use]
    pub const fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_at
    }

    /// Returns the column the task sits in.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the position inside the column.
    #[must_use]
    pub const fn ordinal(&self) -> Ordinal {
        self.ordinal
    }

    /// Returns the rubric score, if any.
    #[must_use]
    pub const fn rubric_score(&self) -> Option<RubricScore> {
        self.rubric_score
    }

    /// Returns the rubric comment, if any.
    #[must_use]
    pub fn rubric_comment(&self) -> Option<&str> {
        self.rubric_comment.as_deref()
    }

    /// Returns the reviewer observations, if any.
    #[must_use]
    pub fn observations(&self) -> Option<&str> {
        self.observations.as_deref()
    }

    /// Returns `true` when the task carries any rubric data.
    #[must_use]
    pub const fn has_rubric(&self) -> bool {
        self.rubric_score.is_some() || self.rubric_comment.is_some()
    }

    /// Moves the task to `status` at `ordinal`.
    pub(crate) const fn place(&mut self, status: TaskStatus, ordinal: Ordinal) {
        self.status = status;
        self.ordinal = ordinal;
    }

    /// Returns a copy with the patch applied.
    ///
    /// Identifier, creation timestamp and ordinal are preserved; the caller
    /// re-assigns the ordinal when the patch changes the status.
    pub(crate) fn patched(
        &self,
        patch: &TaskPatch,
        extended_mode: bool,
    ) -> Result<Self, TaskValidationError> {
        if patch.touches_extended_fields() && !extended_mode {
            return Err(TaskValidationError::ExtendedModeRequired);
        }

        let mut next = self.clone();
        if let Some(title) = &patch.title {
            next.title = TaskTitle::new(title.as_str())?;
        }
        if let Some(description) = &patch.description {
            next.description = normalize_text(description.as_deref());
        }
        if let Some(priority) = patch.priority {
            next.priority = priority;
        }
        if let Some(tags) = &patch.tags {
            next.tags = normalize_tags(tags)?;
        }
        if let Some(estimate) = patch.estimate_minutes {
            next.estimate_minutes = EstimateMinutes::new(estimate)?;
        }
        if let Some(due_at) = patch.due_at {
            next.due_at = due_at;
        }
        if let Some(status) = patch.status {
            next.status = status;
        }
        if let Some(score) = patch.rubric_score {
            next.rubric_score = score.map(RubricScore::new).transpose()?;
        }
        if let Some(comment) = &patch.rubric_comment {
            next.rubric_comment = normalize_text(comment.as_deref());
        }
        if let Some(observations) = &patch.observations {
            next.observations = normalize_text(observations.as_deref());
        }
        Ok(next)
    }
}

/// Input for creating a task.
///
/// Only the title and estimate are required; priority defaults to medium,
/// status to todo, and tags to an empty list.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    title: String,
    estimate_minutes: i64,
    description: Option<String>,
    priority: TaskPriority,
    tags: Vec<String>,
    due_at: Option<DateTime<Utc>>,
    status: TaskStatus,
    rubric_score: Option<f64>,
    rubric_comment: Option<String>,
    observations: Option<String>,
}

impl NewTask {
    /// Creates an input with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, estimate_minutes: i64) -> Self {
        Self {
            title: title.into(),
            estimate_minutes,
            description: None,
            priority: TaskPriority::default(),
            tags: Vec::new(),
            due_at: None,
            status: TaskStatus::default(),
            rubric_score: None,
            rubric_comment: None,
            observations: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Sets the due timestamp.
    #[must_use]
    pub const fn with_due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    /// Sets the target column.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the rubric score. Requires extended mode at creation time.
    #[must_use]
    pub const fn with_rubric_score(mut self, score: f64) -> Self {
        self.rubric_score = Some(score);
        self
    }

    /// Sets the rubric comment. Requires extended mode at creation time.
    #[must_use]
    pub fn with_rubric_comment(mut self, comment: impl Into<String>) -> Self {
        self.rubric_comment = Some(comment.into());
        self
    }

    /// Sets the reviewer observations. Requires extended mode at creation
    /// time.
    #[must_use]
    pub fn with_observations(mut self, observations: impl Into<String>) -> Self {
        self.observations = Some(observations.into());
        self
    }

    /// Returns the target column.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Builds the task at `ordinal`, stamping it with a fresh id and the
    /// clock's current time.
    pub(crate) fn build(
        self,
        ordinal: Ordinal,
        extended_mode: bool,
        clock: &impl Clock,
    ) -> Result<Task, TaskValidationError> {
        let title = TaskTitle::new(self.title)?;
        let estimate_minutes = EstimateMinutes::new(self.estimate_minutes)?;
        let extended_fields = self.rubric_score.is_some()
            || self.rubric_comment.is_some()
            || self.observations.is_some();
        if extended_fields && !extended_mode {
            return Err(TaskValidationError::ExtendedModeRequired);
        }
        let rubric_score = self.rubric_score.map(RubricScore::new).transpose()?;

        Ok(Task {
            id: TaskId::new(),
            title,
            description: normalize_text(self.description.as_deref()),
            priority: self.priority,
            tags: normalize_tags(&self.tags)?,
            estimate_minutes,
            created_at: clock.utc(),
            due_at: self.due_at,
            status: self.status,
            ordinal,
            rubric_score,
            rubric_comment: normalize_text(self.rubric_comment.as_deref()),
            observations: normalize_text(self.observations.as_deref()),
        })
    }
}

/// Partial update for an existing task.
///
/// Every field that is set replaces the current value wholesale. Optional
/// task fields use a nested `Option` so a patch can clear them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    title: Option<String>,
    description: Option<Option<String>>,
    priority: Option<TaskPriority>,
    tags: Option<Vec<String>>,
    estimate_minutes: Option<i64>,
    due_at: Option<Option<DateTime<Utc>>>,
    status: Option<TaskStatus>,
    rubric_score: Option<Option<f64>>,
    rubric_comment: Option<Option<String>>,
    observations: Option<Option<String>>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Removes the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = Some(tags.into_iter().collect());
        self
    }

    /// Replaces the estimate.
    #[must_use]
    pub const fn with_estimate_minutes(mut self, estimate_minutes: i64) -> Self {
        self.estimate_minutes = Some(estimate_minutes);
        self
    }

    /// Replaces the due timestamp.
    #[must_use]
    pub const fn with_due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(Some(due_at));
        self
    }

    /// Removes the due timestamp.
    #[must_use]
    pub const fn clear_due_at(mut self) -> Self {
        self.due_at = Some(None);
        self
    }

    /// Moves the task to another column, appending it at the end.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces the rubric score.
    #[must_use]
    pub const fn with_rubric_score(mut self, score: f64) -> Self {
        self.rubric_score = Some(Some(score));
        self
    }

    /// Removes the rubric score.
    #[must_use]
    pub const fn clear_rubric_score(mut self) -> Self {
        self.rubric_score = Some(None);
        self
    }

    /// Replaces the rubric comment.
    #[must_use]
    pub fn with_rubric_comment(mut self, comment: impl Into<String>) -> Self {
        self.rubric_comment = Some(Some(comment.into()));
        self
    }

    /// Replaces the reviewer observations.
    #[must_use]
    pub fn with_observations(mut self, observations: impl Into<String>) -> Self {
        self.observations = Some(Some(observations.into()));
        self
    }

    /// Removes the reviewer observations.
    #[must_use]
    pub fn clear_observations(mut self) -> Self {
        self.observations = Some(None);
        self
    }

    /// Returns `true` when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    const fn touches_extended_fields(&self) -> bool {
        self.rubric_score.is_some() || self.rubric_comment.is_some() || self.observations.is_some()
    }
}

/// Trims optional text and drops it when nothing remains.
fn normalize_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

fn normalize_tags(tags: &[String]) -> Result<Vec<String>, TaskValidationError> {
    tags.iter()
        .map(|tag| {
            let trimmed = tag.trim();
            if trimmed.is_empty() {
                Err(TaskValidationError::EmptyTag)
            } else {
                Ok(trimmed.to_owned())
            }
        })
        .collect()
}
