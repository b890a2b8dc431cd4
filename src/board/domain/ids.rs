//! Identifier and validated scalar types for the board domain.

use super::TaskValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque unique identifier for a task.
///
/// Fresh identifiers are UUID v4 strings; imported and seeded tasks may carry
/// any non-empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a new random task identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the first eight characters, as shown in compact listings.
    #[must_use]
    pub fn short(&self) -> &str {
        self.0
            .char_indices()
            .nth(8)
            .and_then(|(end, _)| self.0.get(..end))
            .unwrap_or(&self.0)
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque unique identifier for an audit log entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditEventId(String);

impl AuditEventId {
    /// Creates a new random audit event identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AuditEventId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for AuditEventId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for AuditEventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task title of at least [`TaskTitle::MIN_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Minimum title length in characters, measured after trimming.
    pub const MIN_CHARS: usize = 3;

    /// Creates a validated title. Surrounding whitespace is removed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::TitleTooShort`] when the trimmed title
    /// has fewer than [`TaskTitle::MIN_CHARS`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskValidationError> {
        let raw = value.into();
        let trimmed = raw.trim();
        let actual = trimmed.chars().count();
        if actual < Self::MIN_CHARS {
            return Err(TaskValidationError::TitleTooShort {
                min: Self::MIN_CHARS,
                actual,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Wraps a title known to satisfy the length rule.
    pub(crate) fn trusted(value: &str) -> Self {
        Self(value.to_owned())
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskTitle {
    type Error = TaskValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Positive estimate in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64")]
pub struct EstimateMinutes(u32);

impl EstimateMinutes {
    /// Creates a validated estimate.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::InvalidEstimate`] when the value is
    /// below one minute or does not fit in 32 bits.
    pub fn new(value: i64) -> Result<Self, TaskValidationError> {
        u32::try_from(value)
            .ok()
            .filter(|minutes| *minutes >= 1)
            .map(Self)
            .ok_or(TaskValidationError::InvalidEstimate(value))
    }

    /// Wraps an estimate known to be positive.
    pub(crate) const fn trusted(minutes: u32) -> Self {
        Self(minutes)
    }

    /// Returns the number of minutes.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for EstimateMinutes {
    type Error = TaskValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for EstimateMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.0)
    }
}

/// Display position of a task inside its status partition.
///
/// Ordinals are positive and compared numerically; they need not be
/// contiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64")]
pub struct Ordinal(u32);

impl Ordinal {
    /// The first position in a column.
    pub const FIRST: Self = Self(1);

    /// Creates a validated ordinal.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::InvalidOrdinal`] when the value is not
    /// a positive 32-bit integer.
    pub fn new(value: i64) -> Result<Self, TaskValidationError> {
        u32::try_from(value)
            .ok()
            .filter(|ordinal| *ordinal >= 1)
            .map(Self)
            .ok_or(TaskValidationError::InvalidOrdinal(value))
    }

    /// Returns the ordinal for a zero-based position in an ordered column.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        u32::try_from(index)
            .ok()
            .and_then(|position| position.checked_add(1))
            .map_or(Self(u32::MAX), Self)
    }

    /// Returns the ordinal directly after this one, or `None` when this is
    /// already the largest representable ordinal.
    #[must_use]
    pub const fn checked_next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(next) => Some(Self(next)),
            None => None,
        }
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for Ordinal {
    type Error = TaskValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rubric score in the closed range `[0, 10]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64")]
pub struct RubricScore(f64);

impl RubricScore {
    /// Lowest accepted score.
    pub const MIN: f64 = 0.0;
    /// Highest accepted score.
    pub const MAX: f64 = 10.0;

    /// Creates a validated rubric score.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::RubricScoreOutOfRange`] when the value
    /// is not finite or lies outside `[0, 10]`.
    pub fn new(value: f64) -> Result<Self, TaskValidationError> {
        if !value.is_finite() || !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(TaskValidationError::RubricScoreOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Returns the numeric score.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for RubricScore {
    type Error = TaskValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RubricScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
