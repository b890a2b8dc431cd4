//! Board session configuration.

/// Settings for a board session.
///
/// # Examples
///
/// ```rust
/// use micro_kanban::board::config::BoardConfig;
///
/// let config = BoardConfig::default().with_due_soon_days(3);
/// assert_eq!(config.storage_key, "micro-kanban-state");
/// assert_eq!(config.due_soon_days, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Fixed identifier the snapshot is stored under.
    pub storage_key: String,
    /// Days ahead for which a due date counts as "due soon".
    pub due_soon_days: i64,
    /// Number of most recent entries listed in the audit summary.
    pub report_recent_events: usize,
    /// Whether exports are pretty-printed.
    pub pretty_export: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage_key: Self::DEFAULT_STORAGE_KEY.to_owned(),
            due_soon_days: 7,
            report_recent_events: 5,
            pretty_export: true,
        }
    }
}

impl BoardConfig {
    /// Storage identifier used when none is configured.
    pub const DEFAULT_STORAGE_KEY: &'static str = "micro-kanban-state";

    /// Sets the storage identifier.
    #[must_use]
    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }

    /// Sets the "due soon" window in days.
    #[must_use]
    pub const fn with_due_soon_days(mut self, days: i64) -> Self {
        self.due_soon_days = days;
        self
    }

    /// Sets how many recent entries the audit summary lists.
    #[must_use]
    pub const fn with_report_recent_events(mut self, count: usize) -> Self {
        self.report_recent_events = count;
        self
    }

    /// Selects compact exports.
    #[must_use]
    pub const fn compact_export(mut self) -> Self {
        self.pretty_export = false;
        self
    }
}
