//! Query evaluation against tasks.

use super::{BoardQuery, DueFilter};
use crate::board::domain::Task;
use chrono::{DateTime, Days, NaiveTime, TimeZone, Utc};

impl BoardQuery {
    /// Returns `true` when `task` satisfies every filter in the query.
    ///
    /// `now` anchors the due-date buckets; "today" starts at midnight in the
    /// time zone of `now`.
    #[must_use]
    pub fn matches<Tz: TimeZone>(&self, task: &Task, now: &DateTime<Tz>) -> bool {
        self.matches_tags(task)
            && self.priority.is_none_or(|priority| task.priority() == priority)
            && self.matches_due(task, now)
            && self.estimates.iter().all(|estimate| {
                estimate
                    .comparison
                    .holds(task.estimate_minutes().value(), estimate.minutes)
            })
            && self.matches_text(task)
    }

    fn matches_tags(&self, task: &Task) -> bool {
        self.tags.iter().all(|wanted| {
            task.tags()
                .iter()
                .any(|tag| tag.to_lowercase() == *wanted)
        })
    }

    fn matches_due<Tz: TimeZone>(&self, task: &Task, now: &DateTime<Tz>) -> bool {
        let Some(filter) = self.due else {
            return true;
        };
        let Some(due_at) = task.due_at() else {
            return false;
        };
        let now_utc = now.with_timezone(&Utc);
        match filter {
            DueFilter::Overdue => due_at < now_utc,
            DueFilter::Week => {
                let start = start_of_day(now);
                let end = start.checked_add_days(Days::new(7)).unwrap_or(start);
                (start..=end).contains(&due_at)
            }
        }
    }

    fn matches_text(&self, task: &Task) -> bool {
        let Some(text) = &self.text else {
            return true;
        };
        let haystack = format!(
            "{} {}",
            task.title().as_str(),
            task.description().unwrap_or_default()
        )
        .to_lowercase();
        haystack.contains(text.as_str())
    }
}

/// Midnight of the current day in the time zone of `now`, as UTC.
fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let midnight = now.date_naive().and_time(NaiveTime::MIN);
    now.timezone()
        .from_local_datetime(&midnight)
        .earliest()
        .map_or_else(|| now.with_timezone(&Utc), |start| start.with_timezone(&Utc))
}

/// Returns the tasks matching `query`, in their input order.
///
/// # Examples
///
/// ```rust
/// use micro_kanban::board::domain::seed_state;
/// use micro_kanban::board::query::filter_tasks;
///
/// let board = seed_state();
/// let now = chrono::Utc::now();
/// let found = filter_tasks(board.tasks(), "p:medium est:>=60 riesgo", &now);
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].id().as_str(), "seed-2");
/// ```
#[must_use]
pub fn filter_tasks<'a, Tz: TimeZone>(
    tasks: &'a [Task],
    query: &str,
    now: &DateTime<Tz>,
) -> Vec<&'a Task> {
    let parsed = BoardQuery::parse(query);
    if parsed.is_empty() {
        return tasks.iter().collect();
    }
    tasks.iter().filter(|task| parsed.matches(task, now)).collect()
}
